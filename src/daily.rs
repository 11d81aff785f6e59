use crate::clock::CalendarDay;
use crate::countdown::{self, Countdown};
use crate::errors::AppError;
use crate::models::{AppData, DailyEvent, PrayerName};
use crate::providers::Timings;
use crate::state::AppState;
use chrono::NaiveDateTime;
use tracing::info;

pub fn fresh_events(timings: &Timings) -> Vec<DailyEvent> {
    PrayerName::ALL
        .into_iter()
        .map(|name| DailyEvent::new(name, timings.get(name)))
        .collect()
}

pub fn is_current(data: &AppData, today: CalendarDay) -> bool {
    data.last_prayer_date == Some(today) && !data.daily_prayers.is_empty()
}

pub fn install(data: &mut AppData, today: CalendarDay, timings: &Timings) -> bool {
    if is_current(data, today) {
        return false;
    }
    data.daily_prayers = fresh_events(timings);
    data.last_prayer_date = Some(today);
    true
}

// Fetches without holding the data lock. Racing callers may both fetch; only the first install lands.
pub async fn resolve(state: &AppState) -> Result<bool, AppError> {
    let today = state.clock.today();
    if is_current(&*state.data.lock().await, today) {
        return Ok(false);
    }

    let timings = state.timings.timings(&state.location).await?;

    let mut data = state.data.lock().await;
    if !install(&mut data, today, &timings) {
        return Ok(false);
    }
    state.store.persist(&data).await?;
    info!(date = %today, city = %state.location.city, "started new daily prayer record");
    Ok(true)
}

pub fn toggle(data: &mut AppData, name: PrayerName) -> Option<&DailyEvent> {
    let event = data.daily_prayers.iter_mut().find(|event| event.name == name)?;
    event.completed = !event.completed;
    Some(event)
}

pub fn countdown_for(data: &AppData, now: NaiveDateTime) -> Option<Countdown> {
    let time_of = |name: PrayerName| {
        data.daily_prayers
            .iter()
            .find(|event| event.name == name)
            .map(|event| event.time)
    };
    Some(countdown::classify(
        now,
        time_of(PrayerName::Fajr)?,
        time_of(PrayerName::Maghrib)?,
    ))
}
