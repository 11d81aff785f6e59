use crate::clock::CalendarDay;
use crate::models::DailyEvent;
use chrono::{Duration, NaiveDateTime, NaiveTime};
use tracing::info;

pub const FOLLOW_UP_OFFSET_MINUTES: i64 = 30;

pub trait FollowUpNotifier: Send + Sync {
    fn notify(&self, event: &DailyEvent);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl FollowUpNotifier for LogNotifier {
    fn notify(&self, event: &DailyEvent) {
        info!(prayer = %event.name, time = %event.time.format("%H:%M"), "Reminder: did you pray {}?", event.name);
    }
}

pub fn window_open(day: CalendarDay, event_time: NaiveTime, now: NaiveDateTime, offset: Duration) -> bool {
    now > day.date().and_time(event_time) + offset
}

pub fn sweep(
    day: CalendarDay,
    events: &mut [DailyEvent],
    now: NaiveDateTime,
    notifier: &dyn FollowUpNotifier,
) -> usize {
    let offset = Duration::minutes(FOLLOW_UP_OFFSET_MINUTES);
    let mut flagged = 0;
    for event in events.iter_mut() {
        if event.completed || event.follow_up_sent {
            continue;
        }
        if window_open(day, event.time, now, offset) {
            event.follow_up_sent = true;
            notifier.notify(event);
            flagged += 1;
        }
    }
    flagged
}
