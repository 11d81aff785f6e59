use crate::countdown::Countdown;
use crate::daily;
use crate::errors::AppError;
use crate::followup;
use crate::state::AppState;
use std::time::Duration;
use tokio::{task::JoinHandle, time::MissedTickBehavior};
use tracing::{debug, warn};

// Aborted on cancel or drop.
pub struct Ticker {
    name: &'static str,
    handle: JoinHandle<()>,
}

impl Ticker {
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
        debug!(ticker = self.name, "ticker stopped");
    }
}

fn spawn_loop<F, Fut>(name: &'static str, period: Duration, mut tick: F) -> Ticker
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: std::future::Future<Output = ()> + Send + 'static,
{
    let handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            tick().await;
        }
    });
    debug!(ticker = name, ?period, "ticker started");
    Ticker { name, handle }
}

pub fn spawn_countdown(state: AppState, period: Duration) -> Ticker {
    spawn_loop("countdown", period, move || {
        let state = state.clone();
        async move {
            countdown_tick(&state).await;
        }
    })
}

pub fn spawn_follow_up(state: AppState, period: Duration) -> Ticker {
    spawn_loop("follow-up", period, move || {
        let state = state.clone();
        async move {
            if let Err(err) = follow_up_tick(&state).await {
                warn!(status = %err.status, "follow-up sweep skipped: {}", err.message);
            }
        }
    })
}

// A stale record still drives the countdown; the new day is fetched at most once per date from here.
pub async fn countdown_tick(state: &AppState) -> Option<Countdown> {
    let today = state.clock.today();
    let stale = !daily::is_current(&*state.data.lock().await, today);
    if stale && state.claim_refresh(today).await {
        if let Err(err) = daily::resolve(state).await {
            warn!(date = %today, status = %err.status, "countdown refresh failed: {}", err.message);
        }
    }

    let now = state.clock.now();
    let countdown = daily::countdown_for(&*state.data.lock().await, now);
    state.countdown.send_replace(countdown.clone());
    countdown
}

pub async fn follow_up_tick(state: &AppState) -> Result<usize, AppError> {
    daily::resolve(state).await?;

    let today = state.clock.today();
    let now = state.clock.now();
    let mut data = state.data.lock().await;
    if !daily::is_current(&data, today) {
        return Ok(0);
    }
    let flagged = followup::sweep(today, &mut data.daily_prayers, now, state.notifier.as_ref());
    if flagged > 0 {
        state.store.persist(&data).await?;
    }
    Ok(flagged)
}
