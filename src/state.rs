use crate::clock::{CalendarDay, Clock};
use crate::countdown::Countdown;
use crate::followup::FollowUpNotifier;
use crate::models::AppData;
use crate::providers::{Location, ScriptureProvider, TimingProvider};
use crate::storage::Store;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};

// All mutation goes through `data`: lock, change the snapshot, persist it whole, unlock.
#[derive(Clone)]
pub struct AppState {
    pub data: Arc<Mutex<AppData>>,
    pub store: Arc<dyn Store>,
    pub clock: Arc<dyn Clock>,
    pub timings: Arc<dyn TimingProvider>,
    pub scripture: Arc<dyn ScriptureProvider>,
    pub notifier: Arc<dyn FollowUpNotifier>,
    pub location: Location,
    pub countdown: Arc<watch::Sender<Option<Countdown>>>,
    refresh_attempt: Arc<Mutex<Option<CalendarDay>>>,
}

pub struct Services {
    pub store: Arc<dyn Store>,
    pub clock: Arc<dyn Clock>,
    pub timings: Arc<dyn TimingProvider>,
    pub scripture: Arc<dyn ScriptureProvider>,
    pub notifier: Arc<dyn FollowUpNotifier>,
}

impl AppState {
    pub fn new(data: AppData, location: Location, services: Services) -> Self {
        let (countdown, _) = watch::channel(None);
        Self {
            data: Arc::new(Mutex::new(data)),
            store: services.store,
            clock: services.clock,
            timings: services.timings,
            scripture: services.scripture,
            notifier: services.notifier,
            location,
            countdown: Arc::new(countdown),
            refresh_attempt: Arc::new(Mutex::new(None)),
        }
    }

    // True for the first caller on a given day only.
    pub async fn claim_refresh(&self, day: CalendarDay) -> bool {
        let mut attempted = self.refresh_attempt.lock().await;
        if *attempted == Some(day) {
            return false;
        }
        *attempted = Some(day);
        true
    }
}
