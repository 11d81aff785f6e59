use crate::clock::{CalendarDay, FixedClock};
use crate::errors::ProviderError;
use crate::followup::FollowUpNotifier;
use crate::models::{AppData, DailyEvent, PrayerName};
use crate::providers::{Ayah, JuzContent, Location, ScriptureProvider, TimingProvider, Timings};
use crate::state::{AppState, Services};
use crate::storage::MemoryStore;
use async_trait::async_trait;
use chrono::{NaiveDateTime, NaiveTime};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
    CalendarDay::from_ymd(2026, 3, day)
        .unwrap()
        .date()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

#[derive(Default)]
pub struct FakeUpstream {
    pub offline: AtomicBool,
    pub calls: AtomicUsize,
    pub hold: AtomicBool,
    pub release: Notify,
}

#[async_trait]
impl TimingProvider for FakeUpstream {
    async fn timings(&self, _location: &Location) -> Result<Timings, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.hold.load(Ordering::SeqCst) {
            self.release.notified().await;
        }
        if self.offline.load(Ordering::SeqCst) {
            return Err(ProviderError::Malformed {
                provider: "fake",
                reason: "offline".to_string(),
            });
        }
        Ok(Timings {
            fajr: hm(5, 50),
            dhuhr: hm(13, 30),
            asr: hm(16, 45),
            maghrib: hm(18, 25),
            isha: hm(19, 50),
        })
    }
}

#[async_trait]
impl ScriptureProvider for FakeUpstream {
    async fn juz(&self, juz: u8) -> Result<JuzContent, ProviderError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(ProviderError::Malformed {
                provider: "fake",
                reason: "offline".to_string(),
            });
        }
        Ok(JuzContent {
            juz,
            ayahs: vec![Ayah {
                text: format!("ayah of juz {juz}"),
                number: u32::from(juz),
                number_in_surah: 1,
            }],
        })
    }
}

#[derive(Default)]
pub struct Recorder(Mutex<Vec<PrayerName>>);

impl FollowUpNotifier for Recorder {
    fn notify(&self, event: &DailyEvent) {
        self.0.lock().unwrap().push(event.name);
    }
}

pub struct TestHarness {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub clock: Arc<FixedClock>,
    pub recorder: Arc<Recorder>,
    pub upstream: Arc<FakeUpstream>,
}

impl TestHarness {
    pub fn new(now: NaiveDateTime) -> Self {
        Self::build(now, false)
    }

    pub fn offline(now: NaiveDateTime) -> Self {
        Self::build(now, true)
    }

    fn build(now: NaiveDateTime, offline: bool) -> Self {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(FixedClock::new(now));
        let recorder = Arc::new(Recorder::default());
        let upstream = Arc::new(FakeUpstream::default());
        upstream.offline.store(offline, Ordering::SeqCst);
        let state = AppState::new(
            AppData::default(),
            Location {
                city: "Lahore".to_string(),
                country: "Pakistan".to_string(),
            },
            Services {
                store: store.clone(),
                clock: clock.clone(),
                timings: upstream.clone(),
                scripture: upstream.clone(),
                notifier: recorder.clone(),
            },
        );
        Self {
            state,
            store,
            clock,
            recorder,
            upstream,
        }
    }

    pub fn notified(&self) -> Vec<PrayerName> {
        self.recorder.0.lock().unwrap().clone()
    }
}
