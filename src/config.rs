use crate::providers::Location;
use std::{env, path::PathBuf, str::FromStr, time::Duration};
use tracing::warn;

pub const DEFAULT_TIMING_API_BASE: &str = "https://api.aladhan.com/v1";
pub const DEFAULT_SCRIPTURE_API_BASE: &str = "https://api.alquran.cloud/v1";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub location: Location,
    /// Aladhan calculation method; 2 is ISNA.
    pub calc_method: u8,
    pub timing_api_base: String,
    pub scripture_api_base: String,
    pub countdown_tick: Duration,
    pub follow_up_tick: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            data_path: PathBuf::from("data/state.json"),
            location: Location {
                city: "Lahore".to_string(),
                country: "Pakistan".to_string(),
            },
            calc_method: 2,
            timing_api_base: DEFAULT_TIMING_API_BASE.to_string(),
            scripture_api_base: DEFAULT_SCRIPTURE_API_BASE.to_string(),
            countdown_tick: Duration::from_secs(1),
            follow_up_tick: Duration::from_secs(60),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str, fallback: String| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or(fallback)
        };

        Self {
            port: parsed(&lookup, "PORT", defaults.port),
            data_path: lookup("APP_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            location: Location {
                city: text("APP_CITY", defaults.location.city),
                country: text("APP_COUNTRY", defaults.location.country),
            },
            calc_method: parsed(&lookup, "APP_CALC_METHOD", defaults.calc_method),
            timing_api_base: text("TIMING_API_BASE", defaults.timing_api_base),
            scripture_api_base: text("SCRIPTURE_API_BASE", defaults.scripture_api_base),
            countdown_tick: defaults.countdown_tick,
            follow_up_tick: Duration::from_secs(
                parsed(&lookup, "FOLLOW_UP_TICK_SECS", defaults.follow_up_tick.as_secs()).max(1),
            ),
        }
    }
}

fn parsed<T: FromStr + Copy>(lookup: &impl Fn(&str) -> Option<String>, key: &str, fallback: T) -> T {
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("ignoring invalid {key}={raw:?}");
            fallback
        }),
        None => fallback,
    }
}
