use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    UntilPreDawn,
    UntilSunset,
    UntilNextPreDawn,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::UntilPreDawn => "Sehr in",
            Phase::UntilSunset => "Iftar in",
            Phase::UntilNextPreDawn => "Next Sehr in",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Remaining {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Remaining {
    fn from_duration(duration: Duration) -> Self {
        let total = duration.num_seconds().max(0);
        Self {
            hours: total / 3600,
            minutes: (total % 3600) / 60,
            seconds: total % 60,
        }
    }

    pub fn total_seconds(&self) -> i64 {
        self.hours * 3600 + self.minutes * 60 + self.seconds
    }

    pub fn clock_string(&self) -> String {
        format!("{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    pub phase: Phase,
    pub target: NaiveDateTime,
    pub remaining: Remaining,
}

#[derive(Debug, Serialize)]
pub struct CountdownView {
    pub phase: Phase,
    pub label: &'static str,
    pub target: String,
    pub remaining: String,
    pub remaining_seconds: i64,
}

impl From<&Countdown> for CountdownView {
    fn from(countdown: &Countdown) -> Self {
        Self {
            phase: countdown.phase,
            label: countdown.phase.label(),
            target: countdown.target.format("%Y-%m-%d %H:%M").to_string(),
            remaining: countdown.remaining.clock_string(),
            remaining_seconds: countdown.remaining.total_seconds(),
        }
    }
}

/// Comparisons are strict, so `now == sunset` counts down to sunset with nothing left.
pub fn classify(now: NaiveDateTime, pre_dawn: NaiveTime, sunset: NaiveTime) -> Countdown {
    let today = now.date();
    let pre_dawn_today = today.and_time(pre_dawn);
    let sunset_today = today.and_time(sunset);

    let (phase, target) = if now > sunset_today {
        (Phase::UntilNextPreDawn, pre_dawn_today + Duration::days(1))
    } else if now > pre_dawn_today {
        (Phase::UntilSunset, sunset_today)
    } else {
        (Phase::UntilPreDawn, pre_dawn_today)
    };

    Countdown {
        phase,
        target,
        remaining: Remaining::from_duration(target - now),
    }
}
