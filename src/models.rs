use crate::clock::CalendarDay;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrayerName {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl PrayerName {
    pub const ALL: [PrayerName; 5] = [
        PrayerName::Fajr,
        PrayerName::Dhuhr,
        PrayerName::Asr,
        PrayerName::Maghrib,
        PrayerName::Isha,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PrayerName::Fajr => "Fajr",
            PrayerName::Dhuhr => "Dhuhr",
            PrayerName::Asr => "Asr",
            PrayerName::Maghrib => "Maghrib",
            PrayerName::Isha => "Isha",
        }
    }
}

impl fmt::Display for PrayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrayerName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PrayerName::ALL
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown prayer '{s}'"))
    }
}

pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid time '{raw}'")))
    }

    /// Accepts `HH:mm`, ignoring a trailing zone label such as `05:50 (PKT)`.
    pub fn parse(raw: &str) -> Option<NaiveTime> {
        let token = raw.split_whitespace().next()?;
        NaiveTime::parse_from_str(token, FORMAT).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyEvent {
    pub name: PrayerName,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub follow_up_sent: bool,
}

impl DailyEvent {
    pub fn new(name: PrayerName, time: NaiveTime) -> Self {
        Self {
            name,
            time,
            completed: false,
            follow_up_sent: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecitationRecord {
    pub date: CalendarDay,
    pub section_index: u8,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyCounter {
    pub id: u64,
    pub name: String,
    pub count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<u64>,
}

pub fn default_counters() -> Vec<TallyCounter> {
    ["SubhanAllah", "Alhamdulillah", "Allahu Akbar"]
        .into_iter()
        .zip(1u64..)
        .map(|(name, id)| TallyCounter {
            id,
            name: name.to_string(),
            count: 0,
            target: None,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppData {
    #[serde(default)]
    pub daily_prayers: Vec<DailyEvent>,
    #[serde(default)]
    pub last_prayer_date: Option<CalendarDay>,
    #[serde(default)]
    pub quran_records: Vec<RecitationRecord>,
    #[serde(default = "default_counters")]
    pub zikr_list: Vec<TallyCounter>,
}

impl Default for AppData {
    fn default() -> Self {
        Self {
            daily_prayers: Vec::new(),
            last_prayer_date: None,
            quran_records: Vec::new(),
            zikr_list: default_counters(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DailyRecordResponse {
    pub date: CalendarDay,
    pub prayers: Vec<DailyEvent>,
}

#[derive(Debug, Deserialize)]
pub struct RecitationRequest {
    pub section_index: u8,
    pub amount: String,
}

#[derive(Debug, Deserialize)]
pub struct NewCounterRequest {
    pub name: String,
    #[serde(default)]
    pub target: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct DailyRecitationPoint {
    pub date: String,
    pub entries: u64,
}

#[derive(Debug, Serialize)]
pub struct JuzTally {
    pub section_index: u8,
    pub entries: u64,
}

#[derive(Debug, Serialize)]
pub struct RecitationSummary {
    pub last_7_days: Vec<DailyRecitationPoint>,
    pub by_juz: Vec<JuzTally>,
    pub total_entries: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prayer_name_parses_case_insensitively() {
        assert_eq!("dhuhr".parse::<PrayerName>().unwrap(), PrayerName::Dhuhr);
        assert_eq!(" Isha ".parse::<PrayerName>().unwrap(), PrayerName::Isha);
        assert!("Sunrise".parse::<PrayerName>().is_err());
    }

    #[test]
    fn event_time_persists_as_hour_minute() {
        let event = DailyEvent::new(PrayerName::Fajr, NaiveTime::from_hms_opt(5, 50, 0).unwrap());
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["time"], "05:50");
        assert_eq!(json["follow_up_sent"], false);

        let back: DailyEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn hhmm_parse_tolerates_zone_suffix() {
        assert_eq!(hhmm::parse("05:50 (PKT)"), NaiveTime::from_hms_opt(5, 50, 0));
        assert_eq!(hhmm::parse("bogus"), None);
        assert_eq!(hhmm::parse(""), None);
    }

    #[test]
    fn missing_counter_key_falls_back_to_defaults() {
        let data: AppData = serde_json::from_str(r#"{"quran_records": []}"#).unwrap();
        assert_eq!(data.zikr_list.len(), 3);
        assert_eq!(data.zikr_list[0].name, "SubhanAllah");
        assert!(data.last_prayer_date.is_none());
    }
}
