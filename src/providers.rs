use crate::errors::ProviderError;
use crate::models::{PrayerName, hhmm};
use async_trait::async_trait;
use chrono::NaiveTime;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

const TIMING_PROVIDER: &str = "timing provider";
const SCRIPTURE_PROVIDER: &str = "scripture provider";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub const JUZ_COUNT: u8 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub city: String,
    pub country: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub fajr: NaiveTime,
    pub dhuhr: NaiveTime,
    pub asr: NaiveTime,
    pub maghrib: NaiveTime,
    pub isha: NaiveTime,
}

impl Timings {
    pub fn get(&self, name: PrayerName) -> NaiveTime {
        match name {
            PrayerName::Fajr => self.fajr,
            PrayerName::Dhuhr => self.dhuhr,
            PrayerName::Asr => self.asr,
            PrayerName::Maghrib => self.maghrib,
            PrayerName::Isha => self.isha,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ayah {
    pub text: String,
    pub number: u32,
    pub number_in_surah: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JuzContent {
    pub juz: u8,
    pub ayahs: Vec<Ayah>,
}

#[async_trait]
pub trait TimingProvider: Send + Sync {
    async fn timings(&self, location: &Location) -> Result<Timings, ProviderError>;
}

#[async_trait]
pub trait ScriptureProvider: Send + Sync {
    async fn juz(&self, juz: u8) -> Result<JuzContent, ProviderError>;
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct TimingsData {
    timings: RawTimings,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawTimings {
    fajr: Option<String>,
    dhuhr: Option<String>,
    asr: Option<String>,
    maghrib: Option<String>,
    isha: Option<String>,
}

#[derive(Deserialize)]
struct RawJuz {
    number: Option<u8>,
    ayahs: Option<Vec<RawAyah>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAyah {
    text: Option<String>,
    number: Option<u32>,
    number_in_surah: Option<u32>,
}

fn malformed(provider: &'static str, reason: impl Into<String>) -> ProviderError {
    ProviderError::Malformed {
        provider,
        reason: reason.into(),
    }
}

fn parse_timings(body: &[u8]) -> Result<Timings, ProviderError> {
    let envelope: Envelope<TimingsData> = serde_json::from_slice(body)
        .map_err(|err| malformed(TIMING_PROVIDER, err.to_string()))?;
    let raw = envelope.data.timings;

    let field = |name: PrayerName, value: Option<String>| -> Result<NaiveTime, ProviderError> {
        let value = value.ok_or_else(|| malformed(TIMING_PROVIDER, format!("missing {name}")))?;
        hhmm::parse(&value)
            .ok_or_else(|| malformed(TIMING_PROVIDER, format!("{name} time '{value}' is not HH:mm")))
    };

    Ok(Timings {
        fajr: field(PrayerName::Fajr, raw.fajr)?,
        dhuhr: field(PrayerName::Dhuhr, raw.dhuhr)?,
        asr: field(PrayerName::Asr, raw.asr)?,
        maghrib: field(PrayerName::Maghrib, raw.maghrib)?,
        isha: field(PrayerName::Isha, raw.isha)?,
    })
}

fn parse_juz(requested: u8, body: &[u8]) -> Result<JuzContent, ProviderError> {
    let envelope: Envelope<RawJuz> = serde_json::from_slice(body)
        .map_err(|err| malformed(SCRIPTURE_PROVIDER, err.to_string()))?;
    let raw = envelope.data;

    if let Some(number) = raw.number {
        if number != requested {
            return Err(malformed(
                SCRIPTURE_PROVIDER,
                format!("asked for juz {requested}, got {number}"),
            ));
        }
    }

    let ayahs = raw
        .ayahs
        .ok_or_else(|| malformed(SCRIPTURE_PROVIDER, "missing ayahs"))?
        .into_iter()
        .enumerate()
        .map(|(idx, ayah)| match (ayah.text, ayah.number, ayah.number_in_surah) {
            (Some(text), Some(number), Some(number_in_surah)) => Ok(Ayah {
                text,
                number,
                number_in_surah,
            }),
            _ => Err(malformed(
                SCRIPTURE_PROVIDER,
                format!("ayah at position {idx} is incomplete"),
            )),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(JuzContent {
        juz: requested,
        ayahs,
    })
}

fn build_client() -> Client {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|err| {
            warn!("falling back to default http client: {err}");
            Client::new()
        })
}

async fn fetch_body(
    provider: &'static str,
    request: reqwest::RequestBuilder,
) -> Result<Vec<u8>, ProviderError> {
    let network = |source| ProviderError::Network { provider, source };
    let response = request.send().await.map_err(network)?;
    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::Status { provider, status });
    }
    let bytes = response.bytes().await.map_err(network)?;
    Ok(bytes.to_vec())
}

pub struct AladhanClient {
    client: Client,
    base_url: String,
    method: u8,
}

impl AladhanClient {
    pub fn new(base_url: impl Into<String>, method: u8) -> Self {
        Self {
            client: build_client(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            method,
        }
    }
}

#[async_trait]
impl TimingProvider for AladhanClient {
    async fn timings(&self, location: &Location) -> Result<Timings, ProviderError> {
        let url = format!("{}/timingsByCity", self.base_url);
        let method = self.method.to_string();
        let request = self.client.get(&url).query(&[
            ("city", location.city.as_str()),
            ("country", location.country.as_str()),
            ("method", method.as_str()),
        ]);

        let result = fetch_body(TIMING_PROVIDER, request)
            .await
            .and_then(|body| parse_timings(&body));
        match &result {
            Ok(timings) => debug!(city = %location.city, ?timings, "fetched prayer timings"),
            Err(err) => warn!(city = %location.city, "error fetching prayer times: {err}"),
        }
        result
    }
}

pub struct AlQuranClient {
    client: Client,
    base_url: String,
}

impl AlQuranClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: build_client(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ScriptureProvider for AlQuranClient {
    async fn juz(&self, juz: u8) -> Result<JuzContent, ProviderError> {
        let url = format!("{}/juz/{juz}/quran-uthmani", self.base_url);
        let result = fetch_body(SCRIPTURE_PROVIDER, self.client.get(&url))
            .await
            .and_then(|body| parse_juz(juz, &body));
        match &result {
            Ok(content) => debug!(juz, ayahs = content.ayahs.len(), "fetched juz"),
            Err(err) => warn!(juz, "error fetching juz: {err}"),
        }
        result
    }
}
