use crate::counters::{self, CounterError};
use crate::countdown::CountdownView;
use crate::daily;
use crate::errors::AppError;
use crate::models::{
    DailyRecordResponse, NewCounterRequest, PrayerName, RecitationRecord, RecitationRequest,
    RecitationSummary, TallyCounter,
};
use crate::providers::JuzContent;
use crate::recitation;
use crate::state::AppState;
use crate::stats::build_recitation_summary_at;
use crate::ticker;
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    response::Html,
    Json,
};
use tracing::info;

impl From<CounterError> for AppError {
    fn from(err: CounterError) -> Self {
        match err {
            CounterError::NotFound(id) => AppError::not_found(format!("no counter with id {id}")),
        }
    }
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let today = state.clock.today();
    Html(render_index(&today.to_string(), &state.location))
}

pub async fn get_prayers(State(state): State<AppState>) -> Result<Json<DailyRecordResponse>, AppError> {
    daily::resolve(&state).await?;
    let data = state.data.lock().await;
    Ok(Json(DailyRecordResponse {
        date: data.last_prayer_date.unwrap_or_else(|| state.clock.today()),
        prayers: data.daily_prayers.clone(),
    }))
}

pub async fn toggle_prayer(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<DailyRecordResponse>, AppError> {
    let name: PrayerName = name.parse().map_err(AppError::bad_request)?;
    daily::resolve(&state).await?;

    let mut data = state.data.lock().await;
    let completed = daily::toggle(&mut data, name)
        .map(|event| event.completed)
        .ok_or_else(|| AppError::not_found(format!("{name} is not in today's record")))?;
    state.store.persist(&data).await?;
    info!(prayer = %name, completed, "prayer toggled");

    Ok(Json(DailyRecordResponse {
        date: data.last_prayer_date.unwrap_or_else(|| state.clock.today()),
        prayers: data.daily_prayers.clone(),
    }))
}

pub async fn get_countdown(State(state): State<AppState>) -> Result<Json<CountdownView>, AppError> {
    let latest = state.countdown.borrow().clone();
    let countdown = match latest {
        Some(countdown) => countdown,
        None => ticker::countdown_tick(&state)
            .await
            .ok_or_else(|| AppError::not_found("no prayer times held yet"))?,
    };
    Ok(Json(CountdownView::from(&countdown)))
}

pub async fn get_juz(
    State(state): State<AppState>,
    Path(juz): Path<u8>,
) -> Result<Json<JuzContent>, AppError> {
    if !recitation::valid_juz(juz) {
        return Err(AppError::bad_request("juz must be between 1 and 30"));
    }
    let content = state.scripture.juz(juz).await?;
    Ok(Json(content))
}

pub async fn list_recitations(State(state): State<AppState>) -> Json<Vec<RecitationRecord>> {
    let data = state.data.lock().await;
    Json(data.quran_records.clone())
}

pub async fn add_recitation(
    State(state): State<AppState>,
    Json(payload): Json<RecitationRequest>,
) -> Result<Json<Vec<RecitationRecord>>, AppError> {
    let today = state.clock.today();
    let mut data = state.data.lock().await;
    let added = recitation::record(&mut data.quran_records, today, payload.section_index, &payload.amount)
        .map_err(AppError::bad_request)?;
    if added {
        state.store.persist(&data).await?;
        info!(juz = payload.section_index, "recitation recorded");
    }
    Ok(Json(data.quran_records.clone()))
}

pub async fn get_recitation_summary(State(state): State<AppState>) -> Json<RecitationSummary> {
    let today = state.clock.today();
    let data = state.data.lock().await;
    Json(build_recitation_summary_at(today, &data.quran_records))
}

pub async fn list_counters(State(state): State<AppState>) -> Json<Vec<TallyCounter>> {
    let data = state.data.lock().await;
    Json(data.zikr_list.clone())
}

pub async fn add_counter(
    State(state): State<AppState>,
    Json(payload): Json<NewCounterRequest>,
) -> Result<Json<Vec<TallyCounter>>, AppError> {
    let mut data = state.data.lock().await;
    if let Some(id) = counters::add(&mut data.zikr_list, &payload.name, payload.target) {
        state.store.persist(&data).await?;
        info!(id, "counter added");
    }
    Ok(Json(data.zikr_list.clone()))
}

pub async fn increment_counter(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<TallyCounter>, AppError> {
    let mut data = state.data.lock().await;
    let counter = counters::increment(&mut data.zikr_list, id)?.clone();
    state.store.persist(&data).await?;
    Ok(Json(counter))
}

pub async fn reset_counter(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<TallyCounter>, AppError> {
    let mut data = state.data.lock().await;
    let counter = counters::reset(&mut data.zikr_list, id)?.clone();
    state.store.persist(&data).await?;
    Ok(Json(counter))
}

pub async fn delete_counter(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Vec<TallyCounter>>, AppError> {
    let mut data = state.data.lock().await;
    if counters::delete(&mut data.zikr_list, id)? {
        state.store.persist(&data).await?;
        info!(id, "counter deleted");
    }
    Ok(Json(data.zikr_list.clone()))
}
