use crate::handlers;
use crate::state::AppState;
use axum::{routing::{delete, get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/prayers", get(handlers::get_prayers))
        .route("/api/prayers/:name/toggle", post(handlers::toggle_prayer))
        .route("/api/countdown", get(handlers::get_countdown))
        .route("/api/quran/:juz", get(handlers::get_juz))
        .route(
            "/api/recitations",
            get(handlers::list_recitations).post(handlers::add_recitation),
        )
        .route("/api/recitations/summary", get(handlers::get_recitation_summary))
        .route(
            "/api/counters",
            get(handlers::list_counters).post(handlers::add_counter),
        )
        .route("/api/counters/:id", delete(handlers::delete_counter))
        .route("/api/counters/:id/increment", post(handlers::increment_counter))
        .route("/api/counters/:id/reset", post(handlers::reset_counter))
        .with_state(state)
}
