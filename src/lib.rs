pub mod app;
pub mod clock;
pub mod config;
pub mod countdown;
pub mod counters;
pub mod daily;
pub mod errors;
pub mod followup;
pub mod handlers;
pub mod models;
pub mod providers;
pub mod recitation;
pub mod state;
pub mod stats;
pub mod storage;
pub mod ticker;
pub mod ui;

#[cfg(test)]
mod testing;

pub use app::router;
pub use config::Config;
pub use state::{AppState, Services};
pub use storage::{JsonFileStore, Store};
