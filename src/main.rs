use ramazan_companion::{
    clock::SystemClock,
    followup::LogNotifier,
    providers::{AlQuranClient, AladhanClient},
    router, ticker, AppState, Config, JsonFileStore, Services, Store,
};
use std::{net::SocketAddr, sync::Arc};
use tokio::fs;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    if let Some(parent) = config.data_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let store = Arc::new(JsonFileStore::new(&config.data_path));
    let data = store.load().await?;
    info!(path = %store.path().display(), "state loaded");

    let state = AppState::new(
        data,
        config.location.clone(),
        Services {
            store,
            clock: Arc::new(SystemClock),
            timings: Arc::new(AladhanClient::new(&config.timing_api_base, config.calc_method)),
            scripture: Arc::new(AlQuranClient::new(&config.scripture_api_base)),
            notifier: Arc::new(LogNotifier),
        },
    );

    let follow_up = ticker::spawn_follow_up(state.clone(), config.follow_up_tick);
    let countdown = ticker::spawn_countdown(state.clone(), config.countdown_tick);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(city = %config.location.city, "listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    countdown.cancel();
    follow_up.cancel();
    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
}
