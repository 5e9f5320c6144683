use anyhow::Result;
use home_energy_monitor::{api, config, live, telemetry};
use config::Config;
use telemetry::init_tracing;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cfg = Config::load()?;

    let (app_state, feed) = live::AppState::start(cfg.clone());
    let app = api::router(app_state, &cfg);

    let addr = cfg.server.socket_addr()?;

    if cfg.server.host == "0.0.0.0" {
        warn!("Server binding to 0.0.0.0 - dashboard will be accessible from the network");
    }

    info!(%addr, tick_seconds = cfg.feed.tick_seconds, "starting home energy monitor");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(telemetry::shutdown_signal())
        .await?;

    feed.stop().await;
    info!("shutdown complete");
    Ok(())
}
