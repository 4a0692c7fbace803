use control_core::args::CommonArgs;
use control_core::config::DashboardConfig;
use control_core::event_bus::SnapshotBus;
use control_core::{logging, ControlStore};
use dashboard_backend::{build_router, AppState};
use log::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CommonArgs::parse_args(std::env::args().collect());
    let config = DashboardConfig::from_args(&args)?;
    logging::init(&config.log_level)?;
    info!("=== Dashboard Backend Starting ===");

    // 1. Control store, created once for the whole process
    let mut store = ControlStore::builder()
        .with_id_scheme(config.id_scheme)
        .build();
    info!("Control store ready (id scheme: {})", config.id_scheme);

    // 2. Fan-out of store snapshots to WebSocket sessions
    let bus = SnapshotBus::new(config.event_buffer);
    bus.attach(&mut store);

    // 3. Routes
    let app = build_router(AppState::new(store, bus), config.cors_permissive);

    let addr = config.listen_addr();
    info!("Dashboard Backend listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Dashboard Backend stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
