use axum::Router;
use configs::AppConfig;
use service::{medicines::repo::JsonFileStore, runtime};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;
use crate::state::ServerState;

/// Any origin, method and header; credentials allowed.
pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open the data file and assemble the router for `cfg`.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let frontend_dir = cfg.server.frontend_dir.as_deref();
    runtime::ensure_env(&cfg.storage.data_file, frontend_dir).await?;

    let store = JsonFileStore::open(&cfg.storage.data_file).await?;
    info!(path = %store.path().display(), "medicine data file ready");
    let state = ServerState::new(store);

    Ok(routes::build_router(state, build_cors(), frontend_dir))
}

/// Public entry: build the app and serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let addr = cfg.bind_addr()?;
    info!(%addr, "starting medicine store");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("medicine store stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("received Ctrl+C, shutting down");
    }
}
