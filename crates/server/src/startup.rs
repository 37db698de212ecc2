use std::sync::Arc;

use axum::Router;
use configs::AppConfig;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;
use crate::state::AppState;
use service::{usuario::SeaOrmUsuarioRepository, UsuarioService};

pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Wire the pool, repository and service into router state.
///
/// An unreachable database is logged, not fatal: the pool is lazy and
/// requests fail individually until MySQL comes back.
pub async fn build_state(cfg: &AppConfig) -> anyhow::Result<AppState> {
    let db = models::db::connect(&cfg.database).await?;
    models::db::check_connectivity(&db, &cfg.database).await;
    let repo = Arc::new(SeaOrmUsuarioRepository::new(db));
    Ok(AppState::new(UsuarioService::new(repo), cfg.server.expose_error_detail))
}

/// Serve `cfg` until Ctrl+C, draining in-flight requests.
pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&cfg).await?;
    let app: Router = routes::build_router(state, build_cors());

    let listener = TcpListener::bind(cfg.server.bind_addr()).await?;
    let addr = listener.local_addr()?;
    info!(%addr, "servidor escuchando en http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "cannot listen for Ctrl+C; shutting down");
        return;
    }
    info!("received Ctrl+C, shutting down");
}
