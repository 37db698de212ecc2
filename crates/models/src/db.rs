//! Pool construction for the MySQL backend.

use configs::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::{error, info};

/// Build the bounded pool described by `cfg`.
///
/// The pool is lazy: no connection is opened here, so an unreachable
/// database does not prevent startup. Callers waiting on an exhausted pool
/// queue for up to `acquire_timeout`.
pub async fn connect(cfg: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(cfg.url());
    opt.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(cfg.connect_timeout())
        .acquire_timeout(cfg.acquire_timeout())
        .idle_timeout(cfg.idle_timeout())
        .max_lifetime(cfg.max_lifetime())
        .sqlx_logging(cfg.sqlx_logging)
        .connect_lazy(true);
    Database::connect(opt).await
}

/// Try one round trip and log the outcome. Never fails the caller.
pub async fn check_connectivity(db: &DatabaseConnection, cfg: &DatabaseConfig) -> bool {
    match db.ping().await {
        Ok(()) => {
            info!(database = %cfg.name, url = %cfg.redacted_url(), "connected to MySQL");
            true
        }
        Err(e) => {
            error!(database = %cfg.name, url = %cfg.redacted_url(), error = %e, "cannot reach MySQL; requests will fail until it is available");
            false
        }
    }
}
