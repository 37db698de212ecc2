#![cfg(test)]
use tokio::sync::OnceCell;
use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use configs::AppConfig;

// Migrations run once per test process; `false` means no database.
static MIGRATED: OnceCell<bool> = OnceCell::const_new();

fn test_config() -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.apply_env();
    cfg.database.max_connections = cfg.database.max_connections.max(5);
    cfg.database.acquire_timeout_secs = 10;
    cfg
}

/// A migrated connection, or `None` when `SKIP_DB_TESTS` is set or MySQL is
/// unreachable.
pub async fn get_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let cfg = test_config();
    let ready = *MIGRATED
        .get_or_init(|| async {
            let Ok(db) = models::db::connect(&cfg.database).await else { return false };
            if db.ping().await.is_err() {
                eprintln!("skip: cannot reach {}", cfg.database.redacted_url());
                return false;
            }
            match migration::Migrator::up(&db, None).await {
                Ok(()) => true,
                Err(e) => {
                    eprintln!("skip: migrate up failed: {}", e);
                    false
                }
            }
        })
        .await;
    if !ready {
        return None;
    }
    // Fresh pool for the current test's runtime.
    models::db::connect(&cfg.database).await.ok()
}
