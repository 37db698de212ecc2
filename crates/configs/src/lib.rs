//! Application configuration.
//!
//! Values come from an optional TOML file (`CONFIG_PATH`, default
//! `config.toml`), then environment variables override them. Anything left
//! unset falls back to the defaults below.

use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub worker_threads: Option<usize>,
    /// Include raw storage error text (`detalle`) in error responses. On by
    /// default; `EXPOSE_ERROR_DETAIL=false` hides it.
    pub expose_error_detail: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".into(), port: 3000, worker_threads: None, expose_error_detail: true }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 3306,
            user: "root".into(),
            password: String::new(),
            name: "registro".into(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 10,
            acquire_timeout_secs: 30,
            idle_timeout_secs: 600,
            max_lifetime_secs: 3600,
            sqlx_logging: false,
        }
    }
}

pub fn default_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    Ok(toml::from_str(content)?)
}

impl AppConfig {
    /// File (if present) + environment + validation.
    pub fn load_and_validate() -> Result<Self> {
        let path = default_path();
        let mut cfg = if std::path::Path::new(&path).exists() {
            load_from_file(&path).map_err(|e| anyhow!("cannot read {path}: {e}"))?
        } else {
            AppConfig::default()
        };
        cfg.apply_env();
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn apply_env(&mut self) {
        self.server.apply_env();
        self.database.apply_env();
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn apply_env(&mut self) {
        if let Some(host) = common::env::var("HOST") { self.host = host; }
        if let Some(port) = common::env::parse("PORT") { self.port = port; }
        if let Some(w) = common::env::parse("TOKIO_WORKER_THREADS") { self.worker_threads = Some(w); }
        if let Some(expose) = common::env::flag("EXPOSE_ERROR_DETAIL") { self.expose_error_detail = expose; }
    }

    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "0.0.0.0".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        if self.worker_threads == Some(0) {
            self.worker_threads = None;
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    fn apply_env(&mut self) {
        if let Some(host) = common::env::var("DB_HOST") { self.host = host; }
        if let Some(port) = common::env::parse("DB_PORT") { self.port = port; }
        if let Some(user) = common::env::var("DB_USER") { self.user = user; }
        // An empty password is a legitimate value, so read it raw.
        if let Ok(pass) = std::env::var("DB_PASS") { self.password = pass; }
        if let Some(name) = common::env::var("DB_NAME") { self.name = name; }
        if let Some(max) = common::env::parse("DB_MAX_CONNECTIONS") { self.max_connections = max; }
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(anyhow!("database.host is empty"));
        }
        if self.user.trim().is_empty() {
            return Err(anyhow!("database.user is empty"));
        }
        if self.name.trim().is_empty() {
            return Err(anyhow!("database.name is empty"));
        }
        if self.port == 0 {
            return Err(anyhow!("database.port must be within 1..=65535"));
        }
        if self.max_connections == 0 {
            return Err(anyhow!("database.max_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive"));
        }
        Ok(())
    }

    /// `mysql://` URL with user and password percent-encoded.
    pub fn url(&self) -> String {
        let user = urlencoding::encode(&self.user);
        if self.password.is_empty() {
            format!("mysql://{}@{}:{}/{}", user, self.host, self.port, self.name)
        } else {
            let pass = urlencoding::encode(&self.password);
            format!("mysql://{}:{}@{}:{}/{}", user, pass, self.host, self.port, self.name)
        }
    }

    /// Same as [`DatabaseConfig::url`] with the password masked, for logs.
    pub fn redacted_url(&self) -> String {
        let user = urlencoding::encode(&self.user);
        let pass = if self.password.is_empty() { "" } else { ":***" };
        format!("mysql://{}{}@{}:{}/{}", user, pass, self.host, self.port, self.name)
    }

    pub fn connect_timeout(&self) -> Duration { Duration::from_secs(self.connect_timeout_secs) }
    pub fn acquire_timeout(&self) -> Duration { Duration::from_secs(self.acquire_timeout_secs) }
    pub fn idle_timeout(&self) -> Duration { Duration::from_secs(self.idle_timeout_secs) }
    pub fn max_lifetime(&self) -> Duration { Duration::from_secs(self.max_lifetime_secs) }
}
