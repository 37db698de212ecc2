//! Environment variable helpers
//!
//! Unset and blank variables are treated the same way, so `DB_PASS=` in a
//! `.env` file keeps the default instead of clobbering it with garbage.

use std::str::FromStr;

/// Read a variable, ignoring it when unset or blank.
pub fn var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Read and parse a variable. Unparseable values are ignored with a warning.
pub fn parse<T: FromStr>(key: &str) -> Option<T> {
    let raw = var(key)?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(%key, value = %raw, "ignoring unparseable environment variable");
            None
        }
    }
}

/// Interpret common truthy spellings (`1`, `true`, `yes`, `on`).
pub fn flag(key: &str) -> Option<bool> {
    var(key).map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}
