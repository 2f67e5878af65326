//! Subcommand implementations.

pub mod assemble;
pub mod config_cmd;
pub mod resolve;
pub mod rules;

use chrono::{DateTime, Utc};
use parley_config::AppConfig;
use parley_core::system_config::SystemConfigStore;
use parley_store::{FileStore, InMemoryStore, NoopStore};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;

/// Open the system configuration store named in the config.
pub fn open_store(config: &AppConfig) -> Arc<dyn SystemConfigStore> {
    match config.store.backend.as_str() {
        "file" => Arc::new(FileStore::new(config.store_path())),
        "in_memory" => Arc::new(InMemoryStore::new()),
        _ => Arc::new(NoopStore),
    }
}

/// Read and deserialize a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let value = serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse {}: {e}", path.display()))?;
    Ok(value)
}

/// Parse an RFC 3339 timestamp, or take the current time.
pub fn resolve_now(now: Option<&str>) -> Result<DateTime<Utc>, Box<dyn std::error::Error>> {
    match now {
        Some(raw) => Ok(DateTime::parse_from_rfc3339(raw)
            .map_err(|e| format!("Invalid timestamp '{raw}': {e}"))?
            .with_timezone(&Utc)),
        None => Ok(Utc::now()),
    }
}
