//! File-based store — persistent JSON-lines storage.
//!
//! Each line is a JSON-encoded [`SystemConfigEntry`]. Later lines for the
//! same `(key, agent_type)` replace earlier ones.
//!
//! Storage location: `~/.parley/system_config.jsonl`

use crate::entry::SystemConfigEntry;
use async_trait::async_trait;
use parley_core::agent::AgentType;
use parley_core::error::StoreError;
use parley_core::system_config::{ConfigKey, SystemConfigStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// A file-backed store using JSONL (one JSON object per line).
///
/// Rows are loaded into memory on creation and flushed to disk on every
/// mutation. This gives fast reads with durable writes.
pub struct FileStore {
    path: PathBuf,
    entries: Arc<RwLock<Vec<SystemConfigEntry>>>,
}

impl FileStore {
    /// Open a file-based store at the given path.
    ///
    /// If the file exists, rows are loaded from it.
    /// If the file does not exist, starts empty (file created on first write).
    pub fn new(path: PathBuf) -> Self {
        let entries = Self::load_from_disk(&path);
        debug!(path = %path.display(), count = entries.len(), "File config store loaded");
        Self {
            path,
            entries: Arc::new(RwLock::new(entries)),
        }
    }

    /// Load rows from a JSONL file, keeping the last row per slot.
    fn load_from_disk(path: &Path) -> Vec<SystemConfigEntry> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return Vec::new(), // File doesn't exist yet
        };

        let mut entries: Vec<SystemConfigEntry> = Vec::new();
        for line in content.lines().filter(|line| !line.trim().is_empty()) {
            match serde_json::from_str::<SystemConfigEntry>(line) {
                Ok(entry) => {
                    entries.retain(|e| e.slot() != entry.slot());
                    entries.push(entry);
                }
                Err(e) => warn!(error = %e, "Skipping corrupted system config row"),
            }
        }
        entries
    }

    /// Flush all rows to disk as JSONL.
    async fn flush(&self) -> Result<(), StoreError> {
        let entries = self.entries.read().await;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Storage(format!("Failed to create store directory: {e}"))
            })?;
        }

        let mut content = String::new();
        for entry in entries.iter() {
            let line = serde_json::to_string(entry).map_err(|e| {
                StoreError::Storage(format!("Failed to serialize config row: {e}"))
            })?;
            content.push_str(&line);
            content.push('\n');
        }

        std::fs::write(&self.path, &content)
            .map_err(|e| StoreError::Storage(format!("Failed to write store file: {e}")))?;

        Ok(())
    }

    /// Insert or replace a row and persist.
    pub async fn set(&self, entry: SystemConfigEntry) -> Result<(), StoreError> {
        {
            let mut entries = self.entries.write().await;
            entries.retain(|e| e.slot() != entry.slot());
            entries.push(entry);
        }
        self.flush().await
    }

    /// A snapshot of every row.
    pub async fn entries(&self) -> Vec<SystemConfigEntry> {
        self.entries.read().await.clone()
    }
}

#[async_trait]
impl SystemConfigStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn find(
        &self,
        key: ConfigKey,
        agent_type: Option<&AgentType>,
    ) -> Result<Option<serde_json::Value>, StoreError> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .find(|e| e.key == key && e.agent_type.as_ref() == agent_type)
            .map(|e| e.value.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("absent.jsonl"));
        assert!(store.entries().await.is_empty());
        assert!(store.find(ConfigKey::SystemPrompt, None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn set_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.jsonl");

        let store = FileStore::new(path.clone());
        store
            .set(SystemConfigEntry::global(ConfigKey::SystemPrompt, json!("Hello")))
            .await
            .unwrap();
        store
            .set(SystemConfigEntry::global(ConfigKey::SystemPrompt, json!("Replaced")))
            .await
            .unwrap();

        let reopened = FileStore::new(path);
        assert_eq!(reopened.entries().await.len(), 1);
        let value = reopened.find(ConfigKey::SystemPrompt, None).await.unwrap();
        assert_eq!(value, Some(json!("Replaced")));
    }

    #[tokio::test]
    async fn corrupted_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.jsonl");
        std::fs::write(
            &path,
            concat!(
                "{\"key\":\"system_prompt\",\"value\":\"Global\"}\n",
                "not json at all\n",
                "\n",
                "{\"key\":\"behavior_rules\",\"agent_type\":\"general\",\"value\":[\"Be brief\"]}\n",
            ),
        )
        .unwrap();

        let store = FileStore::new(path);
        assert_eq!(store.entries().await.len(), 2);
        let rules = store
            .find(ConfigKey::BehaviorRules, Some(&AgentType::general()))
            .await
            .unwrap();
        assert_eq!(rules, Some(json!(["Be brief"])));
    }

    #[tokio::test]
    async fn later_lines_override_earlier_ones() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.jsonl");
        std::fs::write(
            &path,
            concat!(
                "{\"key\":\"system_prompt\",\"value\":\"First\"}\n",
                "{\"key\":\"system_prompt\",\"value\":\"Second\"}\n",
            ),
        )
        .unwrap();

        let store = FileStore::new(path);
        let value = store.find(ConfigKey::SystemPrompt, None).await.unwrap();
        assert_eq!(value, Some(json!("Second")));
    }
}
