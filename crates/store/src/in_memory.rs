//! In-memory store — useful for testing and embedding in a host service.

use crate::entry::SystemConfigEntry;
use async_trait::async_trait;
use parley_core::agent::AgentType;
use parley_core::error::StoreError;
use parley_core::system_config::{ConfigKey, SystemConfigStore};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

type Slot = (ConfigKey, Option<AgentType>);

/// A store that keeps rows in a map.
pub struct InMemoryStore {
    rows: Arc<RwLock<HashMap<Slot, serde_json::Value>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::from_entries(Vec::new())
    }

    /// Build a store pre-populated with rows. Later rows for the same
    /// `(key, agent_type)` replace earlier ones.
    pub fn from_entries(entries: impl IntoIterator<Item = SystemConfigEntry>) -> Self {
        let rows = entries
            .into_iter()
            .map(|e| (e.slot(), e.value))
            .collect();
        Self {
            rows: Arc::new(RwLock::new(rows)),
        }
    }

    /// Insert or replace a row.
    pub async fn set(&self, entry: SystemConfigEntry) {
        self.rows.write().await.insert(entry.slot(), entry.value);
    }

    /// Remove a row. Returns whether it existed.
    pub async fn remove(&self, key: ConfigKey, agent_type: Option<&AgentType>) -> bool {
        self.rows
            .write()
            .await
            .remove(&(key, agent_type.cloned()))
            .is_some()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SystemConfigStore for InMemoryStore {
    fn name(&self) -> &str { "in_memory" }

    async fn find(
        &self,
        key: ConfigKey,
        agent_type: Option<&AgentType>,
    ) -> Result<Option<serde_json::Value>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows.get(&(key, agent_type.cloned())).cloned())
    }
}
