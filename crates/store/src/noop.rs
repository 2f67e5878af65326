//! No-op store — no admin configuration at all.

use async_trait::async_trait;
use parley_core::agent::AgentType;
use parley_core::error::StoreError;
use parley_core::system_config::{ConfigKey, SystemConfigStore};

/// A store with no rows. Every lookup misses.
pub struct NoopStore;

#[async_trait]
impl SystemConfigStore for NoopStore {
    fn name(&self) -> &str { "none" }

    async fn find(
        &self,
        _key: ConfigKey,
        _agent_type: Option<&AgentType>,
    ) -> Result<Option<serde_json::Value>, StoreError> {
        Ok(None)
    }
}
