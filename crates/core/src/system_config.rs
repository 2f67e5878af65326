//! System configuration store trait for admin-defined prompt settings.
//!
//! Admins configure a system prompt and a list of behavior rules, either
//! for a specific agent type or globally (agent type `None`). The store
//! only answers exact lookups; fallback from a type to the global row is
//! the resolver's job.

use crate::agent::AgentType;
use crate::error::StoreError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The known system configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigKey {
    /// A free-text system prompt (string)
    SystemPrompt,
    /// A list of behavior rules (string array, possibly JSON-encoded)
    BehaviorRules,
}

impl ConfigKey {
    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::SystemPrompt => "system_prompt",
            ConfigKey::BehaviorRules => "behavior_rules",
        }
    }
}

impl std::fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The core SystemConfigStore trait.
///
/// Implementations: in-memory, JSON file, none (no-op).
#[async_trait]
pub trait SystemConfigStore: Send + Sync {
    /// The backend name (e.g., "in_memory", "file", "none").
    fn name(&self) -> &str;

    /// Look up the value stored under exactly `(key, agent_type)`.
    ///
    /// `agent_type = None` addresses the global default row. Returns
    /// `Ok(None)` when no row exists.
    async fn find(
        &self,
        key: ConfigKey,
        agent_type: Option<&AgentType>,
    ) -> std::result::Result<Option<serde_json::Value>, StoreError>;
}
