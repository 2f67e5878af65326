//! The persisted shape of one system configuration row.

use parley_core::agent::AgentType;
use parley_core::system_config::ConfigKey;
use serde::{Deserialize, Serialize};

/// One `(key, agent_type) -> value` row.
///
/// `agent_type = None` is the global default row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfigEntry {
    pub key: ConfigKey,

    #[serde(default, alias = "agentType")]
    pub agent_type: Option<AgentType>,

    /// A string for `system_prompt`; an array, `{"rules": [...]}` object or
    /// JSON-encoded string for `behavior_rules`
    pub value: serde_json::Value,
}

impl SystemConfigEntry {
    pub fn new(key: ConfigKey, agent_type: Option<AgentType>, value: serde_json::Value) -> Self {
        Self {
            key,
            agent_type,
            value,
        }
    }

    /// A global (all agent types) row.
    pub fn global(key: ConfigKey, value: serde_json::Value) -> Self {
        Self::new(key, None, value)
    }

    pub fn for_type(key: ConfigKey, agent_type: impl Into<AgentType>, value: serde_json::Value) -> Self {
        Self::new(key, Some(agent_type.into()), value)
    }

    pub(crate) fn slot(&self) -> (ConfigKey, Option<AgentType>) {
        (self.key, self.agent_type.clone())
    }
}
