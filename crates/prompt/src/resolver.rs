//! Admin system prompt and behavior rule resolution.
//!
//! Each lookup walks an ordered list of scopes (the agent's own type, then
//! the global default row) and the first non-empty value wins. The
//! resolver is best-effort: store failures are logged and treated as a
//! missing row, so prompt assembly never aborts on them.

use crate::rules::behavior::behavior_rules_from_value;
use parley_core::agent::AgentType;
use parley_core::system_config::{ConfigKey, SystemConfigStore};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// The admin-defined inputs for one assembly call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedAdminConfig {
    pub system_prompt: Option<String>,
    pub behavior_rules: Vec<String>,
}

/// Resolves admin configuration with per-type → global fallback.
#[derive(Clone)]
pub struct SystemPromptResolver {
    store: Arc<dyn SystemConfigStore>,
}

impl SystemPromptResolver {
    pub fn new(store: Arc<dyn SystemConfigStore>) -> Self {
        Self { store }
    }

    /// The lookup order for an agent type: its own row first, then the
    /// global row. Without a type only the global row is consulted.
    pub fn fallback_scopes(agent_type: Option<&AgentType>) -> Vec<Option<&AgentType>> {
        match agent_type {
            Some(t) => vec![Some(t), None],
            None => vec![None],
        }
    }

    /// The admin system prompt for `agent_type`, or the global one when the
    /// type has none (or only whitespace).
    pub async fn resolve_system_prompt(&self, agent_type: Option<&AgentType>) -> Option<String> {
        for scope in Self::fallback_scopes(agent_type) {
            if let Some(prompt) = self.lookup_prompt(scope).await {
                return Some(prompt);
            }
        }
        None
    }

    /// The admin behavior rules for `agent_type`, or the global ones when
    /// the type's list is missing or parses to nothing.
    pub async fn resolve_behavior_rules(&self, agent_type: Option<&AgentType>) -> Vec<String> {
        for scope in Self::fallback_scopes(agent_type) {
            let rules = self.lookup_rules(scope).await;
            if !rules.is_empty() {
                return rules;
            }
        }
        Vec::new()
    }

    /// Global and per-type prompts joined (global first), for layouts that
    /// open with a single merged system prompt.
    pub async fn resolve_merged_system_prompt(
        &self,
        agent_type: Option<&AgentType>,
    ) -> Option<String> {
        let (global, typed) = match agent_type {
            Some(t) => tokio::join!(self.lookup_prompt(None), self.lookup_prompt(Some(t))),
            None => (self.lookup_prompt(None).await, None),
        };

        match (global, typed) {
            (Some(g), Some(t)) if g != t => Some(format!("{g}\n\n{t}")),
            (Some(g), _) => Some(g),
            (None, t) => t,
        }
    }

    /// Both lookups, run concurrently.
    pub async fn resolve(&self, agent_type: Option<&AgentType>) -> ResolvedAdminConfig {
        let (system_prompt, behavior_rules) = tokio::join!(
            self.resolve_system_prompt(agent_type),
            self.resolve_behavior_rules(agent_type),
        );
        ResolvedAdminConfig {
            system_prompt,
            behavior_rules,
        }
    }

    async fn lookup_prompt(&self, scope: Option<&AgentType>) -> Option<String> {
        let value = self.lookup(ConfigKey::SystemPrompt, scope).await?;
        value
            .as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    async fn lookup_rules(&self, scope: Option<&AgentType>) -> Vec<String> {
        self.lookup(ConfigKey::BehaviorRules, scope)
            .await
            .map(|value| behavior_rules_from_value(&value))
            .unwrap_or_default()
    }

    async fn lookup(&self, key: ConfigKey, scope: Option<&AgentType>) -> Option<serde_json::Value> {
        match self.store.find(key, scope).await {
            Ok(value) => {
                debug!(
                    store = self.store.name(),
                    %key,
                    agent_type = scope.map(AgentType::as_str).unwrap_or("*"),
                    found = value.is_some(),
                    "System config lookup"
                );
                value
            }
            Err(e) => {
                warn!(
                    store = self.store.name(),
                    %key,
                    agent_type = scope.map(AgentType::as_str).unwrap_or("*"),
                    "System config lookup failed, treating as absent: {e}"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parley_core::error::StoreError;
    use parley_store::{InMemoryStore, SystemConfigEntry};
    use serde_json::json;

    struct FailingStore;

    #[async_trait]
    impl SystemConfigStore for FailingStore {
        fn name(&self) -> &str {
            "failing"
        }

        async fn find(
            &self,
            key: ConfigKey,
            _agent_type: Option<&AgentType>,
        ) -> Result<Option<serde_json::Value>, StoreError> {
            Err(StoreError::LookupFailed {
                key: key.to_string(),
                reason: "database is down".into(),
            })
        }
    }

    fn resolver(entries: Vec<SystemConfigEntry>) -> SystemPromptResolver {
        SystemPromptResolver::new(Arc::new(InMemoryStore::from_entries(entries)))
    }

    fn tutor() -> AgentType {
        AgentType::language_assistant()
    }

    #[tokio::test]
    async fn typed_prompt_wins_over_global() {
        let r = resolver(vec![
            SystemConfigEntry::global(ConfigKey::SystemPrompt, json!("Global")),
            SystemConfigEntry::for_type(ConfigKey::SystemPrompt, tutor(), json!("Tutor")),
        ]);
        assert_eq!(r.resolve_system_prompt(Some(&tutor())).await.as_deref(), Some("Tutor"));
    }

    #[tokio::test]
    async fn blank_typed_prompt_falls_through_to_global() {
        let r = resolver(vec![
            SystemConfigEntry::global(ConfigKey::SystemPrompt, json!("Global")),
            SystemConfigEntry::for_type(ConfigKey::SystemPrompt, tutor(), json!("   ")),
        ]);
        assert_eq!(r.resolve_system_prompt(Some(&tutor())).await.as_deref(), Some("Global"));
    }

    #[tokio::test]
    async fn no_rows_resolves_to_none() {
        let r = resolver(vec![SystemConfigEntry::global(ConfigKey::SystemPrompt, json!(""))]);
        assert!(r.resolve_system_prompt(Some(&tutor())).await.is_none());
        assert!(r.resolve_system_prompt(None).await.is_none());
    }

    #[tokio::test]
    async fn empty_typed_rules_fall_back_to_global() {
        let r = resolver(vec![
            SystemConfigEntry::global(ConfigKey::BehaviorRules, json!(["Global rule"])),
            SystemConfigEntry::for_type(ConfigKey::BehaviorRules, tutor(), json!([" ", 7])),
        ]);
        assert_eq!(r.resolve_behavior_rules(Some(&tutor())).await, vec!["Global rule"]);
    }

    #[tokio::test]
    async fn typed_rules_accept_encoded_payloads() {
        let r = resolver(vec![
            SystemConfigEntry::global(ConfigKey::BehaviorRules, json!(["Global rule"])),
            SystemConfigEntry::for_type(
                ConfigKey::BehaviorRules,
                tutor(),
                json!("{\"rules\": [\"Correct mistakes gently\"]}"),
            ),
        ]);
        assert_eq!(
            r.resolve_behavior_rules(Some(&tutor())).await,
            vec!["Correct mistakes gently"]
        );
    }

    #[tokio::test]
    async fn store_failure_is_swallowed() {
        let r = SystemPromptResolver::new(Arc::new(FailingStore));
        let resolved = r.resolve(Some(&tutor())).await;
        assert_eq!(resolved, ResolvedAdminConfig::default());
    }

    #[tokio::test]
    async fn merged_prompt_joins_global_then_typed() {
        let r = resolver(vec![
            SystemConfigEntry::global(ConfigKey::SystemPrompt, json!("Global")),
            SystemConfigEntry::for_type(ConfigKey::SystemPrompt, tutor(), json!("Tutor")),
        ]);
        assert_eq!(
            r.resolve_merged_system_prompt(Some(&tutor())).await.as_deref(),
            Some("Global\n\nTutor")
        );
        assert_eq!(
            r.resolve_merged_system_prompt(Some(&AgentType::general())).await.as_deref(),
            Some("Global")
        );
    }

    #[tokio::test]
    async fn merged_prompt_with_only_typed_row() {
        let r = resolver(vec![SystemConfigEntry::for_type(
            ConfigKey::SystemPrompt,
            tutor(),
            json!("Tutor"),
        )]);
        assert_eq!(
            r.resolve_merged_system_prompt(Some(&tutor())).await.as_deref(),
            Some("Tutor")
        );
    }

    #[test]
    fn scopes_try_type_then_global() {
        let t = tutor();
        assert_eq!(SystemPromptResolver::fallback_scopes(Some(&t)), vec![Some(&t), None]);
        assert_eq!(SystemPromptResolver::fallback_scopes(None), vec![None]);
    }
}
