//! End-to-end assembly scenarios.
//!
//! These tests drive the full pipeline from agent settings, admin rows,
//! history and memories to the final message list.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use parley_config::AssemblyConfig;
use parley_core::agent::{AgentConfiguration, AgentType};
use parley_core::error::StoreError;
use parley_core::message::{ConversationHistory, Message, Role};
use parley_core::system_config::{ConfigKey, SystemConfigStore};
use parley_prompt::word_parsing::WORD_PARSING_MARKER;
use parley_prompt::{maybe_inject, AssemblyInput, MessageAssembler};
use parley_store::{InMemoryStore, NoopStore, SystemConfigEntry};
use serde_json::json;

// ── Fixtures ─────────────────────────────────────────────────────────────

/// A store whose backend is always down.
struct UnreachableStore;

#[async_trait]
impl SystemConfigStore for UnreachableStore {
    fn name(&self) -> &str {
        "unreachable"
    }

    async fn find(
        &self,
        _key: ConfigKey,
        _agent_type: Option<&AgentType>,
    ) -> Result<Option<serde_json::Value>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn two_turn_history() -> ConversationHistory {
    vec![
        Message::user("Hello"),
        Message::assistant("Hi! How can I help?"),
        Message::user("Tell me a joke"),
        Message::assistant("Why did the chicken cross the road?"),
    ]
    .into()
}

fn default_assembler() -> MessageAssembler {
    MessageAssembler::new(Arc::new(NoopStore), AssemblyConfig::default())
}

// ── Scenarios ────────────────────────────────────────────────────────────

#[tokio::test]
async fn client_prompt_and_rules_scenario() {
    let history = two_turn_history();
    let agent = AgentConfiguration {
        system_prompt: Some("You are a helpful assistant".into()),
        behavior_rules: Some("Be polite".into()),
        ..Default::default()
    };

    let messages = default_assembler()
        .assemble(&AssemblyInput {
            history: &history,
            agent: &agent,
            user_message: "New message",
            relevant_memories: &[],
            now: now(),
        })
        .await;

    assert_eq!(messages.last(), Some(&Message::user("New message")));
    assert!(messages.contains(&Message::user("You are a helpful assistant")));
    assert!(messages.iter().any(|m| m.content.contains("Be polite")));
    assert!(messages.len() > 2);
}

#[tokio::test]
async fn memories_scenario() {
    let history = two_turn_history();
    let agent = AgentConfiguration::default();
    let memories = vec!["Memory 1".to_string(), "Memory 2".to_string()];

    let messages = default_assembler()
        .assemble(&AssemblyInput {
            history: &history,
            agent: &agent,
            user_message: "What do you remember?",
            relevant_memories: &memories,
            now: now(),
        })
        .await;

    let memory_messages: Vec<&Message> = messages
        .iter()
        .filter(|m| {
            m.role == Role::System
                && m.content.contains("Memory 1")
                && m.content.contains("Memory 2")
        })
        .collect();
    assert_eq!(memory_messages.len(), 1);
    assert!(memory_messages[0]
        .content
        .contains("Relevant context from previous conversations:"));
}

#[tokio::test]
async fn history_truncated_to_most_recent_twenty() {
    let mut history = ConversationHistory::new();
    history.push(Message::system("stale system prompt from an old session"));
    for i in 0..25 {
        if i % 2 == 0 {
            history.push(Message::user(format!("user {i}")));
        } else {
            history.push(Message::assistant(format!("assistant {i}")));
        }
    }
    let agent = AgentConfiguration::default();

    let messages = default_assembler()
        .assemble(&AssemblyInput {
            history: &history,
            agent: &agent,
            user_message: "latest",
            relevant_memories: &[],
            now: now(),
        })
        .await;

    let replayed: Vec<&Message> = messages
        .iter()
        .filter(|m| m.role != Role::System)
        .take_while(|m| m.content != "latest")
        .collect();
    assert_eq!(replayed.len(), 20);
    assert_eq!(replayed[0].content, "assistant 5");
    assert_eq!(replayed[19].content, "user 24");
    assert!(!messages.iter().any(|m| m.content.contains("stale system prompt")));
}

#[tokio::test]
async fn typed_admin_rows_fall_back_to_global() {
    let store = InMemoryStore::from_entries(vec![
        SystemConfigEntry::global(ConfigKey::SystemPrompt, json!("You work for Acme.")),
        SystemConfigEntry::for_type(
            ConfigKey::SystemPrompt,
            AgentType::language_assistant(),
            json!("  "),
        ),
        SystemConfigEntry::global(ConfigKey::BehaviorRules, json!("[\"Never share secrets\"]")),
        SystemConfigEntry::for_type(
            ConfigKey::BehaviorRules,
            AgentType::language_assistant(),
            json!({"rules": ["Correct grammar gently", "correct GRAMMAR gently"]}),
        ),
    ]);
    let asm = MessageAssembler::new(Arc::new(store), AssemblyConfig::default());
    let history = ConversationHistory::new();
    let agent = AgentConfiguration {
        agent_type: AgentType::language_assistant(),
        language: Some("Spanish".into()),
        ..Default::default()
    };

    let messages = asm
        .assemble(&AssemblyInput {
            history: &history,
            agent: &agent,
            user_message: "Hola",
            relevant_memories: &[],
            now: now(),
        })
        .await;

    assert_eq!(
        messages[1],
        Message::system("You work for Acme.\n\n1. Correct grammar gently")
    );
    assert!(messages.iter().any(|m| m.content.contains(WORD_PARSING_MARKER)));
    assert_eq!(messages.last(), Some(&Message::user("Hola")));
}

#[tokio::test]
async fn unreachable_store_never_aborts_assembly() {
    let asm = MessageAssembler::new(Arc::new(UnreachableStore), AssemblyConfig::default());
    let history = two_turn_history();
    let agent = AgentConfiguration {
        system_prompt: Some("Client prompt".into()),
        ..Default::default()
    };

    let messages = asm
        .assemble(&AssemblyInput {
            history: &history,
            agent: &agent,
            user_message: "still works",
            relevant_memories: &[],
            now: now(),
        })
        .await;

    // rules + client prompt + 4 history + user
    assert_eq!(messages.len(), 7);
    assert_eq!(messages[0].role, Role::System);
    assert_eq!(messages[1], Message::user("Client prompt"));
    assert_eq!(messages.last(), Some(&Message::user("still works")));
}

#[tokio::test]
async fn injection_after_assembly_is_idempotent() {
    let history = ConversationHistory::new();
    let agent = AgentConfiguration {
        agent_type: AgentType::language_assistant(),
        ..Default::default()
    };

    let mut messages = default_assembler()
        .assemble(&AssemblyInput {
            history: &history,
            agent: &agent,
            user_message: "Bonjour",
            relevant_memories: &[],
            now: now(),
        })
        .await;
    let before = messages.len();

    assert!(!maybe_inject(&mut messages, true));
    assert!(!maybe_inject(&mut messages, true));
    assert_eq!(messages.len(), before);
    assert_eq!(
        messages
            .iter()
            .filter(|m| m.content.contains(WORD_PARSING_MARKER))
            .count(),
        1
    );
}
