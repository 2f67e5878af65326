//! Message and conversation-history domain types.
//!
//! A [`Message`] is the unit of the assembled prompt: a role plus its text.
//! It carries no ids or timestamps so that assembling the same inputs twice
//! yields byte-identical output.

use serde::{Deserialize, Serialize};

/// The role of a message sender in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions to the model (rules, memory context)
    System,
    /// The end user, or client-supplied configuration text
    User,
    /// The AI assistant
    Assistant,
}

impl Role {
    /// Whether messages of this role belong in replayed conversation history.
    pub fn is_conversational(self) -> bool {
        matches!(self, Role::User | Role::Assistant)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        };
        f.write_str(name)
    }
}

/// A single role-tagged message, as handed to the completion request builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who the message is attributed to
    pub role: Role,

    /// The text content
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }
}

/// Prior messages of a session, oldest first.
///
/// Persisted elsewhere; the assembler only reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationHistory {
    pub messages: Vec<Message>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message to the history.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The most recent `limit` user/assistant messages in chronological order.
    ///
    /// System entries are skipped before the window is applied, so they
    /// never take up a slot.
    pub fn recent_turns(&self, limit: usize) -> Vec<Message> {
        let turns: Vec<&Message> = self
            .messages
            .iter()
            .filter(|m| m.role.is_conversational())
            .collect();
        let start = turns.len().saturating_sub(limit);
        turns[start..].iter().map(|m| (*m).clone()).collect()
    }
}

impl From<Vec<Message>> for ConversationHistory {
    fn from(messages: Vec<Message>) -> Self {
        Self { messages }
    }
}
