//! Agent configuration snapshot consumed by prompt assembly.

use serde::{Deserialize, Deserializer, Serialize};

/// A tag classifying an agent's capability set.
///
/// Admin configuration is keyed by agent type; an absent type
/// (`Option::<&AgentType>::None`) means "applies to all types".
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentType(pub String);

impl AgentType {
    pub const GENERAL: &'static str = "general";
    pub const LANGUAGE_ASSISTANT: &'static str = "language_assistant";

    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn general() -> Self {
        Self::new(Self::GENERAL)
    }

    pub fn language_assistant() -> Self {
        Self::new(Self::LANGUAGE_ASSISTANT)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_language_assistant(&self) -> bool {
        self.0.eq_ignore_ascii_case(Self::LANGUAGE_ASSISTANT)
    }
}

impl Default for AgentType {
    fn default() -> Self {
        Self::general()
    }
}

impl std::fmt::Display for AgentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AgentType {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// The settings of one agent that shape its prompt.
///
/// Owned by the agent entity; prompt assembly only reads it. Blank strings
/// are treated the same as unset fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfiguration {
    /// Client-configured free-text system prompt
    #[serde(alias = "systemPrompt", skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,

    /// Client-configured behavior rules: a JSON array, `{"rules": [...]}`,
    /// or plain text
    #[serde(alias = "behaviorRules", skip_serializing_if = "Option::is_none")]
    pub behavior_rules: Option<String>,

    /// Sampling temperature (passed through untouched)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Model name (passed through untouched)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Response token cap (passed through untouched)
    #[serde(alias = "maxTokens", skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    #[serde(alias = "agentType", deserialize_with = "null_as_default")]
    pub agent_type: AgentType,

    /// Language the agent must answer in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// "short", "medium", "long", "adaptive", ...
    #[serde(alias = "responseLength", skip_serializing_if = "Option::is_none")]
    pub response_length: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub personality: Option<String>,

    /// How the agent feels toward the user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<String>,

    #[serde(
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub interests: Vec<String>,
}

impl AgentConfiguration {
    /// The client system prompt exactly as configured, unless it is blank.
    pub fn system_prompt(&self) -> Option<&str> {
        self.system_prompt
            .as_deref()
            .filter(|s| !s.trim().is_empty())
    }

    pub fn behavior_rules(&self) -> Option<&str> {
        non_blank(&self.behavior_rules)
    }

    pub fn language(&self) -> Option<&str> {
        non_blank(&self.language)
    }

    pub fn response_length(&self) -> Option<&str> {
        non_blank(&self.response_length)
    }

    pub fn gender(&self) -> Option<&str> {
        non_blank(&self.gender)
    }

    pub fn personality(&self) -> Option<&str> {
        non_blank(&self.personality)
    }

    pub fn sentiment(&self) -> Option<&str> {
        non_blank(&self.sentiment)
    }

    /// Interests with blank entries removed, trimmed.
    pub fn interests(&self) -> Vec<&str> {
        self.interests
            .iter()
            .map(|i| i.trim())
            .filter(|i| !i.is_empty())
            .collect()
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Nullable columns arrive as JSON `null`; read them as the field default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
