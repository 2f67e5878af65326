//! Ordered rule type and enumeration styles for rendering rule lists.

use serde::{Deserialize, Serialize};

/// A short natural-language directive plus its ordering key.
///
/// Rules are derived per assembly call and never persisted. Lower `order`
/// sorts first; rules with equal order keep their insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub text: String,
    pub order: u32,
}

impl Rule {
    pub fn new(order: u32, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            order,
        }
    }

    /// Stable-sort rules by order key, ascending.
    pub fn sort(rules: &mut [Rule]) {
        rules.sort_by_key(|r| r.order);
    }

    /// The rule texts, in their current order.
    pub fn texts(rules: &[Rule]) -> Vec<String> {
        rules.iter().map(|r| r.text.clone()).collect()
    }
}

/// How a list of rules is enumerated when rendered as one block of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleFormat {
    /// `1. first`, `2. second`, ...
    #[default]
    Numbered,
    /// `- first`, `- second`, ...
    Bulleted,
    /// Rules as-is, no prefix
    Plain,
}
