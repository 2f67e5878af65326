//! Configuration rule generator.
//!
//! Derives short natural-language rules from structured agent settings.
//! Each rule has a fixed order key:
//!
//! | Order | Rule | Present when |
//! |-------|------|--------------|
//! | 1 | Current time | always |
//! | 2 | Response language | language set |
//! | 3 | Response length | length set |
//! | 4 | Age persona | age set |
//! | 5 | Gender | gender set |
//! | 6 | Personality | personality set |
//! | 7 | Interests | at least one interest |
//! | 8 | Sentiment toward the user | sentiment set |
//!
//! Pure: the current time is an input, never read from the clock.

use chrono::{DateTime, SecondsFormat, Utc};
use parley_core::{AgentConfiguration, Rule};

pub const ORDER_DATETIME: u32 = 1;
pub const ORDER_LANGUAGE: u32 = 2;
pub const ORDER_RESPONSE_LENGTH: u32 = 3;
pub const ORDER_AGE: u32 = 4;
pub const ORDER_GENDER: u32 = 5;
pub const ORDER_PERSONALITY: u32 = 6;
pub const ORDER_INTERESTS: u32 = 7;
pub const ORDER_SENTIMENT: u32 = 8;

/// Age brackets for the persona age rule, youngest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AgeBracket {
    Child,
    Teenager,
    YoungAdult,
    MatureAdult,
    MiddleAged,
    Elder,
}

impl AgeBracket {
    pub fn for_age(age: u32) -> Self {
        match age {
            0..=12 => Self::Child,
            13..=17 => Self::Teenager,
            18..=29 => Self::YoungAdult,
            30..=49 => Self::MatureAdult,
            50..=69 => Self::MiddleAged,
            _ => Self::Elder,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Child => "child",
            Self::Teenager => "teenager",
            Self::YoungAdult => "young adult",
            Self::MatureAdult => "mature adult",
            Self::MiddleAged => "middle-aged",
            Self::Elder => "elder",
        }
    }

    fn style(self) -> &'static str {
        match self {
            Self::Child => {
                "use simple words, short sentences and a playful, curious tone"
            }
            Self::Teenager => {
                "use casual, energetic language and the references of someone still in school"
            }
            Self::YoungAdult => {
                "use a relaxed, modern and enthusiastic tone"
            }
            Self::MatureAdult => {
                "use a confident, balanced tone grounded in professional and life experience"
            }
            Self::MiddleAged => {
                "use a calm, thoughtful tone and draw on decades of experience"
            }
            Self::Elder => {
                "use a warm, patient tone and share the perspective that comes with a long life"
            }
        }
    }

    /// The full persona instruction for a given age.
    pub fn instruction(age: u32) -> String {
        let bracket = Self::for_age(age);
        let article = if bracket == Self::Elder { "an" } else { "a" };
        format!(
            "You are {age} years old. Talk like {article} {}: {}",
            bracket.label(),
            bracket.style()
        )
    }
}

/// Instruction used when the configured response length is "adaptive".
pub const ADAPTIVE_LENGTH_RULE: &str =
    "Adapt the length of your responses to the context: keep small talk short and give detailed answers when the topic needs it";

/// Render a timestamp the way the datetime rule expects (UTC, millisecond
/// precision, `Z` suffix).
pub fn iso_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Generate every configuration rule, sorted by order key.
pub fn generate_rules(agent: &AgentConfiguration, now: DateTime<Utc>) -> Vec<Rule> {
    let mut rules = vec![Rule::new(
        ORDER_DATETIME,
        format!("Currently it's {}", iso_timestamp(now)),
    )];

    if let Some(language) = agent.language() {
        rules.push(Rule::new(ORDER_LANGUAGE, format!("Always respond in {language}")));
    }

    if let Some(length) = agent.response_length() {
        let text = if length.eq_ignore_ascii_case("adaptive") {
            ADAPTIVE_LENGTH_RULE.to_string()
        } else {
            format!("Respond with messages of {length} length")
        };
        rules.push(Rule::new(ORDER_RESPONSE_LENGTH, text));
    }

    rules.extend(generate_persona_rules(agent));
    Rule::sort(&mut rules);
    rules
}

/// Only the persona rules (orders 4–8), sorted by order key.
pub fn generate_persona_rules(agent: &AgentConfiguration) -> Vec<Rule> {
    let mut rules = Vec::new();

    if let Some(age) = agent.age {
        rules.push(Rule::new(ORDER_AGE, AgeBracket::instruction(age)));
    }

    if let Some(gender) = agent.gender() {
        rules.push(Rule::new(ORDER_GENDER, format!("You are {gender}")));
    }

    if let Some(personality) = agent.personality() {
        rules.push(Rule::new(
            ORDER_PERSONALITY,
            format!("Your personality is {personality}"),
        ));
    }

    let interests = agent.interests();
    if !interests.is_empty() {
        rules.push(Rule::new(
            ORDER_INTERESTS,
            format!("These are your interests: {}", interests.join(", ")),
        ));
    }

    if let Some(sentiment) = agent.sentiment() {
        rules.push(Rule::new(
            ORDER_SENTIMENT,
            format!("You feel {sentiment} toward the user"),
        ));
    }

    Rule::sort(&mut rules);
    rules
}
