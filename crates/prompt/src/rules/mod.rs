//! Rule sources and rendering.
//!
//! - [`generator`]: rules derived from agent settings
//! - [`behavior`]: tolerant parsing of stored behavior-rules payloads
//! - [`formatter`] / [`merger`]: turning rule lists into message text

pub mod behavior;
pub mod formatter;
pub mod generator;
pub mod merger;

pub use behavior::{behavior_rules_from_value, parse_behavior_rules};
pub use formatter::{format_rules, FormatOptions};
pub use generator::{generate_persona_rules, generate_rules, iso_timestamp, AgeBracket};
pub use merger::{dedup_rules, merge_rules};
