//! Prompt assembly for Parley.
//!
//! Turns an agent's settings, admin configuration, conversation history and
//! recalled memories into the ordered message list sent to the completion
//! API:
//!
//! 1. **Generate** configuration rules from agent settings
//! 2. **Resolve** admin prompt and behavior rules (per type, then global)
//! 3. **Format** rule lists, merging and deduplicating them
//! 4. **Inject** the word-parsing instruction for language assistants
//! 5. **Append** memory context, recent history and the new user message
//!
//! Nothing in this crate fails a chat turn: missing or broken inputs only
//! mean fewer instructions reach the model.

pub mod assembler;
pub mod resolver;
pub mod rules;
pub mod word_parsing;

pub use assembler::{
    AssembledPrompt, AssemblyInput, AssemblyReport, MessageAssembler, SectionStats,
};
pub use resolver::{ResolvedAdminConfig, SystemPromptResolver};
pub use rules::{
    behavior_rules_from_value, dedup_rules, format_rules, generate_persona_rules, generate_rules,
    merge_rules, parse_behavior_rules, AgeBracket, FormatOptions,
};
pub use word_parsing::maybe_inject;
