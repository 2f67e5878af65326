//! Word-parsing instruction for language-assistant agents.
//!
//! Language assistants append a machine-readable translation of their own
//! reply after the natural-language text. The client strips that payload
//! off and renders it as a word-by-word breakdown.

use parley_core::message::{Message, Role};

/// Marker identifying the instruction block.
pub const WORD_PARSING_MARKER: &str = "WORD PARSING";
/// Second marker; both must be present for a message to count as injected.
pub const JSON_STRUCTURE_MARKER: &str = "JSON structure";

/// The fixed instruction block.
pub const WORD_PARSING_INSTRUCTION: &str = r#"WORD PARSING INSTRUCTIONS:
After writing your complete reply, add a translation of YOUR OWN reply for the learner.
1. Translate only the reply you just wrote, word by word. Never translate or parse the user's message.
2. Also provide a full English translation of your reply.
3. Append both at the very end of your message, after the natural-language reply, using exactly this JSON structure:
{"words": [{"originalWord": "<word from your reply>", "translation": "<English translation>"}], "fullTranslation": "<full English translation of your reply>"}
Do not wrap the JSON in code fences and do not add any text after it."#;

/// Whether `messages` already carries the instruction block.
pub fn has_word_parsing_instruction(messages: &[Message]) -> bool {
    messages.iter().any(|m| {
        m.role == Role::System
            && m.content.contains(WORD_PARSING_MARKER)
            && m.content.contains(JSON_STRUCTURE_MARKER)
    })
}

/// Append the word-parsing instruction as a system message when the agent
/// is language-capable and it is not already present.
///
/// Returns whether a message was appended.
pub fn maybe_inject(messages: &mut Vec<Message>, is_language_capable: bool) -> bool {
    if !is_language_capable || has_word_parsing_instruction(messages) {
        return false;
    }
    messages.push(Message::system(WORD_PARSING_INSTRUCTION));
    true
}
