//! Rule merger: flattens several rule lists with case-insensitive dedup.

use super::formatter::{format_rules, FormatOptions};
use std::collections::HashSet;

/// Flatten, trim and deduplicate rule lists.
///
/// Comparison is case-insensitive on the trimmed text. The first occurrence
/// wins and keeps its own casing; order of first occurrences is preserved.
pub fn dedup_rules<S: AsRef<str>>(rule_lists: &[&[S]]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for rule in rule_lists.iter().flat_map(|list| list.iter()) {
        let trimmed = rule.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_lowercase()) {
            out.push(trimmed.to_string());
        }
    }

    out
}

/// Merge rule lists and render them with [`format_rules`].
pub fn merge_rules<S: AsRef<str>>(rule_lists: &[&[S]], options: &FormatOptions) -> String {
    format_rules(&dedup_rules(rule_lists), options)
}

/// Drop rules that already appear (case-insensitively) in `emitted`.
pub(crate) fn without_emitted(rules: Vec<String>, emitted: &HashSet<String>) -> Vec<String> {
    rules
        .into_iter()
        .filter(|r| !emitted.contains(&r.trim().to_lowercase()))
        .collect()
}
