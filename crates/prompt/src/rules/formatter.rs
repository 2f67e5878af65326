//! Rule formatter: renders an ordered list of rules as one block of text.

use parley_core::RuleFormat;

/// Options for [`format_rules`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatOptions {
    pub format: RuleFormat,
}

impl FormatOptions {
    pub fn with_format(format: RuleFormat) -> Self {
        Self { format }
    }
}

/// Render rules as one block of text.
///
/// Rules are trimmed and blank ones dropped before numbering, so indices
/// stay contiguous. Returns an empty string when nothing survives; callers
/// must then omit the message entirely.
pub fn format_rules<S: AsRef<str>>(rules: &[S], options: &FormatOptions) -> String {
    let kept: Vec<&str> = rules
        .iter()
        .map(|r| r.as_ref().trim())
        .filter(|r| !r.is_empty())
        .collect();

    if kept.is_empty() {
        return String::new();
    }

    kept
        .iter()
        .enumerate()
        .map(|(i, rule)| match options.format {
            RuleFormat::Numbered => format!("{}. {}", i + 1, rule),
            RuleFormat::Bulleted => format!("- {rule}"),
            RuleFormat::Plain => (*rule).to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
