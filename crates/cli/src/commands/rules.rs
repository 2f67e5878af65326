//! `parley rules` — Show the configuration rules generated for an agent.

use super::{read_json, resolve_now};
use chrono::{DateTime, Utc};
use parley_core::AgentConfiguration;
use parley_prompt::generate_rules;
use std::path::Path;

pub fn run(agent_path: &Path, now: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let agent: AgentConfiguration = read_json(agent_path)?;
    let now = resolve_now(now)?;
    print!("{}", render(&agent, now));
    Ok(())
}

/// One line per rule: `[order] text`.
fn render(agent: &AgentConfiguration, now: DateTime<Utc>) -> String {
    generate_rules(agent, now)
        .iter()
        .map(|rule| format!("[{}] {}\n", rule.order, rule.text))
        .collect()
}
