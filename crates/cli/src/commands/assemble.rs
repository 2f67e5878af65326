//! `parley assemble` — Build the message list for one chat turn.

use super::{open_store, read_json, resolve_now};
use parley_config::AppConfig;
use parley_core::{AgentConfiguration, ConversationHistory};
use parley_prompt::{AssembledPrompt, AssemblyInput, AssemblyReport, MessageAssembler};
use serde::Deserialize;
use std::path::Path;

/// The JSON request file accepted by `parley assemble`.
#[derive(Debug, Deserialize)]
pub struct AssembleRequest {
    #[serde(default)]
    pub agent: AgentConfiguration,

    #[serde(default)]
    pub history: ConversationHistory,

    #[serde(alias = "userMessage")]
    pub user_message: String,

    #[serde(default, alias = "relevantMemories")]
    pub relevant_memories: Vec<String>,

    /// RFC 3339 timestamp; defaults to the current time
    #[serde(default)]
    pub now: Option<String>,
}

pub async fn run(
    config: &AppConfig,
    request_path: &Path,
    report: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let request: AssembleRequest = read_json(request_path)?;
    let prompt = assemble(config, &request).await?;
    println!("{}", serde_json::to_string_pretty(&prompt.messages)?);
    if report {
        eprintln!("{}", render_report(&prompt.report));
    }
    Ok(())
}

/// Assemble the prompt described by `request`.
pub async fn assemble(
    config: &AppConfig,
    request: &AssembleRequest,
) -> Result<AssembledPrompt, Box<dyn std::error::Error>> {
    let assembler = MessageAssembler::new(open_store(config), config.assembly.clone());
    let now = resolve_now(request.now.as_deref())?;
    let prompt = assembler
        .assemble_with_report(&AssemblyInput {
            history: &request.history,
            agent: &request.agent,
            user_message: &request.user_message,
            relevant_memories: &request.relevant_memories,
            now,
        })
        .await;
    Ok(prompt)
}

fn render_report(report: &AssemblyReport) -> String {
    let mut out = String::from("Sections:\n");
    for section in &report.sections {
        let role = section
            .role
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".into());
        out.push_str(&format!(
            "  {:<24} {:<10} {} item(s)\n",
            section.name, role, section.items
        ));
    }
    out.push_str(&format!(
        "History: {} of {} message(s) replayed",
        report.history_included, report.history_total
    ));
    out
}
