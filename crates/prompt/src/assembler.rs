//! Message assembly pipeline, the core of Parley.
//!
//! Builds the ordered message list for one completion call from:
//!
//! 1. **Configuration rules** (time, language, length, persona) — `system`
//! 2. **Admin content** (admin system prompt + behavior rules) — `system`
//! 3. **Client system prompt** (verbatim) — `user`
//! 4. **Client behavior rules** (parsed, reformatted) — `user`
//! 5. **Persona rules**, when placed separately — `user`
//! 6. **Word-parsing instruction** for language assistants — `system`
//! 7. **Memory context** — `system`
//! 8. **Conversation history** (last N user/assistant turns)
//! 9. **The new user message** — always last
//!
//! Every step contributes at most one message (history excepted) and
//! omits itself when it has nothing to say.
//!
//! # Determinism
//!
//! Assembly is deterministic: identical inputs, including `now`, always
//! produce identical output. The clock is never read here.

use crate::resolver::{ResolvedAdminConfig, SystemPromptResolver};
use crate::rules::formatter::{format_rules, FormatOptions};
use crate::rules::generator::{self, generate_persona_rules, generate_rules, iso_timestamp};
use crate::rules::merger::{dedup_rules, without_emitted};
use crate::rules::parse_behavior_rules;
use crate::word_parsing;
use chrono::{DateTime, Utc};
use parley_config::{AssemblyConfig, AssemblyLayout, PersonaPlacement};
use parley_core::capability::{AgentTypeCapability, LanguageCapability};
use parley_core::message::{ConversationHistory, Message, Role};
use parley_core::system_config::SystemConfigStore;
use parley_core::{AgentConfiguration, Rule};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

// ── Types ─────────────────────────────────────────────────────────────────

/// All inputs required by the assembler for a single user turn.
pub struct AssemblyInput<'a> {
    /// Prior messages of the session, oldest first.
    pub history: &'a ConversationHistory,
    /// The agent's settings.
    pub agent: &'a AgentConfiguration,
    /// The new user message.
    pub user_message: &'a str,
    /// Retrieved memory snippets, most relevant first.
    pub relevant_memories: &'a [String],
    /// The time to stamp into the prompt.
    pub now: DateTime<Utc>,
}

/// The assembled messages plus a per-section account of how they were built.
#[derive(Debug, Clone, Serialize)]
pub struct AssembledPrompt {
    pub messages: Vec<Message>,
    pub report: AssemblyReport,
}

/// Which sections produced messages.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssemblyReport {
    pub sections: Vec<SectionStats>,
    /// History messages replayed after filtering and truncation.
    pub history_included: usize,
    /// History messages supplied by the caller.
    pub history_total: usize,
}

impl AssemblyReport {
    pub fn section(&self, name: &str) -> Option<&SectionStats> {
        self.sections.iter().find(|s| s.name == name)
    }
}

/// Statistics for one section of the prompt.
#[derive(Debug, Clone, Serialize)]
pub struct SectionStats {
    pub name: String,
    /// Role of the emitted message; `None` when the section was omitted or
    /// replays messages of several roles.
    pub role: Option<Role>,
    /// Rules, memories or messages that went into the section.
    pub items: usize,
}

// ── Assembler ─────────────────────────────────────────────────────────────

/// The message assembler. Holds no per-request state; create one and reuse it.
pub struct MessageAssembler {
    resolver: SystemPromptResolver,
    capability: Arc<dyn LanguageCapability>,
    config: AssemblyConfig,
}

impl MessageAssembler {
    /// Create an assembler over a system configuration store.
    pub fn new(store: Arc<dyn SystemConfigStore>, config: AssemblyConfig) -> Self {
        Self {
            resolver: SystemPromptResolver::new(store),
            capability: Arc::new(AgentTypeCapability),
            config,
        }
    }

    /// Replace the language-capability predicate.
    pub fn with_capability(mut self, capability: Arc<dyn LanguageCapability>) -> Self {
        self.capability = capability;
        self
    }

    /// Assemble the message list for one user turn.
    pub async fn assemble(&self, input: &AssemblyInput<'_>) -> Vec<Message> {
        self.assemble_with_report(input).await.messages
    }

    /// Assemble the message list and report what each section contributed.
    pub async fn assemble_with_report(&self, input: &AssemblyInput<'_>) -> AssembledPrompt {
        let mut builder = Builder::new(self.rule_options());
        let agent = input.agent;
        let agent_type = Some(&agent.agent_type);

        // ── Admin lookups (concurrent) ─────────────────────────────────────
        let admin = match self.config.layout {
            AssemblyLayout::Layered => self.resolver.resolve(agent_type).await,
            AssemblyLayout::MergedSystemPrompt => {
                let (system_prompt, behavior_rules) = tokio::join!(
                    self.resolver.resolve_merged_system_prompt(agent_type),
                    self.resolver.resolve_behavior_rules(agent_type),
                );
                ResolvedAdminConfig {
                    system_prompt,
                    behavior_rules,
                }
            }
        };

        // ── Merged layout opener: admin prompt + current time ──────────────
        if self.config.layout == AssemblyLayout::MergedSystemPrompt {
            let time_line = format!("Current date and time: {}", iso_timestamp(input.now));
            let content = match &admin.system_prompt {
                Some(prompt) => format!("{prompt}\n\n{time_line}"),
                None => time_line,
            };
            let items = usize::from(admin.system_prompt.is_some()) + 1;
            builder.push("system_prompt", Role::System, content, items);
        }

        // ── 1. Configuration rules ─────────────────────────────────────────
        let config_rules = self.configuration_rules(agent, input.now);
        builder.push_rules("configuration_rules", Role::System, &config_rules, None);

        // ── 2. Admin system prompt + behavior rules ────────────────────────
        // The merged layout already opened with the admin prompt.
        let admin_lead = match self.config.layout {
            AssemblyLayout::Layered => admin.system_prompt.as_deref(),
            AssemblyLayout::MergedSystemPrompt => None,
        };
        builder.push_rules("admin", Role::System, &admin.behavior_rules, admin_lead);

        // ── 3. Client system prompt (verbatim) ─────────────────────────────
        match agent.system_prompt() {
            Some(prompt) => builder.push("client_system_prompt", Role::User, prompt, 1),
            None => builder.skip("client_system_prompt"),
        }

        // ── 4. Client behavior rules ───────────────────────────────────────
        let client_rules = agent
            .behavior_rules()
            .map(parse_behavior_rules)
            .unwrap_or_default();
        builder.push_rules("client_behavior_rules", Role::User, &client_rules, None);

        // ── 5. Persona rules, placed separately ────────────────────────────
        let persona = match self.config.persona_placement {
            PersonaPlacement::Separate => {
                without_emitted(Rule::texts(&generate_persona_rules(agent)), &builder.emitted)
            }
            PersonaPlacement::Embedded => Vec::new(),
        };
        builder.push_rules("persona_rules", Role::User, &persona, None);

        // ── 6. Word-parsing instruction ────────────────────────────────────
        let capable = self.capability.is_language_capable(agent);
        if word_parsing::maybe_inject(&mut builder.messages, capable) {
            builder.record("word_parsing", Some(Role::System), 1);
        } else {
            builder.skip("word_parsing");
        }

        // ── 7. Memory context ──────────────────────────────────────────────
        let memory_block = memory_block(&self.config.memory_preamble, input.relevant_memories);
        let memory_items = input.relevant_memories.len();
        builder.push("memory_context", Role::System, memory_block, memory_items);

        // ── 8. Conversation history ────────────────────────────────────────
        let history = input.history.recent_turns(self.config.history_limit);
        let history_included = history.len();
        builder.record("conversation_history", None, history_included);
        builder.messages.extend(history);

        // ── 9. The new user message ────────────────────────────────────────
        builder.messages.push(Message::user(input.user_message));
        builder.record("user_message", Some(Role::User), 1);

        let report = AssemblyReport {
            sections: builder.sections,
            history_included,
            history_total: input.history.len(),
        };

        debug!(
            agent_type = %agent.agent_type,
            messages = builder.messages.len(),
            history = history_included,
            memories = memory_items,
            word_parsing = capable,
            "Assembled prompt"
        );

        AssembledPrompt {
            messages: builder.messages,
            report,
        }
    }

    // ── Helpers ────────────────────────────────────────────────────────────

    fn rule_options(&self) -> FormatOptions {
        FormatOptions::with_format(self.config.rule_format)
    }

    /// Rule texts for the configuration rules message, honoring layout and
    /// persona placement.
    fn configuration_rules(&self, agent: &AgentConfiguration, now: DateTime<Utc>) -> Vec<String> {
        let rules = generate_rules(agent, now)
            .into_iter()
            .filter(|r| {
                !(self.config.layout == AssemblyLayout::MergedSystemPrompt
                    && r.order == generator::ORDER_DATETIME)
            })
            .filter(|r| {
                self.config.persona_placement == PersonaPlacement::Embedded
                    || r.order < generator::ORDER_AGE
            })
            .collect::<Vec<_>>();
        Rule::texts(&rules)
    }
}

/// Numbered memory list under the preamble, one blank line between items.
/// Memories are inserted as given; only an empty list yields no block.
fn memory_block(preamble: &str, memories: &[String]) -> String {
    if memories.is_empty() {
        return String::new();
    }
    let items = memories
        .iter()
        .enumerate()
        .map(|(i, memory)| format!("{}. {memory}", i + 1))
        .collect::<Vec<_>>()
        .join("\n\n");
    format!("{preamble}\n{items}")
}

/// Accumulates messages, section stats and the set of rules already emitted.
struct Builder {
    messages: Vec<Message>,
    sections: Vec<SectionStats>,
    /// Lowercased rule texts already placed in the prompt.
    emitted: HashSet<String>,
    rule_options: FormatOptions,
}

impl Builder {
    fn new(rule_options: FormatOptions) -> Self {
        Self {
            messages: Vec::new(),
            sections: Vec::new(),
            emitted: HashSet::new(),
            rule_options,
        }
    }

    /// Push one message unless `content` is empty.
    fn push(&mut self, name: &str, role: Role, content: impl Into<String>, items: usize) {
        let content = content.into();
        if content.is_empty() {
            self.skip(name);
            return;
        }
        self.messages.push(Message::new(role, content));
        self.record(name, Some(role), items);
    }

    /// Deduplicate and format `rules` into one message, optionally preceded
    /// by a free-text lead paragraph.
    fn push_rules<S: AsRef<str>>(
        &mut self,
        name: &str,
        role: Role,
        rules: &[S],
        lead: Option<&str>,
    ) {
        let rules = dedup_rules(&[rules]);
        let body = format_rules(&rules, &self.rule_options);
        let lead = lead.map(str::trim).filter(|l| !l.is_empty());

        let content = match (lead, body.is_empty()) {
            (Some(lead), false) => format!("{lead}\n\n{body}"),
            (Some(lead), true) => lead.to_string(),
            (None, _) => body,
        };

        self.emitted
            .extend(rules.iter().map(|r| r.to_lowercase()));
        let items = rules.len() + usize::from(lead.is_some());
        self.push(name, role, content, items);
    }

    fn skip(&mut self, name: &str) {
        self.record(name, None, 0);
    }

    fn record(&mut self, name: &str, role: Option<Role>, items: usize) {
        self.sections.push(SectionStats {
            name: name.into(),
            role,
            items,
        });
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
