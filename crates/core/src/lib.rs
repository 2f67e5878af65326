//! # Parley Core
//!
//! Domain types, traits, and store errors for Parley prompt assembly.
//! This crate has **no async runtime dependency**. It defines the domain model
//! that the store, prompt and CLI crates implement against.
//!
//! ## Design Philosophy
//!
//! Every external collaborator of the prompt assembler is a trait here:
//! - [`SystemConfigStore`] for admin-defined prompts and behavior rules
//! - [`LanguageCapability`] for the word-parsing capability check
//!
//! Implementations live in their respective crates, so tests can swap in
//! stubs without touching the assembler.

pub mod agent;
pub mod capability;
pub mod error;
pub mod message;
pub mod rule;
pub mod system_config;

// Re-export key types at crate root for ergonomics
pub use agent::{AgentConfiguration, AgentType};
pub use capability::{AgentTypeCapability, LanguageCapability};
pub use error::StoreError;
pub use message::{ConversationHistory, Message, Role};
pub use rule::{Rule, RuleFormat};
pub use system_config::{ConfigKey, SystemConfigStore};
