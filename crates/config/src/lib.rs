//! Configuration loading, validation, and management for Parley.
//!
//! Loads configuration from `~/.parley/config.toml` with environment
//! variable overrides. Validates all settings at load time.

use parley_core::RuleFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Hard ceiling for the history window.
pub const MAX_HISTORY_LIMIT: usize = 500;

/// The root configuration structure.
///
/// Maps directly to `~/.parley/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Prompt assembly settings
    #[serde(default)]
    pub assembly: AssemblyConfig,

    /// System configuration store settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the message sequence places the admin system prompt and the
/// current time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssemblyLayout {
    /// Configuration rules (with the datetime rule) form their own system
    /// message; the admin system prompt travels with the admin rules.
    #[default]
    Layered,
    /// The merged admin system prompt plus the current time opens the
    /// sequence; the configuration rules omit the datetime rule.
    MergedSystemPrompt,
}

impl FromStr for AssemblyLayout {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "layered" => Ok(Self::Layered),
            "merged_system_prompt" | "merged" => Ok(Self::MergedSystemPrompt),
            other => Err(ConfigError::ValidationError(format!(
                "unknown assembly layout '{other}' (expected 'layered' or 'merged_system_prompt')"
            ))),
        }
    }
}

/// Where the persona rules (age, gender, personality, interests, sentiment)
/// end up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonaPlacement {
    /// Inside the configuration rules system message
    #[default]
    Embedded,
    /// In their own user message after the client behavior rules
    Separate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssemblyConfig {
    /// How many user/assistant history messages to replay
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    #[serde(default)]
    pub layout: AssemblyLayout,

    #[serde(default)]
    pub persona_placement: PersonaPlacement,

    /// Enumeration style for rule messages
    #[serde(default)]
    pub rule_format: RuleFormat,

    /// First line of the memory context message
    #[serde(default = "default_memory_preamble")]
    pub memory_preamble: String,
}

fn default_history_limit() -> usize {
    20
}
fn default_memory_preamble() -> String {
    "Relevant context from previous conversations:".into()
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            layout: AssemblyLayout::default(),
            persona_placement: PersonaPlacement::default(),
            rule_format: RuleFormat::default(),
            memory_preamble: default_memory_preamble(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// "none", "in_memory" or "file"
    #[serde(default = "default_store_backend")]
    pub backend: String,

    /// JSONL file for the "file" backend (defaults to `~/.parley/system_config.jsonl`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

fn default_store_backend() -> String {
    "file".into()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_store_backend(),
            path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON log lines instead of human-readable ones
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.parley/config.toml).
    ///
    /// Environment overrides:
    /// - `PARLEY_HISTORY_LIMIT`
    /// - `PARLEY_LAYOUT` (`layered` | `merged_system_prompt`)
    /// - `PARLEY_STORE_PATH`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from an environment-like lookup, then re-validate.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(limit) = lookup("PARLEY_HISTORY_LIMIT") {
            self.assembly.history_limit = limit.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!(
                    "PARLEY_HISTORY_LIMIT must be a positive integer, got '{limit}'"
                ))
            })?;
        }

        if let Some(layout) = lookup("PARLEY_LAYOUT") {
            self.assembly.layout = layout.parse()?;
        }

        if let Some(path) = lookup("PARLEY_STORE_PATH") {
            self.store.path = Some(PathBuf::from(path));
        }

        self.validate()
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".parley")
    }

    /// The store file, falling back to `~/.parley/system_config.jsonl`.
    pub fn store_path(&self) -> PathBuf {
        self.store
            .path
            .clone()
            .unwrap_or_else(|| Self::config_dir().join("system_config.jsonl"))
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.assembly.history_limit == 0 || self.assembly.history_limit > MAX_HISTORY_LIMIT {
            return Err(ConfigError::ValidationError(format!(
                "assembly.history_limit must be between 1 and {MAX_HISTORY_LIMIT}"
            )));
        }

        if self.assembly.memory_preamble.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "assembly.memory_preamble must not be empty".into(),
            ));
        }

        if !matches!(self.store.backend.as_str(), "none" | "in_memory" | "file") {
            return Err(ConfigError::ValidationError(format!(
                "store.backend must be 'none', 'in_memory' or 'file', got '{}'",
                self.store.backend
            )));
        }

        Ok(())
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
