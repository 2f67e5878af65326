//! Parley CLI — the main entry point.
//!
//! Commands:
//! - `assemble` — Build the message list for a chat turn described in a JSON file
//! - `rules`    — Show the configuration rules generated for an agent
//! - `resolve`  — Show the admin prompt and behavior rules an agent type resolves to
//! - `config`   — Show, validate or locate the configuration

use clap::{Parser, Subcommand};
use parley_config::AppConfig;
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "parley",
    about = "Parley: inspect and debug assembled chat prompts",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of ~/.parley/config.toml
    #[arg(short, long, global = true, env = "PARLEY_CONFIG")]
    config: Option<PathBuf>,

    /// Read admin prompts and rules from this JSONL store file
    #[arg(short, long, global = true)]
    store: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble the prompt for a chat turn
    Assemble {
        /// JSON file with `agent`, `history`, `user_message` and `relevant_memories`
        #[arg(short, long)]
        request: PathBuf,

        /// Print per-section statistics along with the messages
        #[arg(long)]
        report: bool,
    },

    /// Show the configuration rules generated for an agent
    Rules {
        /// JSON file with the agent configuration
        #[arg(short, long)]
        agent: PathBuf,

        /// Timestamp to use instead of the current time (RFC 3339)
        #[arg(long)]
        now: Option<String>,
    },

    /// Show the admin system prompt and behavior rules for an agent type
    Resolve {
        /// Agent type; omit for the global default
        #[arg(short = 't', long)]
        agent_type: Option<String>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Validate the configuration
    Validate,
    /// Print the default configuration file path
    Path,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            let mut config = AppConfig::load_from(path)?;
            config.apply_overrides(|name| std::env::var(name).ok())?;
            config
        }
        None => AppConfig::load()?,
    };
    if let Some(path) = cli.store {
        config.store.backend = "file".into();
        config.store.path = Some(path);
    }

    // Initialize tracing
    let filter = if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if config.logging.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    match cli.command {
        Commands::Assemble { request, report } => {
            commands::assemble::run(&config, &request, report).await?
        }
        Commands::Rules { agent, now } => commands::rules::run(&agent, now.as_deref())?,
        Commands::Resolve { agent_type } => {
            commands::resolve::run(&config, agent_type.as_deref()).await?
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_cmd::show(&config)?,
            ConfigAction::Validate => commands::config_cmd::validate(&config)?,
            ConfigAction::Path => commands::config_cmd::path()?,
        },
    }

    Ok(())
}
