//! CLI argument definitions for the `debatobot` binary.
//!
//! Every flag is an override on top of `config.toml`; with no flags the
//! configured (or default) provider is used.

pub mod chat;

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use debatobot_types::config::AppConfig;
use debatobot_types::llm::ProviderType;

/// Argue with an LLM from your terminal.
#[derive(Parser, Debug)]
#[command(name = "debatobot", version, about, long_about = None)]
pub struct Cli {
    /// Provider name: openai, gemini, mistral, anthropic, or any name together with --base-url.
    #[arg(long, env = "DEBATOBOT_PROVIDER")]
    pub provider: Option<String>,

    /// Model identifier (e.g. gpt-4o, claude-sonnet-4-20250514).
    #[arg(long, env = "DEBATOBOT_MODEL")]
    pub model: Option<String>,

    /// Base URL of an OpenAI-compatible or Anthropic endpoint.
    #[arg(long, env = "DEBATOBOT_BASE_URL")]
    pub base_url: Option<String>,

    /// Maximum characters of conversation history sent with each turn.
    #[arg(long)]
    pub history_max_chars: Option<usize>,

    /// Treat every turn independently instead of carrying history forward.
    #[arg(long)]
    pub no_history: bool,

    /// Path to config.toml (defaults to the data directory).
    #[arg(long, env = "DEBATOBOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Export tracing spans via OpenTelemetry (stdout exporter).
    #[arg(long)]
    pub otel: bool,

    /// Suppress all log output except errors.
    #[arg(long)]
    pub quiet: bool,

    /// Detailed log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Apply command-line overrides to the loaded configuration.
///
/// Switching provider resets the endpoint and key variable so they are derived
/// from the new provider unless given explicitly.
pub fn apply_overrides(config: &mut AppConfig, cli: &Cli) {
    if let Some(name) = &cli.provider {
        if !name.eq_ignore_ascii_case(&config.provider.name) {
            config.provider.base_url = None;
            config.provider.api_key_env = None;
        }
        config.provider.name = name.to_lowercase();
        config.provider.provider_type = name
            .parse::<ProviderType>()
            .unwrap_or(ProviderType::OpenAiCompatible);
    }
    if let Some(model) = &cli.model {
        config.provider.model = model.clone();
    }
    if let Some(base_url) = &cli.base_url {
        config.provider.base_url = Some(base_url.clone());
    }
    if let Some(max_chars) = cli.history_max_chars {
        config.chat.history_max_chars = max_chars;
    }
    if cli.no_history {
        config.chat.thread_history = false;
    }
}
