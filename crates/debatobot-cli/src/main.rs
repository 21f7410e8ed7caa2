//! DebatoBot terminal entry point.
//!
//! Binary name: `debatobot`
//!
//! Loads configuration, builds the LLM-backed message handler and runs one
//! conversation loop on the terminal. The process exits when the loop ends.

mod cli;

use anyhow::Context;
use clap::Parser;
use rustyline_async::SharedWriter;

use debatobot_core::chat::handler::{CompletionHandler, MessageHandler};
use debatobot_core::chat::history::HistoryThreading;
use debatobot_core::chat::loop_runner::ConversationLoop;
use debatobot_core::chat::prompt::DebatePrompt;
use debatobot_core::chat::session::SessionSummary;
use debatobot_core::llm::generate::GenerationOptions;
use debatobot_infra::config::{default_config_path, load_config, resolve_api_key};
use debatobot_infra::llm::create_provider;
use debatobot_observe::tracing_setup::{
    LogSink, filter_for_verbosity, init_tracing, shutdown_tracing,
};

use cli::Cli;
use cli::chat::banner::print_welcome_banner;
use cli::chat::input::ChatInput;

const INPUT_PROMPT: &str = "You: ";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_sink = init_tracing(filter_for_verbosity(cli.verbose, cli.quiet), cli.otel)
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    let result = run(cli, &log_sink).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli, log_sink: &LogSink) -> anyhow::Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let mut config = load_config(&config_path).await;
    cli::apply_overrides(&mut config, &cli);

    let key_env = config.provider.api_key_env();
    let provider = create_provider(&config.provider, resolve_api_key(&config.provider))
        .with_context(|| {
            format!(
                "Failed to set up provider '{}' (is {key_env} set?)",
                config.provider.name
            )
        })?;

    tracing::info!(
        provider = provider.name(),
        model = %config.provider.model,
        thread_history = config.chat.thread_history,
        "Provider ready"
    );

    let handler = CompletionHandler::new(
        provider,
        GenerationOptions::new(config.provider.model.clone(), &config.generation),
        DebatePrompt::from_config(&config.prompt),
        config.chat.history_max_chars,
    );

    print_welcome_banner(
        handler.provider_name(),
        &config.provider.model,
        config.chat.thread_history,
    );

    let (input, output) =
        ChatInput::new(INPUT_PROMPT.to_string()).context("Failed to initialize terminal input")?;

    // The line editor owns the terminal in raw mode; log through it until it is closed.
    log_sink.redirect(output.clone());
    let summary = if config.chat.thread_history {
        run_session(HistoryThreading::new(handler), input, output).await
    } else {
        run_session(handler, input, output).await
    };
    log_sink.reset();
    let summary = summary?;

    tracing::debug!(
        session_id = %summary.id,
        completed_turns = summary.completed_turns,
        failed_turns = summary.failed_turns,
        duration_ms = ?summary.duration_ms,
        "Exiting"
    );

    Ok(())
}

async fn run_session<H: MessageHandler>(
    handler: H,
    input: ChatInput,
    output: SharedWriter,
) -> anyhow::Result<SessionSummary> {
    let mut chat = ConversationLoop::new(handler, input, output);
    let summary = chat.start().await.context("Chat session failed")?;
    Ok(summary)
}
