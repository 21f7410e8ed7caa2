//! Conversation handling for DebatoBot.
//!
//! - `handler`: the per-turn [`handler::MessageHandler`] contract and the
//!   LLM-backed [`handler::CompletionHandler`]
//! - `history`: history flattening/truncation and the history-threading wrapper
//! - `prompt`: system/user prompt construction
//! - `session`: session lifecycle and turn counters
//! - `loop_runner`: the read/process/display [`loop_runner::ConversationLoop`]

pub mod handler;
pub mod history;
pub mod loop_runner;
pub mod prompt;
pub mod session;
