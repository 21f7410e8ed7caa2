//! Infrastructure layer for DebatoBot.
//!
//! Concrete implementations of the provider trait defined in `debatobot-core`
//! (OpenAI-compatible and Anthropic backends) plus configuration loading from
//! the data directory and API-key resolution from the environment.

pub mod config;
pub mod llm;
