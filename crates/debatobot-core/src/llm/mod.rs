//! LLM provider abstractions for DebatoBot.
//!
//! - `LlmProvider`: RPITIT trait for concrete provider implementations
//! - `BoxLlmProvider`: Object-safe wrapper for dynamic dispatch
//! - `generate_text`: the system-prompt + user-prompt call the handlers use

pub mod box_provider;
pub mod generate;
pub mod provider;

#[cfg(test)]
pub(crate) mod mock;
