//! Anthropic Claude LLM provider implementation.
//!
//! [`AnthropicProvider`] implements
//! [`LlmProvider`](debatobot_core::llm::provider::LlmProvider) against the
//! Anthropic Messages API using plain `reqwest`.

pub mod client;
pub mod types;

pub use client::AnthropicProvider;
