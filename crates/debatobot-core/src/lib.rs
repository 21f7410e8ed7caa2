//! Conversation loop and message-handling logic for DebatoBot.
//!
//! This crate defines the "ports" the infrastructure layer implements
//! ([`llm::provider::LlmProvider`], [`chat::loop_runner::LineSource`]) and the
//! logic that drives a conversation over them. It depends only on
//! `debatobot-types` -- never on `debatobot-infra` or any network/terminal crate.

pub mod chat;
pub mod llm;
