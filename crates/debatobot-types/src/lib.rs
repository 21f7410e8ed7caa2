//! Shared domain types for DebatoBot.
//!
//! This crate contains the types passed between the conversation loop, the
//! message handlers and the LLM providers: chat messages with their history,
//! provider request/response shapes, configuration and error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod config;
pub mod error;
pub mod llm;
pub mod message;
