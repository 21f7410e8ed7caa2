//! Per-turn message handling.
//!
//! A [`MessageHandler`] maps one inbound [`ChatMessage`] to one outbound
//! message. [`CompletionHandler`] is the LLM-backed implementation: it turns
//! the message and its history into prompts, calls the backend, and answers
//! with a fixed notice when the backend fails.

use std::future::Future;

use chrono::Utc;
use tracing::error;

use debatobot_types::error::HandlerError;
use debatobot_types::message::ChatMessage;

use crate::llm::box_provider::BoxLlmProvider;
use crate::llm::generate::{GenerationOptions, generate_text};

use super::history::flatten_history;
use super::prompt::{DebatePrompt, PromptTemplate};

/// Content of the response returned when the backend call fails.
pub const GENERATION_FAILURE_NOTICE: &str = "An error occurred while generating the response.";

/// Maps one inbound message to one outbound message.
///
/// Turns are handled one at a time, so implementations may keep state
/// between calls through `&mut self`.
pub trait MessageHandler: Send {
    /// Produce the response for `message`.
    ///
    /// An `Err` means the handler could not build any response at all; the
    /// conversation loop logs it and skips the turn.
    fn handle(
        &mut self,
        message: ChatMessage,
    ) -> impl Future<Output = Result<ChatMessage, HandlerError>> + Send;
}

/// Handler that asks an LLM provider for each response.
pub struct CompletionHandler<P = DebatePrompt> {
    provider: BoxLlmProvider,
    options: GenerationOptions,
    prompt: P,
    history_max_chars: usize,
}

impl<P: PromptTemplate> CompletionHandler<P> {
    /// `history_max_chars` caps the joined history text included in each request.
    pub fn new(
        provider: BoxLlmProvider,
        options: GenerationOptions,
        prompt: P,
        history_max_chars: usize,
    ) -> Self {
        Self {
            provider,
            options,
            prompt,
            history_max_chars,
        }
    }

    /// Name of the backing provider.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }
}

impl<P: PromptTemplate> MessageHandler for CompletionHandler<P> {
    async fn handle(&mut self, message: ChatMessage) -> Result<ChatMessage, HandlerError> {
        let timestamp = Utc::now();

        let history_text = flatten_history(&message, self.history_max_chars);
        let user_prompt = self.prompt.user_prompt(&message.content, &history_text)?;

        let content = match generate_text(
            &self.provider,
            &self.options,
            self.prompt.system_prompt(),
            &user_prompt,
        )
        .await
        {
            Ok(text) => text,
            Err(e) => {
                error!(provider = self.provider.name(), error = %e, "Error generating response");
                GENERATION_FAILURE_NOTICE.to_string()
            }
        };

        Ok(ChatMessage {
            content,
            timestamp,
            history: message.appended_history(),
        })
    }
}
