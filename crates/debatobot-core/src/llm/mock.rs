//! Scripted in-memory provider for unit tests.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex};

use debatobot_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, ProviderCapabilities, StopReason, Usage,
};

use super::provider::LlmProvider;

#[derive(Clone)]
pub(crate) enum MockOutcome {
    Reply(String),
    Fail(String),
}

pub(crate) struct MockProvider {
    capabilities: ProviderCapabilities,
    script: Mutex<VecDeque<MockOutcome>>,
    fallback: MockOutcome,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockProvider {
    /// Plays `script` in order, then repeats `fallback` forever.
    pub(crate) fn scripted(script: Vec<MockOutcome>, fallback: MockOutcome) -> Self {
        Self {
            capabilities: ProviderCapabilities {
                max_context_tokens: 128_000,
                max_output_tokens: 4_096,
            },
            script: Mutex::new(script.into()),
            fallback,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn replying(text: &str) -> Self {
        Self::scripted(Vec::new(), MockOutcome::Reply(text.to_string()))
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self::scripted(Vec::new(), MockOutcome::Fail(message.to_string()))
    }

    /// Every request the provider has received, shared with the test.
    pub(crate) fn requests(&self) -> Arc<Mutex<Vec<CompletionRequest>>> {
        Arc::clone(&self.requests)
    }
}

impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn capabilities(&self) -> &ProviderCapabilities {
        &self.capabilities
    }

    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl Future<Output = Result<CompletionResponse, LlmError>> + Send {
        self.requests.lock().unwrap().push(request.clone());
        let outcome = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        let model = request.model.clone();

        async move {
            match outcome {
                MockOutcome::Reply(content) => Ok(CompletionResponse {
                    id: "resp-mock".to_string(),
                    content,
                    model,
                    stop_reason: StopReason::EndTurn,
                    usage: Usage {
                        input_tokens: 10,
                        output_tokens: 20,
                    },
                }),
                MockOutcome::Fail(message) => Err(LlmError::Provider { message }),
            }
        }
    }
}
