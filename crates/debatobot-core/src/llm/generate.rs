//! Single-shot text generation over a [`BoxLlmProvider`].
//!
//! `generate_text` is the "system prompt + user prompt in, text out" call that
//! message handlers use. It hides request assembly and keeps each backend call
//! inside a GenAI tracing span.

use tracing::{Instrument, debug, info_span};

use debatobot_types::config::GenerationConfig;
use debatobot_types::llm::{CompletionRequest, LlmError, Message, MessageRole};

use super::box_provider::BoxLlmProvider;

/// Per-call parameters sent with every generation request.
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    /// Model to request. Empty lets the provider use its configured default.
    pub model: String,
    pub max_tokens: u32,
    pub temperature: Option<f64>,
}

impl GenerationOptions {
    pub fn new(model: impl Into<String>, config: &GenerationConfig) -> Self {
        Self {
            model: model.into(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }
}

/// Build the request sent for one generation call.
pub fn build_request(
    options: &GenerationOptions,
    system_prompt: &str,
    user_prompt: &str,
) -> CompletionRequest {
    CompletionRequest {
        model: options.model.clone(),
        messages: vec![Message {
            role: MessageRole::User,
            content: user_prompt.to_string(),
        }],
        system: Some(system_prompt.to_string()),
        max_tokens: options.max_tokens,
        temperature: options.temperature,
    }
}

/// Ask the provider for a completion and return its text.
///
/// `max_tokens` is clamped to the provider's output ceiling so an oversized
/// configuration is not rejected by the backend.
pub async fn generate_text(
    provider: &BoxLlmProvider,
    options: &GenerationOptions,
    system_prompt: &str,
    user_prompt: &str,
) -> Result<String, LlmError> {
    let mut request = build_request(options, system_prompt, user_prompt);

    let max_output = provider.capabilities().max_output_tokens;
    if request.max_tokens > max_output {
        debug!(
            requested = request.max_tokens,
            max_output_tokens = max_output,
            "Clamping max_tokens to provider limit"
        );
        request.max_tokens = max_output;
    }

    let span = info_span!(
        "gen_ai.generate",
        gen_ai.system = provider.name(),
        gen_ai.request.model = %request.model,
        gen_ai.request.max_tokens = request.max_tokens,
        gen_ai.request.temperature = ?request.temperature,
    );

    let response = provider.complete(&request).instrument(span).await?;

    debug!(
        model = %response.model,
        stop_reason = %response.stop_reason,
        input_tokens = response.usage.input_tokens,
        output_tokens = response.usage.output_tokens,
        "Generation complete"
    );

    Ok(response.content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::mock::MockProvider;

    fn options() -> GenerationOptions {
        GenerationOptions {
            model: "test-model".to_string(),
            max_tokens: 256,
            temperature: Some(0.5),
        }
    }

    #[test]
    fn test_options_from_config() {
        let config = GenerationConfig {
            max_tokens: 2048,
            temperature: None,
        };
        let opts = GenerationOptions::new("gpt-4o", &config);
        assert_eq!(opts.model, "gpt-4o");
        assert_eq!(opts.max_tokens, 2048);
        assert!(opts.temperature.is_none());
    }

    #[test]
    fn test_build_request_shape() {
        let request = build_request(&options(), "be brief", "make my case");
        assert_eq!(request.model, "test-model");
        assert_eq!(request.system.as_deref(), Some("be brief"));
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, MessageRole::User);
        assert_eq!(request.messages[0].content, "make my case");
        assert_eq!(request.max_tokens, 256);
        assert_eq!(request.temperature, Some(0.5));
    }

    #[tokio::test]
    async fn test_generate_text_returns_content() {
        let mock = MockProvider::replying("a strong argument");
        let requests = mock.requests();
        let provider = BoxLlmProvider::new(mock);

        let text = generate_text(&provider, &options(), "sys", "user").await.unwrap();

        assert_eq!(text, "a strong argument");
        let seen = requests.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].system.as_deref(), Some("sys"));
    }

    #[tokio::test]
    async fn test_generate_text_clamps_max_tokens_to_provider_limit() {
        let mock = MockProvider::replying("ok");
        let requests = mock.requests();
        let provider = BoxLlmProvider::new(mock);
        let limit = provider.capabilities().max_output_tokens;

        let mut oversized = options();
        oversized.max_tokens = limit + 5_000;
        generate_text(&provider, &oversized, "sys", "user").await.unwrap();
        generate_text(&provider, &options(), "sys", "user").await.unwrap();

        let seen = requests.lock().unwrap();
        assert_eq!(seen[0].max_tokens, limit);
        assert_eq!(seen[1].max_tokens, 256);
    }

    #[tokio::test]
    async fn test_generate_text_propagates_error() {
        let provider = BoxLlmProvider::new(MockProvider::failing("quota exceeded"));
        let err = generate_text(&provider, &options(), "sys", "user")
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Provider { .. }));
        assert!(err.to_string().contains("quota exceeded"));
    }
}
