//! LLM provider implementations.
//!
//! Contains the concrete [`LlmProvider`](debatobot_core::llm::provider::LlmProvider)
//! backends and a factory ([`create_provider`]) that constructs the right one
//! from a [`ProviderConfig`].

pub mod anthropic;
pub mod openai_compat;

use secrecy::SecretString;

use debatobot_core::llm::box_provider::BoxLlmProvider;
use debatobot_types::config::ProviderConfig;
use debatobot_types::llm::{LlmError, ProviderType};

use self::anthropic::AnthropicProvider;
use self::openai_compat::OpenAiCompatibleProvider;

/// Create a [`BoxLlmProvider`] from a [`ProviderConfig`].
///
/// Hosted backends need an API key; a missing key is reported as
/// [`LlmError::AuthenticationFailed`] before any request is made. An
/// OpenAI-compatible provider with an explicit `base_url` (a local or
/// self-hosted server) may run without one and sends an empty key.
pub fn create_provider(
    config: &ProviderConfig,
    api_key: Option<SecretString>,
) -> Result<BoxLlmProvider, LlmError> {
    match config.provider_type {
        ProviderType::Anthropic => {
            let key = api_key.ok_or(LlmError::AuthenticationFailed)?;
            let mut provider = AnthropicProvider::new(key, config.model.clone())?;
            if let Some(base_url) = config.base_url.as_deref() {
                provider = provider.with_base_url(base_url);
            }
            Ok(BoxLlmProvider::new(provider))
        }
        ProviderType::OpenAiCompatible => {
            if let Some(base_url) = config.base_url.as_deref() {
                let key = api_key.unwrap_or_else(|| SecretString::from(String::new()));
                return Ok(BoxLlmProvider::new(OpenAiCompatibleProvider::new(
                    openai_compat::config::custom(&config.name, base_url, key, &config.model),
                )));
            }

            let key = api_key.ok_or(LlmError::AuthenticationFailed)?;
            let provider = match config.name.as_str() {
                "gemini" => OpenAiCompatibleProvider::gemini(key, &config.model),
                "mistral" => OpenAiCompatibleProvider::mistral(key, &config.model),
                "openai" => OpenAiCompatibleProvider::openai(key, &config.model),
                other => {
                    tracing::debug!(
                        provider = other,
                        "Unknown provider name without base_url, using OpenAI endpoint"
                    );
                    OpenAiCompatibleProvider::openai(key, &config.model)
                }
            };
            Ok(BoxLlmProvider::new(provider))
        }
    }
}
