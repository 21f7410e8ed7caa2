//! Configuration types for DebatoBot.
//!
//! `AppConfig` represents the `config.toml` in the data directory. Every
//! section and field has a default, so an empty or missing file yields a
//! working OpenAI-backed setup.

use serde::{Deserialize, Serialize};

use crate::llm::ProviderType;

/// Default cap (in characters) on the flattened history sent to the backend.
pub const DEFAULT_HISTORY_MAX_CHARS: usize = 4_000;

/// Top-level configuration.
///
/// Loaded from `~/.debatobot/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub prompt: PromptConfig,
}

/// Which LLM backend to talk to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Human-readable name (e.g., "openai", "gemini", "anthropic").
    #[serde(default = "default_provider_name")]
    pub name: String,
    /// Backend protocol for this provider.
    #[serde(rename = "type", default = "default_provider_type")]
    pub provider_type: ProviderType,
    /// Model identifier to use.
    #[serde(default = "default_model")]
    pub model: String,
    /// Override the default base URL for the provider.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Environment variable holding the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
}

fn default_provider_name() -> String {
    "openai".to_string()
}

fn default_provider_type() -> ProviderType {
    ProviderType::OpenAiCompatible
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: default_provider_name(),
            provider_type: default_provider_type(),
            model: default_model(),
            base_url: None,
            api_key_env: None,
        }
    }
}

impl ProviderConfig {
    /// Name of the environment variable holding the API key.
    ///
    /// Falls back to `{NAME}_API_KEY` (e.g. `OPENAI_API_KEY`) when not set.
    pub fn api_key_env(&self) -> String {
        match &self.api_key_env {
            Some(var) => var.clone(),
            None => format!("{}_API_KEY", self.name.to_uppercase().replace('-', "_")),
        }
    }
}

/// Sampling parameters for each backend call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default)]
    pub temperature: Option<f64>,
}

fn default_max_tokens() -> u32 {
    1024
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            temperature: None,
        }
    }
}

/// Conversation behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Maximum characters of joined history passed to the backend.
    #[serde(default = "default_history_max_chars")]
    pub history_max_chars: usize,
    /// Feed each turn's history into the next turn.
    #[serde(default = "default_thread_history")]
    pub thread_history: bool,
}

fn default_history_max_chars() -> usize {
    DEFAULT_HISTORY_MAX_CHARS
}

fn default_thread_history() -> bool {
    true
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            history_max_chars: default_history_max_chars(),
            thread_history: default_thread_history(),
        }
    }
}

/// Prompt overrides. `None` keeps the built-in DebatoBot prompts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptConfig {
    #[serde(default)]
    pub system: Option<String>,
    /// User prompt template with `{message}` and `{history}` placeholders.
    #[serde(default)]
    pub user_template: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default_values() {
        let config = AppConfig::default();
        assert_eq!(config.provider.name, "openai");
        assert_eq!(config.provider.provider_type, ProviderType::OpenAiCompatible);
        assert_eq!(config.provider.model, "gpt-4o");
        assert_eq!(config.generation.max_tokens, 1024);
        assert_eq!(config.chat.history_max_chars, DEFAULT_HISTORY_MAX_CHARS);
        assert!(config.chat.thread_history);
        assert!(config.prompt.system.is_none());
    }

    #[test]
    fn test_app_config_deserialize_empty() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.provider.model, "gpt-4o");
        assert_eq!(config.chat.history_max_chars, DEFAULT_HISTORY_MAX_CHARS);
    }

    #[test]
    fn test_app_config_deserialize_with_values() {
        let toml_str = r#"
[provider]
name = "anthropic"
type = "anthropic"
model = "claude-sonnet-4-20250514"

[generation]
max_tokens = 2048
temperature = 0.2

[chat]
history_max_chars = 500
thread_history = false

[prompt]
user_template = "Q: {message}"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.provider.provider_type, ProviderType::Anthropic);
        assert_eq!(config.provider.model, "claude-sonnet-4-20250514");
        assert_eq!(config.generation.max_tokens, 2048);
        assert_eq!(config.generation.temperature, Some(0.2));
        assert_eq!(config.chat.history_max_chars, 500);
        assert!(!config.chat.thread_history);
        assert_eq!(config.prompt.user_template.as_deref(), Some("Q: {message}"));
    }

    #[test]
    fn test_partial_section_keeps_field_defaults() {
        let config: AppConfig = toml::from_str("[provider]\nmodel = \"gpt-4o-mini\"\n").unwrap();
        assert_eq!(config.provider.name, "openai");
        assert_eq!(config.provider.model, "gpt-4o-mini");
    }

    #[test]
    fn test_api_key_env_inferred_from_name() {
        let mut provider = ProviderConfig::default();
        assert_eq!(provider.api_key_env(), "OPENAI_API_KEY");

        provider.name = "my-proxy".to_string();
        assert_eq!(provider.api_key_env(), "MY_PROXY_API_KEY");

        provider.api_key_env = Some("CUSTOM_KEY".to_string());
        assert_eq!(provider.api_key_env(), "CUSTOM_KEY");
    }
}
