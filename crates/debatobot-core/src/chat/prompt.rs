//! Prompt construction for the debate assistant.
//!
//! The system prompt is fixed per session. The user prompt is rendered from a
//! template with `{message}` and `{history}` placeholders, substituted in a
//! single pass so text inside the user's message is never re-expanded.

use debatobot_types::config::PromptConfig;
use debatobot_types::error::HandlerError;

const MESSAGE_PLACEHOLDER: &str = "{message}";
const HISTORY_PLACEHOLDER: &str = "{history}";

const DEFAULT_SYSTEM_PROMPT: &str = "You are DebatoBot, an assistant that helps users build and sharpen \
arguments for debates.
Give clear, concise and well-structured arguments grounded in what the user says.
Do not share personal opinions or join the debate yourself; help the user make their own case.";

const DEFAULT_USER_TEMPLATE: &str = "User: '{message}'
Chat History: '{history}'
DebatoBot: Reply with a clear, concise argument based on the user's input.";

/// Supplies the two prompt strings for a generation call.
pub trait PromptTemplate: Send + Sync {
    /// The system prompt sent with every request.
    fn system_prompt(&self) -> &str;

    /// Render the user prompt for `message` given the already-truncated history text.
    fn user_prompt(&self, message: &str, history: &str) -> Result<String, HandlerError>;
}

/// The DebatoBot prompts, optionally overridden from config.
#[derive(Debug, Clone)]
pub struct DebatePrompt {
    system: String,
    user_template: String,
}

impl DebatePrompt {
    pub fn new(system: impl Into<String>, user_template: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user_template: user_template.into(),
        }
    }

    /// Built-in prompts with any `[prompt]` overrides from config applied.
    pub fn from_config(config: &PromptConfig) -> Self {
        Self::new(
            config.system.as_deref().unwrap_or(DEFAULT_SYSTEM_PROMPT),
            config
                .user_template
                .as_deref()
                .unwrap_or(DEFAULT_USER_TEMPLATE),
        )
    }
}

impl Default for DebatePrompt {
    fn default() -> Self {
        Self::new(DEFAULT_SYSTEM_PROMPT, DEFAULT_USER_TEMPLATE)
    }
}

impl PromptTemplate for DebatePrompt {
    fn system_prompt(&self) -> &str {
        &self.system
    }

    fn user_prompt(&self, message: &str, history: &str) -> Result<String, HandlerError> {
        if !self.user_template.contains(MESSAGE_PLACEHOLDER) {
            return Err(HandlerError::Prompt(format!(
                "user template has no {MESSAGE_PLACEHOLDER} placeholder"
            )));
        }
        Ok(render(&self.user_template, message, history))
    }
}

fn render(template: &str, message: &str, history: &str) -> String {
    let mut out = String::with_capacity(template.len() + message.len() + history.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        if let Some(after) = tail.strip_prefix(MESSAGE_PLACEHOLDER) {
            out.push_str(message);
            rest = after;
        } else if let Some(after) = tail.strip_prefix(HISTORY_PLACEHOLDER) {
            out.push_str(history);
            rest = after;
        } else {
            out.push('{');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts_mention_bot() {
        let prompt = DebatePrompt::default();
        assert!(prompt.system_prompt().contains("DebatoBot"));
        let user = prompt.user_prompt("school uniforms", "").unwrap();
        assert!(user.contains("User: 'school uniforms'"));
        assert!(user.contains("Chat History: ''"));
    }

    #[test]
    fn test_user_prompt_substitutes_history() {
        let prompt = DebatePrompt::new("sys", "{history} -> {message}");
        let user = prompt.user_prompt("now", "before").unwrap();
        assert_eq!(user, "before -> now");
    }

    #[test]
    fn test_placeholders_in_message_not_expanded() {
        let prompt = DebatePrompt::new("sys", "[{message}] [{history}]");
        let user = prompt.user_prompt("say {history}", "H").unwrap();
        assert_eq!(user, "[say {history}] [H]");
    }

    #[test]
    fn test_unknown_braces_kept() {
        let prompt = DebatePrompt::new("sys", "{json: 1} {message}");
        assert_eq!(prompt.user_prompt("x", "").unwrap(), "{json: 1} x");
    }

    #[test]
    fn test_missing_message_placeholder_is_error() {
        let prompt = DebatePrompt::new("sys", "History only: {history}");
        let err = prompt.user_prompt("hello", "").unwrap_err();
        assert!(matches!(err, HandlerError::Prompt(_)));
    }

    #[test]
    fn test_from_config_overrides() {
        let config = PromptConfig {
            system: Some("custom system".to_string()),
            user_template: None,
        };
        let prompt = DebatePrompt::from_config(&config);
        assert_eq!(prompt.system_prompt(), "custom system");
        assert!(prompt.user_prompt("m", "").unwrap().starts_with("User: 'm'"));
    }
}
