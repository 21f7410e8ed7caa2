//! Conversation message types for DebatoBot.
//!
//! A [`ChatMessage`] is one turn of the conversation: either what the user
//! typed or what the bot answered. Each message carries the history that led
//! up to it, so a single message is enough to reconstruct the conversation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single turn in a conversation.
///
/// Messages are immutable once built. Earlier turns are shared through `Arc`,
/// so a follow-up turn never edits an existing history: it builds a new `Vec`
/// pointing at the same prior messages plus the message that triggered it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Text of the turn (user input or generated response).
    pub content: String,
    /// When this record was created.
    pub timestamp: DateTime<Utc>,
    /// Prior messages, oldest first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<Arc<ChatMessage>>,
}

impl ChatMessage {
    /// Create a message with no history, stamped with the current time.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            timestamp: Utc::now(),
            history: Vec::new(),
        }
    }

    /// Return this message with `history` replaced.
    pub fn with_history(mut self, history: Vec<Arc<ChatMessage>>) -> Self {
        self.history = history;
        self
    }

    /// History for the next turn: this message's history with `self` appended.
    ///
    /// The returned `Vec` is new; `self.history` is left untouched.
    pub fn appended_history(&self) -> Vec<Arc<ChatMessage>> {
        let mut history = Vec::with_capacity(self.history.len() + 1);
        history.extend(self.history.iter().cloned());
        history.push(Arc::new(self.clone()));
        history
    }

    /// The `content` of every message in the history, oldest first.
    pub fn history_contents(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(|m| m.content.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_empty_history() {
        let msg = ChatMessage::new("hello");
        assert_eq!(msg.content, "hello");
        assert!(msg.history.is_empty());
    }

    #[test]
    fn test_appended_history_leaves_original_untouched() {
        let first = Arc::new(ChatMessage::new("first"));
        let second = ChatMessage::new("second").with_history(vec![first.clone()]);

        let next = second.appended_history();

        assert_eq!(next.len(), 2);
        assert!(Arc::ptr_eq(&next[0], &first));
        assert_eq!(next[1].content, "second");
        assert_eq!(second.history.len(), 1);
    }

    #[test]
    fn test_appended_message_keeps_its_own_history() {
        let first = Arc::new(ChatMessage::new("first"));
        let second = ChatMessage::new("second").with_history(vec![first]);

        let next = second.appended_history();

        assert_eq!(next[1].history.len(), 1);
        assert_eq!(next[1].history[0].content, "first");
    }

    #[test]
    fn test_history_contents_in_order() {
        let msg = ChatMessage::new("now").with_history(vec![
            Arc::new(ChatMessage::new("one")),
            Arc::new(ChatMessage::new("two")),
        ]);
        let contents: Vec<&str> = msg.history_contents().collect();
        assert_eq!(contents, vec!["one", "two"]);
    }

    #[test]
    fn test_json_roundtrip_with_history() {
        let msg = ChatMessage::new("hi").with_history(vec![Arc::new(ChatMessage::new("earlier"))]);
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"history\""));

        let parsed: ChatMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, msg);
    }

    #[test]
    fn test_empty_history_skipped_in_json() {
        let msg = ChatMessage::new("hi");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(!json.contains("history"));
    }
}
