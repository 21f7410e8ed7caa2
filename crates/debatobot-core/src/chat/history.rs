//! Conversation history helpers.
//!
//! `flatten_history` turns a message's history into the bounded text block
//! sent to the backend. `HistoryThreading` is the handler wrapper that feeds
//! each turn's history into the next inbound message, since the loop itself
//! builds every message with an empty history.

use std::sync::Arc;

use tracing::debug;

use debatobot_types::error::HandlerError;
use debatobot_types::message::ChatMessage;

use super::handler::MessageHandler;

/// Join the `content` of every prior message with `\n`, keeping at most the
/// first `max_chars` characters.
///
/// The cap keeps the start of the joined text; it is a request-size bound, not
/// a window over the most recent turns.
pub fn flatten_history(message: &ChatMessage, max_chars: usize) -> String {
    let joined = message.history_contents().collect::<Vec<_>>().join("\n");
    truncate_chars(joined, max_chars)
}

/// Truncate `text` to at most `max_chars` Unicode scalar values.
pub fn truncate_chars(mut text: String, max_chars: usize) -> String {
    if let Some((byte_idx, _)) = text.char_indices().nth(max_chars) {
        text.truncate(byte_idx);
    }
    text
}

/// Threads history from one turn into the next.
///
/// Remembers the history of the last response and attaches it to any inbound
/// message that arrives without history of its own. A failed turn leaves the
/// remembered history unchanged.
pub struct HistoryThreading<H> {
    inner: H,
    history: Vec<Arc<ChatMessage>>,
}

impl<H> HistoryThreading<H> {
    pub fn new(inner: H) -> Self {
        Self {
            inner,
            history: Vec::new(),
        }
    }

    /// History that will be attached to the next inbound message.
    pub fn history(&self) -> &[Arc<ChatMessage>] {
        &self.history
    }
}

impl<H: MessageHandler> MessageHandler for HistoryThreading<H> {
    async fn handle(&mut self, message: ChatMessage) -> Result<ChatMessage, HandlerError> {
        let inbound = if message.history.is_empty() {
            message.with_history(self.history.clone())
        } else {
            message
        };

        let response = self.inner.handle(inbound).await?;
        self.history = response.history.clone();
        debug!(turns = self.history.len(), "History threaded");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Echoes content back and appends to history, recording every inbound message.
    struct RecordingHandler {
        seen: Vec<ChatMessage>,
        fail_next: bool,
    }

    impl RecordingHandler {
        fn new() -> Self {
            Self {
                seen: Vec::new(),
                fail_next: false,
            }
        }
    }

    impl MessageHandler for RecordingHandler {
        async fn handle(&mut self, message: ChatMessage) -> Result<ChatMessage, HandlerError> {
            self.seen.push(message.clone());
            if std::mem::take(&mut self.fail_next) {
                return Err(HandlerError::Prompt("boom".to_string()));
            }
            Ok(ChatMessage::new(format!("re: {}", message.content))
                .with_history(message.appended_history()))
        }
    }

    fn with_history(contents: &[&str]) -> ChatMessage {
        ChatMessage::new("current").with_history(
            contents
                .iter()
                .map(|c| Arc::new(ChatMessage::new(*c)))
                .collect(),
        )
    }

    #[test]
    fn test_flatten_empty_history() {
        assert_eq!(flatten_history(&ChatMessage::new("x"), 100), "");
    }

    #[test]
    fn test_flatten_joins_with_newline() {
        let msg = with_history(&["one", "two", "three"]);
        assert_eq!(flatten_history(&msg, 100), "one\ntwo\nthree");
    }

    #[test]
    fn test_flatten_exactly_at_cap_unchanged() {
        // "abc\nde" is 6 characters.
        let msg = with_history(&["abc", "de"]);
        assert_eq!(flatten_history(&msg, 6), "abc\nde");
    }

    #[test]
    fn test_flatten_one_over_cap_keeps_prefix() {
        // "abc\ndef" is 7 characters; cap 6 keeps the first 6.
        let msg = with_history(&["abc", "def"]);
        let flat = flatten_history(&msg, 6);
        assert_eq!(flat, "abc\nde");
        assert_eq!(flat.chars().count(), 6);
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let text = "héllo wörld".to_string();
        assert_eq!(truncate_chars(text, 4), "héll");
    }

    #[test]
    fn test_truncate_zero_cap() {
        assert_eq!(truncate_chars("abc".to_string(), 0), "");
    }

    #[tokio::test]
    async fn test_second_turn_receives_first_message() {
        let mut threading = HistoryThreading::new(RecordingHandler::new());

        let m1 = ChatMessage::new("m1");
        threading.handle(m1.clone()).await.unwrap();
        threading.handle(ChatMessage::new("m2")).await.unwrap();

        let seen = &threading.inner.seen;
        assert!(seen[0].history.is_empty());
        assert_eq!(seen[1].history.len(), 1);
        assert_eq!(*seen[1].history[0], m1);
    }

    #[tokio::test]
    async fn test_history_grows_one_per_turn() {
        let mut threading = HistoryThreading::new(RecordingHandler::new());
        for (i, text) in ["a", "b", "c"].iter().enumerate() {
            let response = threading.handle(ChatMessage::new(*text)).await.unwrap();
            assert_eq!(response.history.len(), i + 1);
        }
        let contents: Vec<&str> = threading.history().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_earlier_history_not_mutated() {
        let mut threading = HistoryThreading::new(RecordingHandler::new());
        let first = threading.handle(ChatMessage::new("a")).await.unwrap();
        threading.handle(ChatMessage::new("b")).await.unwrap();

        assert_eq!(first.history.len(), 1);
        assert_eq!(first.history[0].content, "a");
    }

    #[tokio::test]
    async fn test_failed_turn_keeps_previous_history() {
        let mut threading = HistoryThreading::new(RecordingHandler::new());
        threading.handle(ChatMessage::new("a")).await.unwrap();

        threading.inner.fail_next = true;
        assert!(threading.handle(ChatMessage::new("b")).await.is_err());
        assert_eq!(threading.history().len(), 1);

        threading.handle(ChatMessage::new("c")).await.unwrap();
        let seen = threading.inner.seen.last().unwrap();
        assert_eq!(seen.history.len(), 1);
        assert_eq!(seen.history[0].content, "a");
    }

    #[tokio::test]
    async fn test_explicit_history_is_respected() {
        let mut threading = HistoryThreading::new(RecordingHandler::new());
        threading.handle(ChatMessage::new("a")).await.unwrap();

        let explicit = with_history(&["x", "y"]);
        threading.handle(explicit).await.unwrap();

        let seen = threading.inner.seen.last().unwrap();
        let contents: Vec<&str> = seen.history_contents().collect();
        assert_eq!(contents, vec!["x", "y"]);
    }
}
