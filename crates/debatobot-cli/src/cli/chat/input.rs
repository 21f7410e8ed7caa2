//! Async readline input for the conversation loop.
//!
//! Wraps `rustyline_async::Readline` as a [`LineSource`], mapping Ctrl+D to
//! end of input and Ctrl+C to an interrupt.

use rustyline_async::{Readline, ReadlineError, ReadlineEvent, SharedWriter};

use debatobot_core::chat::loop_runner::{InputEvent, LineSource};

/// Terminal line source backed by rustyline_async.
pub struct ChatInput {
    rl: Option<Readline>,
}

impl ChatInput {
    /// Create an input handler showing `prompt` before each line.
    ///
    /// Returns the handler and a `SharedWriter` for output that must not
    /// clobber the prompt line.
    pub fn new(prompt: String) -> Result<(Self, SharedWriter), ReadlineError> {
        let (rl, stdout) = Readline::new(prompt)?;
        Ok((Self { rl: Some(rl) }, stdout))
    }
}

impl LineSource for ChatInput {
    async fn read_line(&mut self) -> InputEvent {
        let Some(rl) = self.rl.as_mut() else {
            return InputEvent::Eof;
        };

        match rl.readline().await {
            Ok(ReadlineEvent::Line(line)) => InputEvent::Line(line),
            Ok(ReadlineEvent::Eof) => InputEvent::Eof,
            Ok(ReadlineEvent::Interrupted) => InputEvent::Interrupted,
            Err(e) => {
                tracing::warn!(error = %e, "Readline failed, ending input");
                InputEvent::Eof
            }
        }
    }

    /// Flush pending output and restore the terminal.
    fn close(&mut self) {
        if let Some(mut rl) = self.rl.take() {
            let _ = rl.flush();
        }
    }
}
