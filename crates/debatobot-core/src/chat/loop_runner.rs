//! The interactive read/process/display loop.
//!
//! [`ConversationLoop`] owns a [`LineSource`] for the duration of a session,
//! hands each non-keyword line to a [`MessageHandler`] and writes the response.
//! A failing turn is logged and skipped; only a termination keyword or the end
//! of the input stream ends the session.
//!
//! Cleanup (session-ended notice + releasing the input) runs exactly once,
//! either at the end of [`ConversationLoop::start`] or from `Drop` if the loop
//! body unwinds.

use std::any::Any;
use std::future::Future;
use std::io::{self, Write};
use std::panic::AssertUnwindSafe;

use futures_util::FutureExt;
use thiserror::Error;
use tracing::{Instrument, debug, error, info, info_span};

use debatobot_types::error::HandlerError;
use debatobot_types::message::ChatMessage;

use super::handler::MessageHandler;
use super::session::{SessionManager, SessionState, SessionSummary};

/// Inputs (compared case-insensitively after trimming) that end the session.
pub const TERMINATION_KEYWORDS: [&str; 3] = ["q", "quit", "exit"];

const START_NOTICE: &str = "Chat started. Type \"q\" or \"Q\" to quit.";
const INTERRUPT_HINT: &str = "Type \"q\" or press Ctrl+D to quit.";
const SESSION_ENDED_NOTICE: &str = "Chat ended.";
const RESPONSE_PREFIX: &str = "Bot:";

/// Events produced by a line source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// User submitted a line (untrimmed).
    Line(String),
    /// The input stream is closed (Ctrl+D).
    Eof,
    /// Interrupt signal (Ctrl+C).
    Interrupted,
}

/// Source of interactive input lines.
pub trait LineSource {
    /// Wait for the next line or stream event.
    fn read_line(&mut self) -> impl Future<Output = InputEvent>;

    /// Release the underlying input resource.
    fn close(&mut self);
}

/// Errors that end a session abnormally.
#[derive(Debug, Error)]
pub enum LoopError {
    #[error("conversation loop already started (state: {0})")]
    AlreadyStarted(SessionState),

    #[error("failed to write to output: {0}")]
    Output(#[from] io::Error),
}

/// Whether `input` is one of [`TERMINATION_KEYWORDS`], ignoring case.
pub fn is_termination_keyword(input: &str) -> bool {
    TERMINATION_KEYWORDS
        .iter()
        .any(|keyword| input.eq_ignore_ascii_case(keyword))
}

/// Drives one interactive session from start to termination.
///
/// Each line is wrapped in a fresh [`ChatMessage`] with no history; compose the
/// handler with [`super::history::HistoryThreading`] to carry history between
/// turns.
pub struct ConversationLoop<H, S: LineSource, W: Write> {
    handler: H,
    input: Option<S>,
    output: W,
    session: SessionManager,
}

impl<H: MessageHandler, S: LineSource, W: Write> ConversationLoop<H, S, W> {
    pub fn new(handler: H, input: S, output: W) -> Self {
        Self {
            handler,
            input: Some(input),
            output,
            session: SessionManager::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Run the session until a termination keyword or end of input.
    ///
    /// Can be called once per instance; later calls return
    /// [`LoopError::AlreadyStarted`].
    pub async fn start(&mut self) -> Result<SessionSummary, LoopError> {
        if !self.session.mark_running() {
            return Err(LoopError::AlreadyStarted(self.session.state()));
        }

        let span = info_span!("chat_session", session_id = %self.session.id());
        info!(parent: &span, "Chat session started");

        let result = self.run_turns().instrument(span).await;
        self.cleanup();
        result.map(|()| self.session.summary())
    }

    async fn run_turns(&mut self) -> Result<(), LoopError> {
        writeln!(self.output, "{START_NOTICE}")?;
        self.output.flush()?;

        loop {
            let Some(input) = self.input.as_mut() else {
                return Ok(());
            };

            let line = match input.read_line().await {
                InputEvent::Line(line) => line.trim().to_string(),
                InputEvent::Eof => {
                    debug!("Input stream closed");
                    return Ok(());
                }
                InputEvent::Interrupted => {
                    writeln!(self.output, "{INTERRUPT_HINT}")?;
                    self.output.flush()?;
                    continue;
                }
            };

            if is_termination_keyword(&line) {
                debug!(keyword = %line, "Termination keyword received");
                return Ok(());
            }

            let message = ChatMessage::new(line);
            match self.dispatch(message).await {
                Ok(response) => {
                    self.session.record_completed();
                    self.display_response(&response)?;
                }
                Err(e) => {
                    self.session.record_failed();
                    error!(error = %e, "Error processing message");
                }
            }
        }
    }

    /// Run the handler, turning a panic in its future into a `HandlerError`.
    async fn dispatch(&mut self, message: ChatMessage) -> Result<ChatMessage, HandlerError> {
        match AssertUnwindSafe(self.handler.handle(message))
            .catch_unwind()
            .await
        {
            Ok(result) => result,
            Err(panic) => Err(HandlerError::Panicked(panic_message(&*panic))),
        }
    }

    fn display_response(&mut self, response: &ChatMessage) -> io::Result<()> {
        writeln!(self.output, "{RESPONSE_PREFIX} {}", response.content)?;
        self.output.flush()
    }
}

impl<H, S: LineSource, W: Write> ConversationLoop<H, S, W> {
    /// Print the session-ended notice and release the input. No-op unless running.
    fn cleanup(&mut self) {
        if !self.session.mark_terminated() {
            return;
        }

        // The notice goes out before the input is closed: some line editors
        // own the terminal writer and drop pending output when closed.
        let _ = writeln!(self.output, "{SESSION_ENDED_NOTICE}");
        let _ = self.output.flush();

        if let Some(mut input) = self.input.take() {
            input.close();
        }

        let summary = self.session.summary();
        info!(
            session_id = %summary.id,
            completed_turns = summary.completed_turns,
            failed_turns = summary.failed_turns,
            duration_ms = ?summary.duration_ms,
            "Chat session ended"
        );
    }
}

impl<H, S: LineSource, W: Write> Drop for ConversationLoop<H, S, W> {
    fn drop(&mut self) {
        self.cleanup();
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
