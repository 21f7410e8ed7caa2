//! Session lifecycle tracking for the conversation loop.
//!
//! Wraps the `NotStarted -> Running -> Terminated` state machine with turn
//! counters, so the loop can report what happened when the session ends.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Lifecycle state of a conversation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    Running,
    Terminated,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::NotStarted => write!(f, "not_started"),
            SessionState::Running => write!(f, "running"),
            SessionState::Terminated => write!(f, "terminated"),
        }
    }
}

/// What a finished session did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub id: Uuid,
    pub completed_turns: u32,
    pub failed_turns: u32,
    /// Wall-clock time between start and termination, once both happened.
    pub duration_ms: Option<i64>,
}

/// Tracks the state and turn counts of a single session.
#[derive(Debug)]
pub struct SessionManager {
    id: Uuid,
    state: SessionState,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
    completed_turns: u32,
    failed_turns: u32,
}

impl SessionManager {
    pub fn new() -> Self {
        Self {
            id: Uuid::now_v7(),
            state: SessionState::NotStarted,
            started_at: None,
            ended_at: None,
            completed_turns: 0,
            failed_turns: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Move from `NotStarted` to `Running`. Returns `false` from any other state.
    pub fn mark_running(&mut self) -> bool {
        if self.state != SessionState::NotStarted {
            return false;
        }
        self.state = SessionState::Running;
        self.started_at = Some(Utc::now());
        true
    }

    /// Move from `Running` to `Terminated`. Returns `false` from any other state.
    pub fn mark_terminated(&mut self) -> bool {
        if self.state != SessionState::Running {
            return false;
        }
        self.state = SessionState::Terminated;
        self.ended_at = Some(Utc::now());
        true
    }

    /// A turn whose response was displayed.
    pub fn record_completed(&mut self) {
        self.completed_turns += 1;
    }

    /// A turn the handler failed and the loop skipped.
    pub fn record_failed(&mut self) {
        self.failed_turns += 1;
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id,
            completed_turns: self.completed_turns,
            failed_turns: self.failed_turns,
            duration_ms: self
                .started_at
                .zip(self.ended_at)
                .map(|(start, end)| (end - start).num_milliseconds()),
        }
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
