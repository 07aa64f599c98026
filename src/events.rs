//! Terminal session events
//!
//! Each started session ends in exactly one event: completed with a graded
//! outcome, or canceled. The controller delivers it to its sink.

use serde::{Deserialize, Serialize};

use crate::quality::QualityTier;
use crate::sim::ChallengeKind;

/// Why a session completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletionReason {
    /// Puzzle solved before time ran out
    Solved,
    /// Move budget spent without solving
    Exhausted,
    /// Session timer reached zero
    TimedOut,
}

/// Graded result of a completed session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionOutcome {
    pub session_id: String,
    pub kind: ChallengeKind,
    /// Final performance in [0, 1]
    pub performance: f32,
    pub tier: QualityTier,
    pub reason: CompletionReason,
    /// Seconds the session ran
    pub elapsed: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    Completed(SessionOutcome),
    Canceled { session_id: String },
}

impl SessionEvent {
    pub fn session_id(&self) -> &str {
        match self {
            SessionEvent::Completed(outcome) => &outcome.session_id,
            SessionEvent::Canceled { session_id } => session_id,
        }
    }

    pub fn outcome(&self) -> Option<&SessionOutcome> {
        match self {
            SessionEvent::Completed(outcome) => Some(outcome),
            SessionEvent::Canceled { .. } => None,
        }
    }
}

/// Receiver for terminal session events (UI, crafting pipeline, ...)
pub trait SessionEventSink {
    fn on_completed(&mut self, outcome: &SessionOutcome);
    fn on_canceled(&mut self, session_id: &str);

    fn on_event(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::Completed(outcome) => self.on_completed(outcome),
            SessionEvent::Canceled { session_id } => self.on_canceled(session_id),
        }
    }
}

/// Records every event in order
impl SessionEventSink for Vec<SessionEvent> {
    fn on_completed(&mut self, outcome: &SessionOutcome) {
        self.push(SessionEvent::Completed(outcome.clone()));
    }

    fn on_canceled(&mut self, session_id: &str) {
        self.push(SessionEvent::Canceled {
            session_id: session_id.to_string(),
        });
    }
}

impl<S: SessionEventSink + ?Sized> SessionEventSink for &mut S {
    fn on_completed(&mut self, outcome: &SessionOutcome) {
        (**self).on_completed(outcome);
    }

    fn on_canceled(&mut self, session_id: &str) {
        (**self).on_canceled(session_id);
    }
}

/// Discards everything
impl SessionEventSink for () {
    fn on_completed(&mut self, _outcome: &SessionOutcome) {}
    fn on_canceled(&mut self, _session_id: &str) {}
}
