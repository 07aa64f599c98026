//! Timed minigame session controller
//!
//! Owns the one live session and its puzzle. The host game calls `tick` once
//! per frame and forwards player input through `submit_action` and `cancel`.
//! Every started session ends in exactly one event delivered to the sink,
//! unless a newer `start` discards it first.

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::events::{CompletionReason, SessionEvent, SessionEventSink, SessionOutcome};
use crate::quality::{clamp_performance, grade};
use crate::settings::{MinigameSettings, SettingsError};
use crate::sim::{
    ChallengeKind, Progress, PuzzleAction, PuzzleEngine, PuzzleSignal, RngState, Session,
    SessionState,
};

/// Caller mistakes rejected by `start`
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StartError {
    #[error("session duration must be a positive number of seconds, got {0}")]
    InvalidDuration(f32),

    #[error("unknown challenge kind `{0}`")]
    UnknownChallenge(String),
}

/// Read-only view of the current session for HUD display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub kind: ChallengeKind,
    pub state: SessionState,
    pub time_remaining: f32,
    pub total_duration: f32,
    pub performance: f32,
    /// Puzzle progress, only while the session is active
    pub progress: Option<Progress>,
}

impl SessionSnapshot {
    /// Remaining time as a fraction of the full duration
    pub fn time_fraction(&self) -> f32 {
        if self.total_duration > 0.0 {
            self.time_remaining / self.total_duration
        } else {
            0.0
        }
    }
}

pub struct MinigameController<S: SessionEventSink = Vec<SessionEvent>> {
    settings: MinigameSettings,
    rng_state: RngState,
    rng: Pcg32,
    /// Current or most recently finished session
    session: Option<Session>,
    /// Live puzzle; present only while the session is active
    puzzle: Option<PuzzleEngine>,
    sink: S,
}

impl<S: SessionEventSink> MinigameController<S> {
    /// Build a controller from validated settings
    pub fn new(settings: MinigameSettings, sink: S) -> Result<Self, SettingsError> {
        settings.validate()?;
        let rng_state = match settings.seed {
            Some(seed) => RngState::new(seed),
            None => RngState::from_entropy(),
        };
        log::info!("Minigame controller ready (seed {})", rng_state.seed);
        Ok(Self {
            rng: rng_state.to_rng(),
            rng_state,
            settings,
            session: None,
            puzzle: None,
            sink,
        })
    }

    /// Begin a fresh session, discarding any session still in flight
    pub fn start(
        &mut self,
        kind: ChallengeKind,
        session_id: impl Into<String>,
        duration: f32,
    ) -> Result<(), StartError> {
        check_duration(duration)?;
        let mut puzzle = PuzzleEngine::new(kind, &self.settings);
        puzzle.generate(&mut self.rng);
        self.begin(puzzle, session_id.into(), duration);
        Ok(())
    }

    /// `start` with the challenge given by name (`"grid"`, `"cylinder"`)
    pub fn start_named(
        &mut self,
        kind: &str,
        session_id: impl Into<String>,
        duration: f32,
    ) -> Result<(), StartError> {
        let kind = ChallengeKind::from_str(kind)
            .ok_or_else(|| StartError::UnknownChallenge(kind.to_string()))?;
        self.start(kind, session_id, duration)
    }

    /// Begin a session around a puzzle prepared by the caller (no generation)
    pub fn start_with_puzzle(
        &mut self,
        puzzle: PuzzleEngine,
        session_id: impl Into<String>,
        duration: f32,
    ) -> Result<(), StartError> {
        check_duration(duration)?;
        self.begin(puzzle, session_id.into(), duration);
        Ok(())
    }

    fn begin(&mut self, puzzle: PuzzleEngine, session_id: String, duration: f32) {
        if let Some(previous) = self.session.as_ref().filter(|s| s.is_active()) {
            log::info!("Discarding in-flight session {} ({})", previous.id, previous.kind);
        }
        let kind = puzzle.kind();
        log::info!("Session {} started: {} for {:.1}s", session_id, kind, duration);
        self.session = Some(Session::new(session_id, kind, duration));
        self.puzzle = Some(puzzle);
    }

    /// Advance the active session by `dt` seconds. No-op unless active.
    pub fn tick(&mut self, dt: f32) {
        let (Some(session), Some(puzzle)) = (self.session.as_mut(), self.puzzle.as_mut()) else {
            return;
        };
        if !session.is_active() {
            return;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        let expired = session.advance_timer(dt);
        // Puzzle goes first so a finish in the expiring tick keeps its score
        let signal = puzzle.tick(dt);
        session.performance = clamp_performance(puzzle.performance());

        if let Some(signal) = signal {
            self.finish(signal);
        } else if expired {
            let performance = session.performance;
            self.complete(performance, CompletionReason::TimedOut);
        }
    }

    /// Forward player input to the puzzle. Ignored unless a session is active.
    pub fn submit_action(&mut self, action: PuzzleAction) {
        if !self.is_active() {
            return;
        }
        let (Some(session), Some(puzzle)) = (self.session.as_mut(), self.puzzle.as_mut()) else {
            return;
        };
        let signal = puzzle.apply(action, &mut self.rng);
        session.performance = clamp_performance(puzzle.performance());
        if let Some(signal) = signal {
            self.finish(signal);
        }
    }

    /// Abandon the active session. Returns false (and does nothing) otherwise.
    pub fn cancel(&mut self) -> bool {
        let Some(session) = self.session.as_mut().filter(|s| s.is_active()) else {
            return false;
        };
        session.state = SessionState::Canceled;
        self.puzzle = None;
        log::info!("Session {} canceled after {:.1}s", session.id, session.elapsed());
        self.sink.on_canceled(&session.id);
        true
    }

    fn finish(&mut self, signal: PuzzleSignal) {
        let reason = match signal {
            PuzzleSignal::Solved { .. } => CompletionReason::Solved,
            PuzzleSignal::Exhausted { .. } => CompletionReason::Exhausted,
        };
        self.complete(signal.performance(), reason);
    }

    fn complete(&mut self, final_performance: f32, reason: CompletionReason) {
        let Some(session) = self.session.as_mut().filter(|s| s.is_active()) else {
            return;
        };
        let performance = clamp_performance(final_performance);
        session.performance = performance;
        session.state = SessionState::Completed;
        self.puzzle = None;

        let outcome = SessionOutcome {
            session_id: session.id.clone(),
            kind: session.kind,
            performance,
            tier: grade(performance),
            reason,
            elapsed: session.elapsed(),
        };
        log::info!(
            "Session {} completed ({:?}): performance {:.2} -> {}",
            outcome.session_id,
            reason,
            performance,
            outcome.tier
        );
        self.sink.on_completed(&outcome);
    }

    pub fn is_active(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.is_active())
    }

    /// True when no session is running and `start` may be called freely
    pub fn is_idle(&self) -> bool {
        !self.is_active()
    }

    /// State of the current or most recent session (`Idle` if none yet)
    pub fn state(&self) -> SessionState {
        self.session.as_ref().map(|s| s.state).unwrap_or_default()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Live puzzle, for rendering; `None` once the session has ended
    pub fn puzzle(&self) -> Option<&PuzzleEngine> {
        self.puzzle.as_ref()
    }

    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.session.as_ref().map(|s| SessionSnapshot {
            session_id: s.id.clone(),
            kind: s.kind,
            state: s.state,
            time_remaining: s.time_remaining,
            total_duration: s.total_duration,
            performance: s.performance,
            progress: self.puzzle.as_ref().map(|p| p.progress()),
        })
    }

    pub fn settings(&self) -> &MinigameSettings {
        &self.settings
    }

    pub fn rng_state(&self) -> &RngState {
        &self.rng_state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

fn check_duration(duration: f32) -> Result<(), StartError> {
    if duration.is_finite() && duration > 0.0 {
        Ok(())
    } else {
        Err(StartError::InvalidDuration(duration))
    }
}
