//! Session state and RNG bookkeeping
//!
//! Everything describing one run, live or finished, lives here. The puzzle
//! itself is owned by the controller and dropped when the run ends.

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::puzzle::ChallengeKind;

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionState {
    /// Nothing running
    #[default]
    Idle,
    /// Timer running, accepting input
    Active,
    /// Finished with a graded result
    Completed,
    /// Abandoned by the player
    Canceled,
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Completed | SessionState::Canceled)
    }
}

/// One timed run of a challenge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Caller token, echoed back untouched
    pub id: String,
    pub kind: ChallengeKind,
    /// Seconds
    pub total_duration: f32,
    /// Seconds, in [0, total_duration]
    pub time_remaining: f32,
    /// Running estimate in [0, 1], frozen once the session ends
    pub performance: f32,
    pub state: SessionState,
    /// Simulation ticks processed while active
    pub ticks: u64,
}

impl Session {
    pub fn new(id: impl Into<String>, kind: ChallengeKind, duration: f32) -> Self {
        Self {
            id: id.into(),
            kind,
            total_duration: duration,
            time_remaining: duration,
            performance: 0.0,
            state: SessionState::Active,
            ticks: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    /// Seconds spent so far
    pub fn elapsed(&self) -> f32 {
        self.total_duration - self.time_remaining
    }

    /// Run down the clock, never below zero. Returns true once time is up.
    pub fn advance_timer(&mut self, dt: f32) -> bool {
        self.time_remaining = (self.time_remaining - dt).max(0.0);
        self.ticks += 1;
        self.time_remaining <= 0.0
    }
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// Seed from OS entropy
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::new(self.seed, self.stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_timer_clamps_at_zero() {
        let mut session = Session::new("recipe-1", ChallengeKind::GridRotation, 1.0);
        assert!(!session.advance_timer(0.4));
        assert!((session.time_remaining - 0.6).abs() < 1e-6);
        assert!(session.advance_timer(5.0));
        assert_eq!(session.time_remaining, 0.0);
        assert!((session.elapsed() - 1.0).abs() < 1e-6);
        assert_eq!(session.ticks, 2);
    }

    #[test]
    fn test_terminal_states() {
        assert!(!SessionState::Idle.is_terminal());
        assert!(!SessionState::Active.is_terminal());
        assert!(SessionState::Completed.is_terminal());
        assert!(SessionState::Canceled.is_terminal());
    }

    #[test]
    fn test_rng_state_reproducible() {
        let state = RngState::new(12345);
        let mut a = state.to_rng();
        let mut b = state.to_rng();
        for _ in 0..8 {
            assert_eq!(a.random::<u32>(), b.random::<u32>());
        }
    }
}
