//! Best-result board
//!
//! Keeps the top completed sessions per challenge, ranked by performance.
//! In-memory only; saving it is the host game's business.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::events::{SessionEventSink, SessionOutcome};
use crate::sim::ChallengeKind;

/// Maximum number of results kept per challenge
pub const MAX_RESULTS: usize = 10;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultBook {
    boards: HashMap<ChallengeKind, Vec<SessionOutcome>>,
    /// Most recent completion, whether or not it made a board
    pub last: Option<SessionOutcome>,
    /// Sessions canceled since creation
    pub canceled: u32,
}

impl ResultBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Results for `kind`, best first
    pub fn entries(&self, kind: ChallengeKind) -> &[SessionOutcome] {
        self.boards.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check if a performance would make the board
    pub fn qualifies(&self, kind: ChallengeKind, performance: f32) -> bool {
        if performance <= 0.0 {
            return false;
        }
        let entries = self.entries(kind);
        if entries.len() < MAX_RESULTS {
            return true;
        }
        entries.last().map(|e| performance > e.performance).unwrap_or(true)
    }

    /// Add a result if it qualifies.
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify
    pub fn record(&mut self, outcome: &SessionOutcome) -> Option<usize> {
        if !self.qualifies(outcome.kind, outcome.performance) {
            return None;
        }

        let board = self.boards.entry(outcome.kind).or_default();
        // Equal scores keep the earlier result ahead
        let pos = board.iter().position(|e| outcome.performance > e.performance);
        let rank = match pos {
            Some(i) => {
                board.insert(i, outcome.clone());
                i + 1
            }
            None => {
                board.push(outcome.clone());
                board.len()
            }
        };
        board.truncate(MAX_RESULTS);

        log::debug!(
            "Recorded {} result {:.2} at rank {}",
            outcome.kind,
            outcome.performance,
            rank
        );
        Some(rank)
    }

    pub fn best(&self, kind: ChallengeKind) -> Option<&SessionOutcome> {
        self.entries(kind).first()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.values().all(Vec::is_empty)
    }
}

impl SessionEventSink for ResultBook {
    fn on_completed(&mut self, outcome: &SessionOutcome) {
        self.record(outcome);
        self.last = Some(outcome.clone());
    }

    fn on_canceled(&mut self, _session_id: &str) {
        self.canceled += 1;
    }
}
