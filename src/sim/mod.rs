//! Puzzle simulation module
//!
//! All challenge logic lives here. This module must stay pure:
//! - Caller-supplied timestep only
//! - Seeded RNG only, passed in explicitly
//! - No rendering, input-device or platform dependencies

pub mod cylinder;
pub mod grid;
pub mod puzzle;
pub mod state;

pub use cylinder::CylinderAlignmentPuzzle;
pub use grid::{GridRotationPuzzle, ROTATION_STATES};
pub use puzzle::{ChallengeKind, Progress, PuzzleAction, PuzzleEngine, PuzzleSignal};
pub use state::{RngState, Session, SessionState};
