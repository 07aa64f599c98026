//! Craft Minigames - timed skill challenges for crafting
//!
//! Core modules:
//! - `sim`: Puzzle simulations (grid rotation, cylinder alignment)
//! - `controller`: Timed session state machine driving the active puzzle
//! - `quality`: Performance to quality tier grading
//! - `events`: Terminal session events and sinks
//! - `settings`: Data-driven puzzle tuning
//! - `records`: Best-result board per challenge

pub mod controller;
pub mod events;
pub mod quality;
pub mod records;
pub mod settings;
pub mod sim;

pub use controller::{MinigameController, SessionSnapshot, StartError};
pub use events::{CompletionReason, SessionEvent, SessionEventSink, SessionOutcome};
pub use quality::{QualityTier, grade};
pub use records::ResultBook;
pub use settings::{MinigameSettings, SettingsError};
pub use sim::{ChallengeKind, PuzzleAction, PuzzleEngine};

/// Minigame configuration constants
pub mod consts {
    /// Fixed simulation timestep used by drivers (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Grid puzzle defaults
    pub const GRID_SIZE: usize = 4;
    pub const GRID_MAX_MOVES: u32 = 20;
    /// Credit awarded when the move budget runs out before the grid is solved
    pub const GRID_EXHAUSTED_CREDIT: f32 = 0.3;

    /// Cylinder puzzle defaults (degrees, degrees/second)
    pub const CYLINDER_BASE_SPEED: f32 = 120.0;
    pub const CYLINDER_SPEED_STEP: f32 = 10.0;
    pub const CYLINDER_TARGET_RANGE: f32 = 30.0;
    pub const CYLINDER_ALIGNMENTS_NEEDED: u32 = 6;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Shortest signed difference `to - from` in degrees, in [-180, 180)
#[inline]
pub fn angle_diff_degrees(from: f32, to: f32) -> f32 {
    normalize_degrees(to - from + 180.0) - 180.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert!((normalize_degrees(370.0) - 10.0).abs() < 1e-4);
        assert!((normalize_degrees(-90.0) - 270.0).abs() < 1e-4);
        assert!(normalize_degrees(-1e-7) < 360.0);
    }

    #[test]
    fn test_angle_diff_wraparound() {
        assert!((angle_diff_degrees(185.0, 180.0) + 5.0).abs() < 1e-4);
        assert!((angle_diff_degrees(350.0, 10.0) - 20.0).abs() < 1e-4);
        assert!((angle_diff_degrees(10.0, 350.0) + 20.0).abs() < 1e-4);
        assert_eq!(angle_diff_degrees(42.0, 42.0), 0.0);
    }
}
