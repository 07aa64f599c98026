//! Puzzle engine dispatch
//!
//! The set of challenges is closed: the controller picks a variant at start
//! and drives it through `generate`, `tick` and `apply`.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::cylinder::CylinderAlignmentPuzzle;
use super::grid::GridRotationPuzzle;
use crate::settings::MinigameSettings;

/// Which challenge a session runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChallengeKind {
    GridRotation,
    CylinderAlignment,
}

impl ChallengeKind {
    pub const ALL: [ChallengeKind; 2] = [ChallengeKind::GridRotation, ChallengeKind::CylinderAlignment];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChallengeKind::GridRotation => "grid",
            ChallengeKind::CylinderAlignment => "cylinder",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "grid" | "grid_rotation" | "gridrotation" => Some(ChallengeKind::GridRotation),
            "cylinder" | "cylinder_alignment" | "cylinderalignment" => {
                Some(ChallengeKind::CylinderAlignment)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for ChallengeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Player input for the active puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PuzzleAction {
    /// Turn the grid tile at (x, y) by 90°
    Rotate { x: usize, y: usize },
    /// Lock in the cylinder's current angle
    Strike,
}

/// A puzzle asking the controller to finish the session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PuzzleSignal {
    /// Puzzle completed; performance may fall outside [0, 1]
    Solved { performance: f32 },
    /// Move budget spent without solving
    Exhausted { performance: f32 },
}

impl PuzzleSignal {
    pub fn performance(&self) -> f32 {
        match *self {
            PuzzleSignal::Solved { performance } | PuzzleSignal::Exhausted { performance } => {
                performance
            }
        }
    }
}

/// Progress toward solving, for HUD display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Progress {
    pub done: u32,
    pub total: u32,
}

impl Progress {
    /// Completed fraction in [0, 1]
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            (self.done as f32 / self.total as f32).min(1.0)
        }
    }
}

/// The live simulation behind a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PuzzleEngine {
    Grid(GridRotationPuzzle),
    Cylinder(CylinderAlignmentPuzzle),
}

impl PuzzleEngine {
    /// Unscrambled engine for `kind` using the configured tuning
    pub fn new(kind: ChallengeKind, settings: &MinigameSettings) -> Self {
        match kind {
            ChallengeKind::GridRotation => PuzzleEngine::Grid(GridRotationPuzzle::new(&settings.grid)),
            ChallengeKind::CylinderAlignment => {
                PuzzleEngine::Cylinder(CylinderAlignmentPuzzle::new(&settings.cylinder))
            }
        }
    }

    pub fn kind(&self) -> ChallengeKind {
        match self {
            PuzzleEngine::Grid(_) => ChallengeKind::GridRotation,
            PuzzleEngine::Cylinder(_) => ChallengeKind::CylinderAlignment,
        }
    }

    pub fn generate<R: Rng>(&mut self, rng: &mut R) {
        match self {
            PuzzleEngine::Grid(grid) => grid.generate(rng),
            PuzzleEngine::Cylinder(cylinder) => cylinder.generate(rng),
        }
    }

    /// Advance by `dt` seconds, returning any pending finish request
    pub fn tick(&mut self, dt: f32) -> Option<PuzzleSignal> {
        match self {
            PuzzleEngine::Grid(grid) => grid.tick(dt),
            PuzzleEngine::Cylinder(cylinder) => cylinder.tick(dt),
        }
    }

    /// Apply a player action. Actions meant for the other puzzle are ignored.
    pub fn apply<R: Rng>(&mut self, action: PuzzleAction, rng: &mut R) -> Option<PuzzleSignal> {
        match (self, action) {
            (PuzzleEngine::Grid(grid), PuzzleAction::Rotate { x, y }) => grid.rotate(x, y),
            (PuzzleEngine::Cylinder(cylinder), PuzzleAction::Strike) => cylinder.strike(rng),
            (engine, action) => {
                log::debug!("Ignoring {:?} for {} puzzle", action, engine.kind());
                None
            }
        }
    }

    pub fn is_solved(&self) -> bool {
        match self {
            PuzzleEngine::Grid(grid) => grid.is_solved(),
            PuzzleEngine::Cylinder(cylinder) => cylinder.is_solved(),
        }
    }

    /// Running performance estimate (unclamped)
    pub fn performance(&self) -> f32 {
        match self {
            PuzzleEngine::Grid(grid) => grid.performance(),
            PuzzleEngine::Cylinder(cylinder) => cylinder.performance(),
        }
    }

    pub fn progress(&self) -> Progress {
        match self {
            PuzzleEngine::Grid(grid) => grid.progress(),
            PuzzleEngine::Cylinder(cylinder) => cylinder.progress(),
        }
    }

    pub fn as_grid(&self) -> Option<&GridRotationPuzzle> {
        match self {
            PuzzleEngine::Grid(grid) => Some(grid),
            _ => None,
        }
    }

    pub fn as_cylinder(&self) -> Option<&CylinderAlignmentPuzzle> {
        match self {
            PuzzleEngine::Cylinder(cylinder) => Some(cylinder),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_kind_names_round_trip() {
        for kind in ChallengeKind::ALL {
            assert_eq!(ChallengeKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(ChallengeKind::from_str("Cylinder"), Some(ChallengeKind::CylinderAlignment));
        assert_eq!(ChallengeKind::from_str("anvil"), None);
    }

    #[test]
    fn test_engine_matches_kind() {
        let settings = MinigameSettings::default();
        for kind in ChallengeKind::ALL {
            assert_eq!(PuzzleEngine::new(kind, &settings).kind(), kind);
        }
    }

    #[test]
    fn test_mismatched_action_is_ignored() {
        let settings = MinigameSettings::default();
        let mut rng = Pcg32::seed_from_u64(11);

        let mut grid = PuzzleEngine::new(ChallengeKind::GridRotation, &settings);
        grid.generate(&mut rng);
        let before = grid.as_grid().unwrap().cells().to_vec();
        assert_eq!(grid.apply(PuzzleAction::Strike, &mut rng), None);
        assert_eq!(grid.as_grid().unwrap().cells(), before.as_slice());
        assert_eq!(grid.as_grid().unwrap().move_count(), 0);

        let mut cylinder = PuzzleEngine::new(ChallengeKind::CylinderAlignment, &settings);
        cylinder.generate(&mut rng);
        assert_eq!(cylinder.apply(PuzzleAction::Rotate { x: 0, y: 0 }, &mut rng), None);
        assert_eq!(cylinder.as_cylinder().unwrap().alignments_made(), 0);
    }

    #[test]
    fn test_progress_fraction() {
        assert_eq!(Progress { done: 3, total: 6 }.fraction(), 0.5);
        assert_eq!(Progress { done: 0, total: 0 }.fraction(), 0.0);
    }
}
