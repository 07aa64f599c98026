//! Grid rotation puzzle
//!
//! An N×N board of tiles, each turned to one of four quarter rotations.
//! Every action turns one tile a further 90°; the board is solved once all
//! tiles are back at rotation 0.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::puzzle::{Progress, PuzzleSignal};
use crate::consts::GRID_EXHAUSTED_CREDIT;
use crate::settings::GridSettings;

/// Number of distinct tile rotations (0°, 90°, 180°, 270°)
pub const ROTATION_STATES: u8 = 4;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridRotationPuzzle {
    size: usize,
    /// Row-major rotation states, each in 0..ROTATION_STATES
    cells: Vec<u8>,
    move_count: u32,
    max_moves: u32,
    performance: f32,
    /// Set once the board is solved or exhausted
    signal: Option<PuzzleSignal>,
}

impl GridRotationPuzzle {
    /// Empty (already aligned) board; call `generate` to scramble it.
    ///
    /// Tuning that fails validation is replaced by the defaults.
    pub fn new(settings: &GridSettings) -> Self {
        let settings = match settings.validate() {
            Ok(()) => settings.clone(),
            Err(e) => {
                log::warn!("Using default grid settings: {}", e);
                GridSettings::default()
            }
        };
        Self {
            size: settings.size,
            cells: vec![0; settings.size * settings.size],
            move_count: 0,
            max_moves: settings.max_moves,
            performance: 0.0,
            signal: None,
        }
    }

    /// Board with explicit starting rotations (row-major, values taken mod 4).
    ///
    /// Returns `None` if `cells` does not fill the board exactly.
    pub fn from_cells(settings: &GridSettings, cells: Vec<u8>) -> Option<Self> {
        let mut puzzle = Self::new(settings);
        if cells.len() != puzzle.cells.len() {
            return None;
        }
        puzzle.cells = cells.into_iter().map(|c| c % ROTATION_STATES).collect();
        Some(puzzle)
    }

    /// Scramble every tile uniformly and reset counters.
    ///
    /// A draw that lands fully aligned is thrown away and redrawn.
    pub fn generate<R: Rng>(&mut self, rng: &mut R) {
        loop {
            for cell in &mut self.cells {
                *cell = rng.random_range(0..ROTATION_STATES);
            }
            if !self.is_solved() {
                break;
            }
        }
        self.move_count = 0;
        self.performance = 0.0;
        self.signal = None;
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Rotation state at (x, y), `None` when out of bounds
    pub fn cell(&self, x: usize, y: usize) -> Option<u8> {
        self.index(x, y).map(|i| self.cells[i])
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn max_moves(&self) -> u32 {
        self.max_moves
    }

    /// Number of tiles currently at rotation 0
    pub fn aligned_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == 0).count()
    }

    pub fn is_solved(&self) -> bool {
        self.cells.iter().all(|&c| c == 0)
    }

    pub fn performance(&self) -> f32 {
        self.performance
    }

    pub fn progress(&self) -> Progress {
        Progress {
            done: self.aligned_count() as u32,
            total: self.cells.len() as u32,
        }
    }

    /// Refresh the running estimate. The board has no time-driven behaviour.
    ///
    /// A board that is already aligned when play starts is reported solved
    /// here, since no rotation will ever raise the signal for it.
    pub fn tick(&mut self, _dt: f32) -> Option<PuzzleSignal> {
        if self.is_solved() {
            self.performance = 1.0;
            if self.signal.is_none() {
                self.signal = Some(PuzzleSignal::Solved {
                    performance: 1.0 - self.move_fraction(),
                });
            }
        } else {
            self.performance = 0.5 * (1.0 - self.move_fraction());
        }
        self.signal
    }

    /// Turn the tile at (x, y) by 90°.
    ///
    /// Out-of-range coordinates and actions after the board has finished are
    /// ignored.
    pub fn rotate(&mut self, x: usize, y: usize) -> Option<PuzzleSignal> {
        if self.signal.is_some() {
            return None;
        }
        let i = self.index(x, y)?;

        self.move_count += 1;
        self.cells[i] = (self.cells[i] + 1) % ROTATION_STATES;
        log::debug!(
            "Grid rotate ({}, {}) -> {} [move {}/{}]",
            x,
            y,
            self.cells[i],
            self.move_count,
            self.max_moves
        );

        if self.is_solved() {
            self.performance = 1.0;
            self.signal = Some(PuzzleSignal::Solved {
                performance: 1.0 - self.move_fraction(),
            });
        } else if self.move_count >= self.max_moves {
            self.signal = Some(PuzzleSignal::Exhausted {
                performance: GRID_EXHAUSTED_CREDIT,
            });
        }
        self.signal
    }

    fn move_fraction(&self) -> f32 {
        self.move_count as f32 / self.max_moves as f32
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.size && y < self.size).then(|| y * self.size + x)
    }
}
