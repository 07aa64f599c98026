//! Cylinder alignment puzzle
//!
//! A marker spins around a cylinder at a steadily rising speed. The player
//! strikes to lock the marker in while it sits inside the target window; each
//! hit moves the target and spins the cylinder faster.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::puzzle::{Progress, PuzzleSignal};
use crate::settings::CylinderSettings;
use crate::{angle_diff_degrees, normalize_degrees};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CylinderAlignmentPuzzle {
    /// Marker angle (degrees, [0, 360))
    pub rotation: f32,
    /// Centre of the acceptance window (degrees, [0, 360))
    pub target_angle: f32,
    /// Degrees per second; only ever increases within a session
    rotation_speed: f32,
    /// Total width of the acceptance window (degrees)
    target_range: f32,
    alignments_made: u32,
    alignments_needed: u32,
    base_speed: f32,
    speed_step: f32,
    performance: f32,
    signal: Option<PuzzleSignal>,
}

impl CylinderAlignmentPuzzle {
    /// Tuning that fails validation is replaced by the defaults
    pub fn new(settings: &CylinderSettings) -> Self {
        let settings = match settings.validate() {
            Ok(()) => settings.clone(),
            Err(e) => {
                log::warn!("Using default cylinder settings: {}", e);
                CylinderSettings::default()
            }
        };
        Self {
            rotation: 0.0,
            rotation_speed: settings.base_speed,
            target_angle: 0.0,
            target_range: settings.target_range,
            alignments_made: 0,
            alignments_needed: settings.alignments_needed,
            base_speed: settings.base_speed,
            speed_step: settings.speed_step,
            performance: 0.0,
            signal: None,
        }
    }

    /// Pick a fresh target and reset the spin
    pub fn generate<R: Rng>(&mut self, rng: &mut R) {
        self.rotation = 0.0;
        self.rotation_speed = self.base_speed;
        self.alignments_made = 0;
        self.performance = 0.0;
        self.signal = None;
        self.retarget(rng);
    }

    fn retarget<R: Rng>(&mut self, rng: &mut R) {
        self.target_angle = rng.random_range(0.0..360.0);
    }

    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed
    }

    pub fn target_range(&self) -> f32 {
        self.target_range
    }

    pub fn alignments_made(&self) -> u32 {
        self.alignments_made
    }

    pub fn alignments_needed(&self) -> u32 {
        self.alignments_needed
    }

    /// Half-width of the acceptance window
    #[inline]
    pub fn tolerance(&self) -> f32 {
        self.target_range / 2.0
    }

    /// Signed distance from the marker to the target (degrees, [-180, 180))
    pub fn offset_to_target(&self) -> f32 {
        angle_diff_degrees(self.rotation, self.target_angle)
    }

    pub fn in_window(&self) -> bool {
        self.offset_to_target().abs() <= self.tolerance()
    }

    pub fn is_solved(&self) -> bool {
        self.alignments_made >= self.alignments_needed
    }

    pub fn performance(&self) -> f32 {
        self.performance
    }

    pub fn progress(&self) -> Progress {
        Progress {
            done: self.alignments_made,
            total: self.alignments_needed,
        }
    }

    /// Spin the marker. Duration is bounded only by the session timer.
    pub fn tick(&mut self, dt: f32) -> Option<PuzzleSignal> {
        self.rotation = normalize_degrees(self.rotation + self.rotation_speed * dt);
        self.performance = self.alignments_made as f32 / self.alignments_needed as f32;
        self.signal
    }

    /// Lock in the current marker angle. A miss changes nothing.
    pub fn strike<R: Rng>(&mut self, rng: &mut R) -> Option<PuzzleSignal> {
        if self.is_solved() {
            return None;
        }

        let offset = self.offset_to_target();
        if offset.abs() > self.tolerance() {
            log::debug!(
                "Strike missed: rotation {:.1}, target {:.1} (off by {:.1})",
                self.rotation,
                self.target_angle,
                offset
            );
            return None;
        }

        self.alignments_made += 1;
        self.rotation_speed += self.speed_step;
        self.performance = self.alignments_made as f32 / self.alignments_needed as f32;
        log::debug!(
            "Strike hit {}/{} (off by {:.1}), speed now {:.0}",
            self.alignments_made,
            self.alignments_needed,
            offset,
            self.rotation_speed
        );

        if self.is_solved() {
            self.performance = 1.0;
            self.signal = Some(PuzzleSignal::Solved { performance: 1.0 });
        } else {
            self.retarget(rng);
        }
        self.signal
    }
}
