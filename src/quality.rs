//! Quality tiers awarded for a finished minigame

use serde::{Deserialize, Serialize};

/// Output quality, lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum QualityTier {
    #[default]
    Normal,
    Fine,
    Superior,
    Masterwork,
    Legendary,
}

impl QualityTier {
    pub const ALL: [QualityTier; 5] = [
        QualityTier::Normal,
        QualityTier::Fine,
        QualityTier::Superior,
        QualityTier::Masterwork,
        QualityTier::Legendary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityTier::Normal => "Normal",
            QualityTier::Fine => "Fine",
            QualityTier::Superior => "Superior",
            QualityTier::Masterwork => "Masterwork",
            QualityTier::Legendary => "Legendary",
        }
    }

    /// Lowest performance that earns this tier (inclusive)
    pub fn threshold(&self) -> f32 {
        match self {
            QualityTier::Normal => 0.0,
            QualityTier::Fine => 0.25,
            QualityTier::Superior => 0.50,
            QualityTier::Masterwork => 0.75,
            QualityTier::Legendary => 0.90,
        }
    }
}

impl std::fmt::Display for QualityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a final performance to its tier. Input is clamped to [0, 1] first.
pub fn grade(performance: f32) -> QualityTier {
    let p = clamp_performance(performance);
    QualityTier::ALL
        .iter()
        .rev()
        .copied()
        .find(|tier| p >= tier.threshold())
        .unwrap_or(QualityTier::Normal)
}

/// Clamp to [0, 1]; NaN counts as no performance
#[inline]
pub fn clamp_performance(performance: f32) -> f32 {
    if performance.is_nan() {
        0.0
    } else {
        performance.clamp(0.0, 1.0)
    }
}
