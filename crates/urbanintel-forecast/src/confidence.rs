//! Confidence scores attached to each forecast.
//!
//! Confidence is display-only: no stage, classifier rule, or recommendation
//! gate reads it. Scores are derived from the snapshot id so that re-running
//! a snapshot reproduces them exactly.

use serde::{Deserialize, Serialize};
use urbanintel_types::SnapshotId;

/// The forecast stage a score is produced for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    WaterSupply,
    Traffic,
    FoodPrice,
    EnergyPrice,
    PublicServices,
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Stage::WaterSupply => "water_supply",
            Stage::Traffic => "traffic",
            Stage::FoodPrice => "food_price",
            Stage::EnergyPrice => "energy_price",
            Stage::PublicServices => "public_services",
        }
    }

    /// Inclusive `(low, high)` score range.
    pub fn range(&self) -> (u8, u8) {
        match self {
            Stage::WaterSupply => (85, 95),
            Stage::Traffic => (78, 93),
            Stage::FoodPrice => (72, 90),
            Stage::EnergyPrice => (80, 95),
            Stage::PublicServices => (88, 98),
        }
    }
}

/// How confidence scores are assigned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "lowercase")]
pub enum ConfidencePolicy {
    /// Hash of snapshot id and stage, mapped into the stage's range.
    #[default]
    Derived,
    /// The same score for every stage.
    Fixed(u8),
}

impl ConfidencePolicy {
    pub fn score(&self, snapshot: &SnapshotId, stage: Stage) -> u8 {
        match self {
            ConfidencePolicy::Fixed(value) => (*value).min(100),
            ConfidencePolicy::Derived => {
                let (low, high) = stage.range();
                let span = u64::from(high - low) + 1;
                let offset = stage_hash(snapshot, stage) % span;
                // offset < span <= 256
                low + offset as u8
            }
        }
    }
}

fn stage_hash(snapshot: &SnapshotId, stage: Stage) -> u64 {
    let mut hasher = blake3::Hasher::new();
    hasher.update(snapshot.as_str().as_bytes());
    hasher.update(&[0]);
    hasher.update(stage.label().as_bytes());
    let digest = hasher.finalize();
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest.as_bytes()[..8]);
    u64::from_le_bytes(prefix)
}
