//! Stage predictors.
//!
//! Each stage is a pure function of the snapshot (plus, for traffic and food,
//! the water-supply forecast). Stages never observe each other except through
//! those explicit parameters.

mod energy;
mod food;
mod public_services;
mod traffic;
mod water;

pub use energy::{predict_energy_price, projected_rate, BASE_ENERGY_RATE};
pub use food::{predict_food_price, LOW_RAINFALL_MM};
pub use public_services::{predict_public_services, ROUTINE_MAINTENANCE, STORM_WORK};
pub use traffic::{predict_traffic, PEAK_HOURS};
pub use water::{predict_water_supply, NORMAL_ANNUAL_RAINFALL_MM};

use std::collections::HashSet;

/// Round to a whole number for display in reason text.
pub(crate) fn whole(value: f64) -> i64 {
    value.round() as i64
}

/// Remove repeated entries, keeping the first occurrence of each.
pub(crate) fn dedup_ordered(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
