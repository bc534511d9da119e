//! UrbanIntel forecast engine.
//!
//! A pure pipeline from one [`CityData`](urbanintel_types::CityData) snapshot
//! to forecasts, a crisis classification, and a ranked set of policy
//! options:
//!
//! - **Stages** ([`stages`]): water supply, traffic, food price, energy
//!   price, and public services predictors.
//! - **Aggregation** ([`generate_all_predictions`]): validates the snapshot
//!   and runs the stages in dependency order.
//! - **Classification** ([`get_crisis_type`]) and **synthesis**
//!   ([`generate_final_recommendations`]).
//! - **Engines** ([`PredictionEngine`]): the rule engine and the
//!   model-output blend.
//! - **Sampling** ([`SnapshotGenerator`]): seeded synthetic snapshots.

#![deny(unsafe_code)]

pub mod aggregate;
pub mod blend;
pub mod classify;
pub mod confidence;
pub mod engine;
pub mod error;
pub mod recommend;
pub mod sample;
pub mod stages;

pub use aggregate::{generate_all_predictions, generate_all_predictions_with};
pub use blend::{BlendConfig, ModelBlendEngine, ModelOutputSource, StaticModelOutputs};
pub use classify::get_crisis_type;
pub use confidence::{ConfidencePolicy, Stage};
pub use engine::{PredictionEngine, RuleEngine};
pub use error::ForecastError;
pub use recommend::{generate_final_recommendations, MAX_OPTIONS};
pub use sample::SnapshotGenerator;
