//! UrbanIntel Domain Types
//!
//! Records exchanged between the sensor feeds, the forecast engine, and the
//! operator console:
//!
//! - **Snapshots** ([`CityData`]): one immutable reading of weather,
//!   transportation, agriculture, energy, and public-services feeds.
//! - **Forecasts** ([`AllPredictions`]): the five stage predictions derived
//!   from a snapshot.
//! - **Classification** ([`CrisisAssessment`]): the single crisis type and
//!   severity reported for a run.
//! - **Policy** ([`PolicyOption`], [`PolicyDecision`], [`DirectiveItem`]):
//!   recommendations, approvals, and published directives.
//!
//! This is a pure types crate. Wire names are camelCase to match the feeds
//! and dashboards that consume these records.

#![deny(unsafe_code)]

mod crisis;
mod error;
mod model;
mod policy;
mod prediction;
mod snapshot;

pub use crisis::*;
pub use error::*;
pub use model::*;
pub use policy::*;
pub use prediction::*;
pub use snapshot::*;
