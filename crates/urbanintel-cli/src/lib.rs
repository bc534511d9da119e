//! UrbanIntel command-line support.
//!
//! Configuration loading and the `sample`, `run` and `approve` commands used
//! by the `urbanintel` binary.

#![deny(unsafe_code)]

pub mod commands;
pub mod config;
pub mod error;

pub use commands::{ApprovalOutcome, SnapshotSource};
pub use config::{CliConfig, EngineConfig, LoggingConfig, SampleConfig};
pub use error::{CliError, CliResult};
