#![deny(unsafe_code)]
//! UrbanIntel operator console.
//!
//! This crate provides:
//! - **Orchestration** ([`CityConsole`]): one forecast cycle at a time, with
//!   rule-engine fallback when the primary engine is unavailable.
//! - **Decision ledger** ([`DecisionLedger`], [`InMemoryDecisionLedger`]):
//!   append-only record of approved options.
//! - **Directive board** ([`DirectiveBoard`]): the active directive and a
//!   bounded history of retired ones.

pub mod console;
pub mod directive;
pub mod error;
pub mod ledger;

pub use console::{CityConsole, CycleReport, EngineMode};
pub use directive::{ActiveDirective, DirectiveBoard, DIRECTIVE_HISTORY_LIMIT};
pub use error::{ConsoleError, LedgerError};
pub use ledger::{ApprovalRequest, DecisionLedger, InMemoryDecisionLedger};
