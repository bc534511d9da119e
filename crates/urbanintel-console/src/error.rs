//! Console error types.

use thiserror::Error;
use urbanintel_forecast::ForecastError;

/// Errors raised by a decision ledger.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LedgerError {
    /// Approvals must name the operator who made them.
    #[error("operator must not be empty")]
    EmptyOperator,

    /// The selected option is not part of the offered batch.
    #[error("option {0} is not part of the offered set")]
    UnknownOption(u32),

    #[error("no decision recorded with id: {0}")]
    NotFound(String),

    /// A writer panicked while holding the ledger lock.
    #[error("ledger lock poisoned")]
    Poisoned,
}

/// Errors raised by the console.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("forecast failed: {0}")]
    Forecast(#[from] ForecastError),

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Approval was attempted before any run completed.
    #[error("no completed run to approve from")]
    NoActiveRun,

    #[error("option {0} is not in the current recommendations")]
    UnknownOption(u32),
}
