use thiserror::Error;
use urbanintel_types::ValidationError;

/// Errors from the forecast engines.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The external model could not provide outputs for this snapshot.
    #[error("model outputs unavailable: {0}")]
    ModelUnavailable(String),
}

impl ForecastError {
    /// `true` when another engine may still succeed on the same snapshot.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ForecastError::ModelUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_is_transparent() {
        let err: ForecastError =
            ValidationError::new("energy.peakDemandMW", "must be greater than zero").into();
        assert_eq!(
            err.to_string(),
            "invalid energy.peakDemandMW: must be greater than zero"
        );
        assert!(!err.is_recoverable());
    }

    #[test]
    fn model_unavailable_is_recoverable() {
        let err = ForecastError::ModelUnavailable("connection refused".into());
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("connection refused"));
    }
}
