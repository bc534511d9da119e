use thiserror::Error;

/// A snapshot field that cannot be fed to the forecast pipeline.
///
/// `field` is the dotted camelCase path of the offending value as it appears
/// on the wire, e.g. `transportation.totalBuses`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub(crate) fn not_finite(field: &str) -> Self {
        Self::new(field, "value must be a finite number")
    }

    pub(crate) fn negative(field: &str, value: f64) -> Self {
        Self::new(field, format!("value must not be negative, got {value}"))
    }
}
