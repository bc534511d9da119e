//! Prediction engine strategy.

use urbanintel_types::{AllPredictions, CityData};

use crate::aggregate::generate_all_predictions_with;
use crate::confidence::ConfidencePolicy;
use crate::error::ForecastError;

/// Produces a forecast bundle from one snapshot.
///
/// Implementations must be deterministic for a given snapshot and must not
/// return partial bundles.
pub trait PredictionEngine: Send + Sync {
    /// Short identifier used in logs and reports.
    fn name(&self) -> &str;

    fn predict(&self, city: &CityData) -> Result<AllPredictions, ForecastError>;
}

/// Threshold rules only.
#[derive(Clone, Debug, Default)]
pub struct RuleEngine {
    confidence: ConfidencePolicy,
}

impl RuleEngine {
    pub fn new(confidence: ConfidencePolicy) -> Self {
        Self { confidence }
    }

    pub fn confidence(&self) -> ConfidencePolicy {
        self.confidence
    }
}

impl PredictionEngine for RuleEngine {
    fn name(&self) -> &str {
        "rules"
    }

    fn predict(&self, city: &CityData) -> Result<AllPredictions, ForecastError> {
        Ok(generate_all_predictions_with(city, self.confidence)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::baseline;

    #[test]
    fn rule_engine_matches_aggregator() {
        let data = baseline();
        let engine = RuleEngine::default();
        assert_eq!(engine.name(), "rules");
        assert_eq!(
            engine.predict(&data).unwrap(),
            crate::generate_all_predictions(&data).unwrap()
        );
    }

    #[test]
    fn validation_surfaces_as_forecast_error() {
        let mut data = baseline();
        data.transportation.peak_hour_multiplier = 0.5;
        let err = RuleEngine::default().predict(&data).unwrap_err();
        match err {
            ForecastError::Validation(v) => assert_eq!(v.field, "transportation.peakHourMultiplier"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn engines_are_object_safe() {
        let engines: Vec<Box<dyn PredictionEngine>> =
            vec![Box::new(RuleEngine::new(ConfidencePolicy::Fixed(90)))];
        let predictions = engines[0].predict(&baseline()).unwrap();
        assert_eq!(predictions.traffic.confidence, 90);
    }
}
