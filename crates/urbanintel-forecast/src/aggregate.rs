//! Runs the stage predictors in dependency order.

use tracing::debug;
use urbanintel_types::{AllPredictions, CityData, ValidationError};

use crate::confidence::ConfidencePolicy;
use crate::stages::{
    predict_energy_price, predict_food_price, predict_public_services, predict_traffic,
    predict_water_supply,
};

/// Validate `data` and derive all five forecasts with derived confidence.
pub fn generate_all_predictions(data: &CityData) -> Result<AllPredictions, ValidationError> {
    generate_all_predictions_with(data, ConfidencePolicy::Derived)
}

/// Like [`generate_all_predictions`] with an explicit confidence policy.
///
/// Water supply runs first because traffic and food consume it. Nothing is
/// returned unless every stage succeeds.
pub fn generate_all_predictions_with(
    data: &CityData,
    confidence: ConfidencePolicy,
) -> Result<AllPredictions, ValidationError> {
    data.validate()?;

    let water_supply = predict_water_supply(data, confidence);
    let traffic = predict_traffic(data, &water_supply, confidence)?;
    let food_price = predict_food_price(data, &water_supply, confidence);
    let energy_price = predict_energy_price(data, confidence)?;
    let public_services = predict_public_services(data, confidence);

    debug!(
        snapshot = %data.id,
        water = water_supply.status.as_str(),
        congestion = traffic.congestion_level,
        food_pct = food_price.price_change_percent,
        energy_pct = energy_price.price_change_percent,
        cleanup = public_services.cleanup_needed,
        "predictions generated"
    );

    Ok(AllPredictions {
        water_supply,
        traffic,
        food_price,
        energy_price,
        public_services,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::baseline;
    use urbanintel_types::{SnapshotId, WaterStatus};

    #[test]
    fn same_snapshot_same_bundle() {
        let data = baseline();
        let first = generate_all_predictions(&data).unwrap();
        let second = generate_all_predictions(&data).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn confidence_follows_snapshot_id() {
        let a = baseline();
        let mut b = baseline();
        b.id = SnapshotId::new("another-snapshot");
        let pa = generate_all_predictions(&a).unwrap();
        let pb = generate_all_predictions(&b).unwrap();
        // Only confidence may differ between the two.
        assert_eq!(pa.water_supply.status, pb.water_supply.status);
        assert_eq!(pa.traffic.congestion_level, pb.traffic.congestion_level);
        assert_eq!(pa.food_price.reason, pb.food_price.reason);
    }

    #[test]
    fn invalid_snapshot_yields_nothing() {
        let mut data = baseline();
        data.weather.rainfall_last_12_months.pop();
        let err = generate_all_predictions(&data).unwrap_err();
        assert_eq!(err.field, "weather.rainfallLast12Months");
    }

    #[test]
    fn fixed_policy_applies_to_every_stage() {
        let predictions =
            generate_all_predictions_with(&baseline(), ConfidencePolicy::Fixed(77)).unwrap();
        assert_eq!(predictions.water_supply.confidence, 77);
        assert_eq!(predictions.traffic.confidence, 77);
        assert_eq!(predictions.food_price.confidence, 77);
        assert_eq!(predictions.energy_price.confidence, 77);
        assert_eq!(predictions.public_services.confidence, 77);
        assert_eq!(predictions.water_supply.status, WaterStatus::Normal);
    }
}
