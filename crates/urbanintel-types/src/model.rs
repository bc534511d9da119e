use serde::{Deserialize, Serialize};

/// Numeric outputs of an external forecasting model for one snapshot.
///
/// Field names follow the model service's JSON contract.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelOutputs {
    pub water_shortage_level: f64,
    pub traffic_congestion_level: f64,
    pub food_price_change_percent: f64,
    pub energy_price_change_percent: f64,
    /// Probability, in percent, that a public cleanup is needed.
    pub public_cleanup_needed: f64,
    /// Air-quality health class mapped onto 0, 33, 66, or 100.
    pub health_status: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_service_payload() {
        let payload = r#"{
            "waterShortageLevel": 62.5,
            "trafficCongestionLevel": 71.0,
            "foodPriceChangePercent": 12.2,
            "energyPriceChangePercent": 4.0,
            "publicCleanupNeeded": 80.0,
            "healthStatus": 33.0
        }"#;
        let outputs: ModelOutputs = serde_json::from_str(payload).unwrap();
        assert_eq!(outputs.water_shortage_level, 62.5);
        assert_eq!(outputs.health_status, 33.0);
    }
}
