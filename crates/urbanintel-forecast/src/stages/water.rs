use tracing::debug;
use urbanintel_types::{CityData, WaterStatus, WaterSupplyPrediction};

use crate::confidence::{ConfidencePolicy, Stage};

/// Normal annual rainfall, mm.
pub const NORMAL_ANNUAL_RAINFALL_MM: f64 = 1500.0;

/// Forecast water supply from 12-month rainfall and reservoir level.
///
/// Rules, first match wins:
/// - rainfall below 50% of normal or reservoir below 30% is **critical**
/// - rainfall below 70% of normal or reservoir below 50% is a **shortage**
/// - rainfall above 130% of normal is **abundant**
/// - anything else is **normal**
pub fn predict_water_supply(data: &CityData, confidence: ConfidencePolicy) -> WaterSupplyPrediction {
    let total_rainfall = data.weather.total_rainfall();
    let rainfall_pct = total_rainfall / NORMAL_ANNUAL_RAINFALL_MM * 100.0;
    let water_level = data.public_services.water_supply_level;

    let (status, shortage_level, shortage_duration, reason) =
        if rainfall_pct < 50.0 || water_level < 30.0 {
            (
                WaterStatus::Critical,
                85,
                "2-3 months",
                format!(
                    "Annual rainfall at {}% of normal ({}mm vs {}mm expected). Reservoir at {}% capacity.",
                    super::whole(rainfall_pct),
                    total_rainfall,
                    NORMAL_ANNUAL_RAINFALL_MM,
                    water_level
                ),
            )
        } else if rainfall_pct < 70.0 || water_level < 50.0 {
            (
                WaterStatus::Shortage,
                60,
                "1 month",
                format!(
                    "Below-average rainfall at {}% of normal ({}mm vs {}mm expected). Reservoir at {}% capacity. Water conservation measures needed.",
                    super::whole(rainfall_pct),
                    total_rainfall,
                    NORMAL_ANNUAL_RAINFALL_MM,
                    water_level
                ),
            )
        } else if rainfall_pct > 130.0 {
            (
                WaterStatus::Abundant,
                0,
                "N/A",
                "Above-average rainfall. Good water reserves.".to_string(),
            )
        } else {
            (
                WaterStatus::Normal,
                15,
                "N/A",
                "Normal rainfall patterns. Water supply stable.".to_string(),
            )
        };

    debug!(
        snapshot = %data.id,
        status = status.as_str(),
        rainfall_pct,
        water_level,
        "water supply forecast"
    );

    WaterSupplyPrediction {
        status,
        shortage_level,
        shortage_duration: shortage_duration.to_string(),
        reason,
        confidence: confidence.score(&data.id, Stage::WaterSupply),
    }
}
