//! Forecast records produced by the stage predictors.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Clamp a percentage to the 0-100 range used by progress displays.
///
/// Non-finite input maps to 0.
pub fn clamp_percent(value: f64) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}

/// Water outlook, ordered from best to worst.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaterStatus {
    Abundant,
    Normal,
    Shortage,
    Critical,
}

impl WaterStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WaterStatus::Abundant => "abundant",
            WaterStatus::Normal => "normal",
            WaterStatus::Shortage => "shortage",
            WaterStatus::Critical => "critical",
        }
    }

    /// `true` for statuses that call for conservation measures.
    pub fn is_deficit(&self) -> bool {
        matches!(self, WaterStatus::Shortage | WaterStatus::Critical)
    }
}

impl fmt::Display for WaterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterSupplyPrediction {
    pub status: WaterStatus,
    /// 0-100.
    pub shortage_level: u8,
    /// Free text such as `"1 month"`, or `"N/A"`.
    pub shortage_duration: String,
    pub reason: String,
    pub confidence: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficPrediction {
    /// 0-100, clamped.
    pub congestion_level: u8,
    /// Deduplicated, first occurrence kept.
    pub affected_areas: Vec<String>,
    pub peak_hours: String,
    /// Not deduplicated; one entry per cause.
    pub roads_to_avoid: Vec<String>,
    pub reason: String,
    pub weather_impact: String,
    pub bus_impact: String,
    pub confidence: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodPricePrediction {
    pub price_change_percent: u32,
    pub affected_items: Vec<String>,
    pub reason: String,
    pub timeline: String,
    pub supply_status: String,
    pub confidence: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyPricePrediction {
    pub price_change_percent: u32,
    /// Currency units per unit of energy.
    pub current_rate: f64,
    /// `current_rate` scaled by the change, rounded to 2 decimals.
    pub predicted_rate: f64,
    pub reason: String,
    pub timeline: String,
    pub confidence: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicServicesPrediction {
    pub road_maintenance_plan: String,
    pub maintenance_timeline: String,
    pub cleanup_needed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleanup_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleanup_duration: Option<String>,
    /// Never empty.
    pub quality_improvements: Vec<String>,
    pub confidence: u8,
}

/// The five forecasts of one run, produced together.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllPredictions {
    pub water_supply: WaterSupplyPrediction,
    pub traffic: TrafficPrediction,
    pub food_price: FoodPricePrediction,
    pub energy_price: EnergyPricePrediction,
    pub public_services: PublicServicesPrediction,
}
