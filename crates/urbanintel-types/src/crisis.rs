//! Overall crisis classification of a run.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a crisis, ordered from least to most severe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CrisisType {
    WaterCrisis,
    FoodSupplyCrisis,
    SupplyShortage,
    TrafficGridlock,
    PostStormRecovery,
    ResourceStress,
    Normal,
}

impl CrisisType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CrisisType::WaterCrisis => "WATER_CRISIS",
            CrisisType::FoodSupplyCrisis => "FOOD_SUPPLY_CRISIS",
            CrisisType::SupplyShortage => "SUPPLY_SHORTAGE",
            CrisisType::TrafficGridlock => "TRAFFIC_GRIDLOCK",
            CrisisType::PostStormRecovery => "POST_STORM_RECOVERY",
            CrisisType::ResourceStress => "RESOURCE_STRESS",
            CrisisType::Normal => "NORMAL",
        }
    }

    /// The severity every crisis of this type is reported with.
    pub fn severity(&self) -> Severity {
        match self {
            CrisisType::WaterCrisis | CrisisType::FoodSupplyCrisis => Severity::Critical,
            CrisisType::SupplyShortage | CrisisType::TrafficGridlock => Severity::High,
            CrisisType::PostStormRecovery | CrisisType::ResourceStress => Severity::Medium,
            CrisisType::Normal => Severity::Low,
        }
    }
}

impl fmt::Display for CrisisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single (type, severity) pair reported for a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CrisisAssessment {
    #[serde(rename = "type")]
    pub crisis_type: CrisisType,
    pub severity: Severity,
}

impl From<CrisisType> for CrisisAssessment {
    fn from(crisis_type: CrisisType) -> Self {
        Self {
            crisis_type,
            severity: crisis_type.severity(),
        }
    }
}
