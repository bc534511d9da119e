//! City snapshots: one immutable reading of every sensor feed.
//!
//! A [`CityData`] is produced once per refresh cycle by an external source
//! (or the sample generator) and is never mutated afterwards. Forecast stages
//! take it by shared reference.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Number of monthly totals carried in [`Weather::rainfall_last_12_months`].
pub const RAINFALL_MONTHS: usize = 12;

/// Upper bound of the air-quality index scale.
pub const AQI_MAX: f64 = 500.0;

/// Opaque snapshot identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotId(String);

impl SnapshotId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One immutable reading of all city input data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityData {
    pub id: SnapshotId,
    pub timestamp: DateTime<Utc>,
    pub weather: Weather,
    pub transportation: Transportation,
    pub agriculture: Agriculture,
    pub energy: Energy,
    pub public_services: PublicServices,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weather {
    /// Degrees Celsius.
    pub current_temperature: f64,
    /// Relative humidity, percent.
    pub humidity: f64,
    /// km/h.
    pub wind_speed: f64,
    /// mm.
    pub current_rainfall: f64,
    /// Monthly totals in mm, oldest first.
    pub rainfall_last_12_months: Vec<f64>,
    pub recent_storm_or_flood: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storm_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aqi: Option<f64>,
}

impl Weather {
    /// Sum of the monthly rainfall totals.
    pub fn total_rainfall(&self) -> f64 {
        self.rainfall_last_12_months.iter().sum()
    }
}

/// Congested-route tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteTag {
    West,
    South,
    East,
    North,
    Central,
}

impl RouteTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteTag::West => "west",
            RouteTag::South => "south",
            RouteTag::East => "east",
            RouteTag::North => "north",
            RouteTag::Central => "central",
        }
    }
}

impl fmt::Display for RouteTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transportation {
    pub buses_operating: u32,
    pub total_buses: u32,
    /// Reported in feed order; the feed may repeat a tag.
    pub bus_routes_congested: Vec<RouteTag>,
    pub avg_vehicles_per_hour: u32,
    pub peak_hour_multiplier: f64,
}

impl Transportation {
    /// Fraction of the fleet currently in service.
    pub fn bus_ratio(&self) -> Result<f64, ValidationError> {
        if self.total_buses == 0 {
            return Err(ValidationError::new(
                "transportation.totalBuses",
                "must be greater than zero",
            ));
        }
        Ok(f64::from(self.buses_operating) / f64::from(self.total_buses))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agriculture {
    /// Percent of a normal year.
    pub crop_yield_last_year: f64,
    /// Percent of normal reserves.
    pub current_stock_level: f64,
    pub supply_chain_efficiency: f64,
    pub major_crops_affected: Vec<String>,
    pub import_dependency: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Energy {
    #[serde(rename = "currentUsageMW")]
    pub current_usage_mw: f64,
    pub avg_usage_last_year: f64,
    #[serde(rename = "peakDemandMW")]
    pub peak_demand_mw: f64,
    pub grid_stability: f64,
    pub renewable_percentage: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicServices {
    pub roads_needing_repair: u32,
    /// Percent of reservoir capacity.
    pub water_supply_level: f64,
    pub sewer_system_health: f64,
    /// Minutes.
    pub emergency_response_time: f64,
    pub pending_maintenance_tasks: u32,
}

impl CityData {
    /// Check the snapshot against the input contract of the forecast stages.
    ///
    /// Percentages may exceed 100; only non-finite values, negative
    /// magnitudes, and zero divisors are rejected.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let w = &self.weather;
        finite("weather.currentTemperature", w.current_temperature)?;
        non_negative("weather.humidity", w.humidity)?;
        non_negative("weather.windSpeed", w.wind_speed)?;
        non_negative("weather.currentRainfall", w.current_rainfall)?;
        if w.rainfall_last_12_months.len() != RAINFALL_MONTHS {
            return Err(ValidationError::new(
                "weather.rainfallLast12Months",
                format!(
                    "expected {RAINFALL_MONTHS} monthly totals, got {}",
                    w.rainfall_last_12_months.len()
                ),
            ));
        }
        for month in &w.rainfall_last_12_months {
            non_negative("weather.rainfallLast12Months", *month)?;
        }
        if let Some(aqi) = w.aqi {
            non_negative("weather.aqi", aqi)?;
            if aqi > AQI_MAX {
                return Err(ValidationError::new(
                    "weather.aqi",
                    format!("must be within 0-{AQI_MAX}, got {aqi}"),
                ));
            }
        }

        let t = &self.transportation;
        t.bus_ratio()?;
        if t.buses_operating > t.total_buses {
            return Err(ValidationError::new(
                "transportation.busesOperating",
                format!(
                    "{} operating exceeds fleet of {}",
                    t.buses_operating, t.total_buses
                ),
            ));
        }
        finite("transportation.peakHourMultiplier", t.peak_hour_multiplier)?;
        if t.peak_hour_multiplier < 1.0 {
            return Err(ValidationError::new(
                "transportation.peakHourMultiplier",
                format!("must be at least 1.0, got {}", t.peak_hour_multiplier),
            ));
        }

        let a = &self.agriculture;
        non_negative("agriculture.cropYieldLastYear", a.crop_yield_last_year)?;
        non_negative("agriculture.currentStockLevel", a.current_stock_level)?;
        non_negative("agriculture.supplyChainEfficiency", a.supply_chain_efficiency)?;
        non_negative("agriculture.importDependency", a.import_dependency)?;

        let e = &self.energy;
        non_negative("energy.currentUsageMW", e.current_usage_mw)?;
        positive("energy.avgUsageLastYear", e.avg_usage_last_year)?;
        positive("energy.peakDemandMW", e.peak_demand_mw)?;
        non_negative("energy.gridStability", e.grid_stability)?;
        non_negative("energy.renewablePercentage", e.renewable_percentage)?;

        let p = &self.public_services;
        non_negative("publicServices.waterSupplyLevel", p.water_supply_level)?;
        non_negative("publicServices.sewerSystemHealth", p.sewer_system_health)?;
        non_negative(
            "publicServices.emergencyResponseTime",
            p.emergency_response_time,
        )?;

        Ok(())
    }
}

fn finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::not_finite(field))
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), ValidationError> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(ValidationError::negative(field, value));
    }
    Ok(())
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    non_negative(field, value)?;
    if value == 0.0 {
        return Err(ValidationError::new(field, "must be greater than zero"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> CityData {
        CityData {
            id: SnapshotId::new("snap-001"),
            timestamp: "2026-03-01T06:00:00Z".parse().unwrap(),
            weather: Weather {
                current_temperature: 31.0,
                humidity: 55.0,
                wind_speed: 12.0,
                current_rainfall: 4.0,
                rainfall_last_12_months: vec![125.0; 12],
                recent_storm_or_flood: false,
                storm_date: None,
                aqi: Some(110.0),
            },
            transportation: Transportation {
                buses_operating: 200,
                total_buses: 300,
                bus_routes_congested: vec![RouteTag::West],
                avg_vehicles_per_hour: 6200,
                peak_hour_multiplier: 1.8,
            },
            agriculture: Agriculture {
                crop_yield_last_year: 92.0,
                current_stock_level: 70.0,
                supply_chain_efficiency: 85.0,
                major_crops_affected: vec![],
                import_dependency: 20.0,
            },
            energy: Energy {
                current_usage_mw: 880.0,
                avg_usage_last_year: 900.0,
                peak_demand_mw: 1200.0,
                grid_stability: 95.0,
                renewable_percentage: 25.0,
            },
            public_services: PublicServices {
                roads_needing_repair: 12,
                water_supply_level: 75.0,
                sewer_system_health: 88.0,
                emergency_response_time: 11.0,
                pending_maintenance_tasks: 30,
            },
        }
    }

    #[test]
    fn well_formed_snapshot_validates() {
        assert!(snapshot().validate().is_ok());
    }

    #[test]
    fn zero_fleet_is_rejected() {
        let mut data = snapshot();
        data.transportation.total_buses = 0;
        data.transportation.buses_operating = 0;
        let err = data.validate().unwrap_err();
        assert_eq!(err.field, "transportation.totalBuses");
    }

    #[test]
    fn operating_above_fleet_is_rejected() {
        let mut data = snapshot();
        data.transportation.buses_operating = 301;
        let err = data.validate().unwrap_err();
        assert_eq!(err.field, "transportation.busesOperating");
    }

    #[test]
    fn short_rainfall_series_is_rejected() {
        let mut data = snapshot();
        data.weather.rainfall_last_12_months = vec![];
        let err = data.validate().unwrap_err();
        assert_eq!(err.field, "weather.rainfallLast12Months");
        assert!(err.message.contains("got 0"));
    }

    #[test]
    fn negative_percentage_is_rejected() {
        let mut data = snapshot();
        data.public_services.water_supply_level = -1.0;
        let err = data.validate().unwrap_err();
        assert_eq!(err.field, "publicServices.waterSupplyLevel");
    }

    #[test]
    fn zero_average_usage_is_rejected() {
        let mut data = snapshot();
        data.energy.avg_usage_last_year = 0.0;
        let err = data.validate().unwrap_err();
        assert_eq!(err.field, "energy.avgUsageLastYear");
    }

    #[test]
    fn nan_temperature_is_rejected() {
        let mut data = snapshot();
        data.weather.current_temperature = f64::NAN;
        let err = data.validate().unwrap_err();
        assert_eq!(err.field, "weather.currentTemperature");
    }

    #[test]
    fn aqi_above_scale_is_rejected() {
        let mut data = snapshot();
        data.weather.aqi = Some(650.0);
        assert_eq!(data.validate().unwrap_err().field, "weather.aqi");
    }

    #[test]
    fn abundant_percentages_are_accepted() {
        let mut data = snapshot();
        data.public_services.water_supply_level = 140.0;
        data.agriculture.crop_yield_last_year = 118.0;
        assert!(data.validate().is_ok());
    }

    #[test]
    fn sub_unit_peak_multiplier_is_rejected() {
        let mut data = snapshot();
        data.transportation.peak_hour_multiplier = 0.9;
        assert_eq!(
            data.validate().unwrap_err().field,
            "transportation.peakHourMultiplier"
        );
    }

    #[test]
    fn wire_names_match_feed() {
        let json = serde_json::to_value(snapshot()).unwrap();
        assert!(json["energy"]["currentUsageMW"].is_number());
        assert!(json["energy"]["peakDemandMW"].is_number());
        assert!(json["publicServices"]["waterSupplyLevel"].is_number());
        assert_eq!(json["transportation"]["busRoutesCongested"][0], "west");
        assert!(json["weather"].get("stormDate").is_none());
    }

    #[test]
    fn total_rainfall_sums_months() {
        assert_eq!(snapshot().weather.total_rainfall(), 1500.0);
    }
}
