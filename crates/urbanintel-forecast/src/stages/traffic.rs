use tracing::debug;
use urbanintel_types::{
    clamp_percent, CityData, RouteTag, TrafficPrediction, ValidationError, WaterSupplyPrediction,
};

use crate::confidence::{ConfidencePolicy, Stage};

pub const PEAK_HOURS: &str = "8-10 AM, 5-8 PM";

const BASE_CONGESTION: f64 = 40.0;
const BUS_CONGESTION: f64 = 20.0;
const WEATHER_CONGESTION: f64 = 25.0;
const BUSY_FLEET_RATIO: f64 = 0.8;

/// Named roads to avoid when a bus route is congested.
fn roads_for(tag: RouteTag) -> &'static [&'static str] {
    match tag {
        RouteTag::West => &["West Ring Road", "Industrial Highway"],
        RouteTag::South => &["South Main Street", "Market Road"],
        RouteTag::East | RouteTag::North | RouteTag::Central => &[],
    }
}

/// Forecast congestion from fleet activity and weather.
///
/// `_water` is accepted so the stage keeps the same inputs as the food
/// stage; the congestion formula does not read it.
pub fn predict_traffic(
    data: &CityData,
    _water: &WaterSupplyPrediction,
    confidence: ConfidencePolicy,
) -> Result<TrafficPrediction, ValidationError> {
    let transportation = &data.transportation;
    let weather = &data.weather;
    let bus_ratio = transportation.bus_ratio()?;

    let mut congestion = BASE_CONGESTION;
    let mut affected_areas: Vec<String> = Vec::new();
    let mut roads_to_avoid: Vec<String> = Vec::new();
    let mut weather_impact = "Normal conditions".to_string();
    let mut bus_impact = "Normal bus operations".to_string();

    if bus_ratio > BUSY_FLEET_RATIO {
        congestion += BUS_CONGESTION;
        let tags: Vec<&str> = transportation
            .bus_routes_congested
            .iter()
            .map(RouteTag::as_str)
            .collect();
        affected_areas.extend(tags.iter().map(|t| t.to_string()));
        bus_impact = if tags.is_empty() {
            format!(
                "High bus activity ({}/{}) across the network",
                transportation.buses_operating, transportation.total_buses
            )
        } else {
            format!(
                "High bus activity ({}/{}) causing congestion in {} areas",
                transportation.buses_operating,
                transportation.total_buses,
                tags.join(", ")
            )
        };
        for tag in &transportation.bus_routes_congested {
            roads_to_avoid.extend(roads_for(*tag).iter().map(|r| r.to_string()));
        }
    }

    let heavy_rain = weather.current_rainfall > 30.0;
    let extreme_heat = weather.current_temperature > 40.0;
    let high_wind = weather.wind_speed > 20.0;
    if heavy_rain || extreme_heat || high_wind {
        congestion += WEATHER_CONGESTION;
        if heavy_rain {
            weather_impact = format!(
                "Heavy rainfall ({}mm) slowing traffic. Visibility reduced.",
                weather.current_rainfall
            );
            roads_to_avoid.push("Low-lying areas".to_string());
            roads_to_avoid.push("Underpass roads".to_string());
        } else if extreme_heat {
            weather_impact = format!(
                "Extreme heat ({}°C) causing road surface issues.",
                weather.current_temperature
            );
        } else {
            weather_impact = format!(
                "High winds ({} km/h) affecting vehicle stability.",
                weather.wind_speed
            );
        }
        affected_areas.push("Major highways".to_string());
        affected_areas.push("City center".to_string());
    }

    let congestion_level = clamp_percent(congestion.min(100.0));
    debug!(
        snapshot = %data.id,
        congestion_level,
        bus_ratio,
        roads = roads_to_avoid.len(),
        "traffic forecast"
    );

    Ok(TrafficPrediction {
        congestion_level,
        affected_areas: super::dedup_ordered(affected_areas),
        peak_hours: PEAK_HOURS.to_string(),
        roads_to_avoid,
        reason: format!(
            "Based on {} vehicles/hour with {}% peak increase",
            transportation.avg_vehicles_per_hour,
            super::whole(transportation.peak_hour_multiplier * 100.0 - 100.0)
        ),
        weather_impact,
        bus_impact,
        confidence: confidence.score(&data.id, Stage::Traffic),
    })
}
