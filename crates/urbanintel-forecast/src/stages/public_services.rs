use tracing::debug;
use urbanintel_types::{CityData, PublicServicesPrediction};

use crate::confidence::{ConfidencePolicy, Stage};

/// Placeholder improvement when nothing else is scheduled.
pub const ROUTINE_MAINTENANCE: &str = "Routine maintenance only";

/// Work scheduled whenever storm cleanup is needed.
pub const STORM_WORK: [&str; 4] = [
    "Debris clearance",
    "Road surface repairs",
    "Drain cleaning",
    "Street light restoration",
];

/// Forecast cleanup and maintenance work.
pub fn predict_public_services(
    data: &CityData,
    confidence: ConfidencePolicy,
) -> PublicServicesPrediction {
    let services = &data.public_services;
    let weather = &data.weather;
    let mut quality_improvements: Vec<String> = Vec::new();

    let cleanup_needed = weather.recent_storm_or_flood;
    let (cleanup_reason, cleanup_duration) = if cleanup_needed {
        let when = weather
            .storm_date
            .map(|date| format!("on {}", date.format("%Y-%m-%d")))
            .unwrap_or_else(|| "last week".to_string());
        quality_improvements.extend(STORM_WORK.iter().map(|w| w.to_string()));
        (
            Some(format!(
                "Recent storm/flood {when} caused debris and road damage"
            )),
            Some("15 days".to_string()),
        )
    } else {
        (None, None)
    };

    let (road_maintenance_plan, maintenance_timeline) = if services.roads_needing_repair > 20 {
        quality_improvements.push("Pothole repairs".to_string());
        quality_improvements.push("Road resurfacing".to_string());
        (
            format!(
                "{} road segments identified for repair. Priority areas will be addressed first.",
                services.roads_needing_repair
            ),
            if services.roads_needing_repair > 35 {
                "30-45 days"
            } else {
                "15-20 days"
            },
        )
    } else {
        (
            "Regular maintenance schedule. No critical repairs needed.".to_string(),
            "Ongoing",
        )
    };

    if services.sewer_system_health < 80.0 {
        quality_improvements.push("Sewer line maintenance".to_string());
        quality_improvements.push("Drainage improvements".to_string());
    }

    if quality_improvements.is_empty() {
        quality_improvements.push(ROUTINE_MAINTENANCE.to_string());
    }

    debug!(
        snapshot = %data.id,
        cleanup_needed,
        roads = services.roads_needing_repair,
        improvements = quality_improvements.len(),
        "public services forecast"
    );

    PublicServicesPrediction {
        road_maintenance_plan,
        maintenance_timeline: maintenance_timeline.to_string(),
        cleanup_needed,
        cleanup_reason,
        cleanup_duration,
        quality_improvements,
        confidence: confidence.score(&data.id, Stage::PublicServices),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::baseline;
    use chrono::{TimeZone, Utc};

    fn predict(data: &CityData) -> PublicServicesPrediction {
        predict_public_services(data, ConfidencePolicy::Fixed(92))
    }

    #[test]
    fn quiet_city_gets_routine_sentinel() {
        let prediction = predict(&baseline());
        assert!(!prediction.cleanup_needed);
        assert_eq!(prediction.cleanup_reason, None);
        assert_eq!(prediction.cleanup_duration, None);
        assert_eq!(prediction.quality_improvements, vec![ROUTINE_MAINTENANCE]);
        assert_eq!(prediction.maintenance_timeline, "Ongoing");
    }

    #[test]
    fn dated_storm_formats_the_day() {
        let mut data = baseline();
        data.weather.recent_storm_or_flood = true;
        data.weather.storm_date = Some(Utc.with_ymd_and_hms(2024, 7, 3, 18, 30, 0).unwrap());
        let prediction = predict(&data);
        assert!(prediction.cleanup_needed);
        assert_eq!(
            prediction.cleanup_reason.as_deref(),
            Some("Recent storm/flood on 2024-07-03 caused debris and road damage")
        );
        assert_eq!(prediction.cleanup_duration.as_deref(), Some("15 days"));
        assert_eq!(&prediction.quality_improvements[..], &STORM_WORK[..]);
    }

    #[test]
    fn undated_storm_says_last_week() {
        let mut data = baseline();
        data.weather.recent_storm_or_flood = true;
        data.weather.storm_date = None;
        let reason = predict(&data).cleanup_reason.unwrap();
        assert_eq!(reason, "Recent storm/flood last week caused debris and road damage");
    }

    #[test]
    fn road_backlog_sets_timeline() {
        let mut data = baseline();
        data.public_services.roads_needing_repair = 28;
        let prediction = predict(&data);
        assert_eq!(prediction.maintenance_timeline, "15-20 days");
        assert!(prediction.road_maintenance_plan.starts_with("28 road segments"));
        assert_eq!(
            prediction.quality_improvements,
            vec!["Pothole repairs", "Road resurfacing"]
        );

        data.public_services.roads_needing_repair = 36;
        assert_eq!(predict(&data).maintenance_timeline, "30-45 days");

        data.public_services.roads_needing_repair = 20;
        assert_eq!(predict(&data).maintenance_timeline, "Ongoing");
    }

    #[test]
    fn everything_at_once_keeps_order() {
        let mut data = baseline();
        data.weather.recent_storm_or_flood = true;
        data.public_services.roads_needing_repair = 40;
        data.public_services.sewer_system_health = 72.0;
        let improvements = predict(&data).quality_improvements;
        assert_eq!(improvements.len(), 8);
        assert_eq!(improvements[0], "Debris clearance");
        assert_eq!(improvements[4], "Pothole repairs");
        assert_eq!(improvements[7], "Drainage improvements");
    }
}
