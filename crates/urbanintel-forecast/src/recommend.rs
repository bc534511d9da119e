//! Recommendation synthesis.
//!
//! Turns a forecast bundle into at most [`MAX_OPTIONS`] policy options, most
//! urgent first. Every batch is non-empty: quiet runs are backfilled with
//! monitoring options.

use tracing::debug;
use urbanintel_types::{AllPredictions, CityData, PolicyCategory, PolicyOption, WaterStatus};

/// Upper bound on options offered per run.
pub const MAX_OPTIONS: usize = 3;

/// Options under construction. Ids are assigned on push, so they always
/// equal the option's 1-based position in the batch.
#[derive(Default)]
struct Batch {
    options: Vec<PolicyOption>,
}

impl Batch {
    fn push(
        &mut self,
        category: PolicyCategory,
        title: impl Into<String>,
        description: String,
        impact: String,
        instruction_text: String,
        based_on: &[&str],
    ) {
        let id = self.options.len() as u32 + 1;
        self.options.push(PolicyOption {
            id,
            title: title.into(),
            description,
            impact,
            instruction_text,
            category,
            based_on: based_on.iter().map(|s| s.to_string()).collect(),
        });
    }

    fn has(&self, category: PolicyCategory) -> bool {
        self.options.iter().any(|o| o.category == category)
    }

    fn len(&self) -> usize {
        self.options.len()
    }
}

/// Build the ranked option list for one run.
///
/// Candidates are considered in fixed priority order (water, traffic,
/// food, energy, public services). When fewer than [`MAX_OPTIONS`] fire, a
/// traffic-monitoring option and then an all-clear option are added unless
/// their category is already present. The result is truncated to
/// [`MAX_OPTIONS`].
pub fn generate_final_recommendations(
    _data: &CityData,
    predictions: &AllPredictions,
) -> Vec<PolicyOption> {
    let AllPredictions {
        water_supply,
        traffic,
        food_price,
        energy_price,
        public_services,
    } = predictions;
    let mut batch = Batch::default();

    if water_supply.status.is_deficit() {
        let critical = water_supply.status == WaterStatus::Critical;
        let duration = &water_supply.shortage_duration;
        let (title, description, instruction) = if critical {
            (
                "Emergency Water Rationing",
                format!(
                    "Implement strict water rationing for {duration}. Limit supply to essential services."
                ),
                format!(
                    "🚨 WATER EMERGENCY: Water supply restricted. Supply available only 4 hours/day for next {duration}. Store water for essential use."
                ),
            )
        } else {
            (
                "Water Conservation Advisory",
                "Issue water conservation advisory. Reduce non-essential water usage.".to_string(),
                "💧 WATER ADVISORY: Reduce water usage. Avoid car washing and lawn watering for next 15 days."
                    .to_string(),
            )
        };
        batch.push(
            PolicyCategory::WaterSupply,
            title,
            description,
            format!(
                "Shortage Level: {}% | Duration: {duration}",
                water_supply.shortage_level
            ),
            instruction,
            &["Weather (Rainfall)", "Water Reservoir Levels"],
        );
    }

    if traffic.congestion_level > 60 || !traffic.roads_to_avoid.is_empty() {
        let areas = traffic.affected_areas.join(", ");
        let instruction = if traffic.roads_to_avoid.is_empty() {
            format!("🚦 TRAFFIC UPDATE: Expect delays in {areas} during peak hours.")
        } else {
            format!(
                "🚗 TRAFFIC ALERT: Avoid {}. Use alternate routes. {}",
                traffic.roads_to_avoid.join(", "),
                traffic.weather_impact
            )
        };
        batch.push(
            PolicyCategory::Transportation,
            "Traffic Management & Road Advisory",
            format!(
                "Congestion at {}%. {}. {}.",
                traffic.congestion_level, traffic.weather_impact, traffic.bus_impact
            ),
            format!("Affected Areas: {areas} | Peak Hours: {}", traffic.peak_hours),
            instruction,
            &["Weather Prediction", "Bus Operations Data", "Vehicle Flow Data"],
        );
    }

    if food_price.price_change_percent > 10 {
        let pct = food_price.price_change_percent;
        let items = food_price.affected_items.join(", ");
        batch.push(
            PolicyCategory::AgricultureAndFood,
            "Food Supply & Price Advisory",
            format!(
                "Expected {pct}% price increase. {}.",
                food_price.supply_status
            ),
            format!("Affected Items: {items} | Timeline: {}", food_price.timeline),
            format!(
                "🌾 FOOD ADVISORY: Prices expected to rise {pct}% for {items}. Stock essential items. {}",
                food_price.reason
            ),
            &["Rainfall Data (12 months)", "Supply Chain Data", "Stock Levels"],
        );
    }

    if energy_price.price_change_percent > 5 {
        let pct = energy_price.price_change_percent;
        batch.push(
            PolicyCategory::Energy,
            "Energy Price & Conservation Notice",
            format!(
                "Electricity rates expected to increase from ₹{}/unit to ₹{}/unit.",
                energy_price.current_rate, energy_price.predicted_rate
            ),
            format!(
                "Price Increase: {pct}% | Timeline: {}",
                energy_price.timeline
            ),
            format!(
                "⚡ ENERGY NOTICE: Electricity rates increasing by {pct}% in {}. New rate: ₹{}/unit. Reduce consumption.",
                energy_price.timeline, energy_price.predicted_rate
            ),
            &["Previous Year Energy Usage", "Current Demand", "Grid Capacity"],
        );
    }

    if public_services.cleanup_needed || public_services.quality_improvements.len() > 1 {
        let work = public_services.quality_improvements.join(", ");
        let headline_work = public_services
            .quality_improvements
            .iter()
            .take(2)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        let cleanup_reason = public_services.cleanup_reason.as_deref().unwrap_or_default();
        let cleanup_duration = public_services
            .cleanup_duration
            .as_deref()
            .unwrap_or_default();

        let (title, description, timeline, instruction) = if public_services.cleanup_needed {
            (
                "City Cleanup & Road Improvement",
                format!("{cleanup_reason}. Cleanup duration: {cleanup_duration}."),
                cleanup_duration,
                format!(
                    "🏗️ CITY CLEANUP: Road repair and cleanup in progress for next {cleanup_duration}. Expect traffic diversions. Areas: {work}."
                ),
            )
        } else {
            (
                "Road Maintenance Plan",
                public_services.road_maintenance_plan.clone(),
                public_services.maintenance_timeline.as_str(),
                format!(
                    "🔧 MAINTENANCE: Road improvements scheduled. Work includes: {work}. Duration: {}.",
                    public_services.maintenance_timeline
                ),
            )
        };
        batch.push(
            PolicyCategory::PublicServices,
            title,
            description,
            format!("Timeline: {timeline} | Work: {headline_work}"),
            instruction,
            &["Storm/Flood Data", "Road Condition Reports", "Maintenance Backlog"],
        );
    }

    let triggered = batch.len();
    if batch.len() < MAX_OPTIONS {
        if !batch.has(PolicyCategory::Transportation) {
            batch.push(
                PolicyCategory::Transportation,
                "Continue Normal Traffic Monitoring",
                "Traffic flow within acceptable levels. Continue regular monitoring.".to_string(),
                "Status: Normal | All routes operational".to_string(),
                "✅ TRAFFIC: All roads clear. Normal traffic flow expected today.".to_string(),
                &["Current Traffic Data"],
            );
        }
        if !batch.has(PolicyCategory::General) {
            batch.push(
                PolicyCategory::General,
                "All Systems Operational",
                "City services running normally. No critical issues detected.".to_string(),
                "Status: Normal | All services operational".to_string(),
                "✅ CITY STATUS: All systems normal. Have a great day!".to_string(),
                &["All Data Sources"],
            );
        }
    }

    let mut options = batch.options;
    options.truncate(MAX_OPTIONS);
    debug!(
        triggered,
        offered = options.len(),
        "recommendations synthesized"
    );
    options
}
