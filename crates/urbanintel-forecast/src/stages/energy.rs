use tracing::debug;
use urbanintel_types::{CityData, EnergyPricePrediction, ValidationError};

use crate::confidence::{ConfidencePolicy, Stage};

/// Current tariff per unit, ₹.
pub const BASE_ENERGY_RATE: f64 = 6.50;

/// Tariff after a percentage increase, rounded to paise.
pub fn projected_rate(price_change_percent: u32) -> f64 {
    let rate = BASE_ENERGY_RATE * (1.0 + f64::from(price_change_percent) / 100.0);
    (rate * 100.0).round() / 100.0
}

fn divisor(field: &str, value: f64) -> Result<f64, ValidationError> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::new(field, "must be greater than zero"))
    }
}

/// Forecast tariff movement from consumption growth and grid headroom.
pub fn predict_energy_price(
    data: &CityData,
    confidence: ConfidencePolicy,
) -> Result<EnergyPricePrediction, ValidationError> {
    let energy = &data.energy;
    let avg_usage = divisor("energy.avgUsageLastYear", energy.avg_usage_last_year)?;
    let peak_demand = divisor("energy.peakDemandMW", energy.peak_demand_mw)?;

    let usage_increase_pct = (energy.current_usage_mw - avg_usage) / avg_usage * 100.0;
    let demand_stress = energy.current_usage_mw / peak_demand;

    let mut price_change_percent = 0u32;
    let mut clauses: Vec<String> = Vec::new();

    if usage_increase_pct > 20.0 {
        price_change_percent += 12;
        clauses.push(format!(
            "Energy consumption up {}% from last year average.",
            super::whole(usage_increase_pct)
        ));
    } else if usage_increase_pct > 10.0 {
        price_change_percent += 6;
        clauses.push(format!(
            "Moderate increase in energy demand ({}%).",
            super::whole(usage_increase_pct)
        ));
    }

    if demand_stress > 0.9 {
        price_change_percent += 8;
        clauses.push(format!(
            "Grid operating at {}% of peak capacity.",
            super::whole(demand_stress * 100.0)
        ));
    }

    if energy.grid_stability < 90.0 {
        price_change_percent += 5;
        clauses.push(format!(
            "Grid stability at {}% requiring additional infrastructure costs.",
            super::whole(energy.grid_stability)
        ));
    }

    let reason = if price_change_percent == 0 {
        "Stable energy supply and demand. No significant price changes expected.".to_string()
    } else {
        clauses.join(" ")
    };

    debug!(
        snapshot = %data.id,
        price_change_percent,
        usage_increase_pct,
        demand_stress,
        "energy price forecast"
    );

    Ok(EnergyPricePrediction {
        price_change_percent,
        current_rate: BASE_ENERGY_RATE,
        predicted_rate: projected_rate(price_change_percent),
        reason,
        timeline: "Next 2-3 months".to_string(),
        confidence: confidence.score(&data.id, Stage::EnergyPrice),
    })
}
