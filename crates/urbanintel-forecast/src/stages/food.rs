use tracing::debug;
use urbanintel_types::{CityData, FoodPricePrediction, WaterSupplyPrediction};

use crate::confidence::{ConfidencePolicy, Stage};

/// Annual rainfall below which crop yields are treated as depressed, mm.
///
/// Kept separate from the water stage's normal-rainfall constant; the two
/// are tuned independently.
pub const LOW_RAINFALL_MM: f64 = 1050.0;

const LOW_STOCK_PCT: f64 = 50.0;
const SLOW_SUPPLY_CHAIN_PCT: f64 = 70.0;

/// Forecast food price movement from harvest, stock and the water outlook.
pub fn predict_food_price(
    data: &CityData,
    water: &WaterSupplyPrediction,
    confidence: ConfidencePolicy,
) -> FoodPricePrediction {
    let agriculture = &data.agriculture;
    let total_rainfall = data.weather.total_rainfall();
    let crop_yield = super::whole(agriculture.crop_yield_last_year);
    let stock = super::whole(agriculture.current_stock_level);

    let mut price_change_percent = 0u32;
    let mut clauses: Vec<String> = Vec::new();
    let mut affected_items: Vec<String> = Vec::new();
    let mut supply_status = "Normal supply levels".to_string();

    if total_rainfall < LOW_RAINFALL_MM {
        price_change_percent += 15;
        clauses.push(format!(
            "Low rainfall over past year ({total_rainfall}mm) reduced crop yield to {crop_yield}%."
        ));
        affected_items.extend(agriculture.major_crops_affected.iter().cloned());
        supply_status = format!("Crop yield at {crop_yield}% of normal");
    }

    if agriculture.current_stock_level < LOW_STOCK_PCT {
        price_change_percent += 10;
        clauses.push(format!("Current stock at {stock}% of normal reserves."));
        affected_items.push("Vegetables".to_string());
        affected_items.push("Pulses".to_string());
        supply_status.push_str(&format!(". Stock reserves low at {stock}%"));
    }

    if agriculture.supply_chain_efficiency < SLOW_SUPPLY_CHAIN_PCT {
        price_change_percent += 8;
        clauses.push(format!(
            "Supply chain efficiency at {}% causing delays.",
            super::whole(agriculture.supply_chain_efficiency)
        ));
    }

    if water.status.is_deficit() {
        price_change_percent += 5;
        clauses.push("Water shortage affecting food production.".to_string());
    }

    let reason = if price_change_percent == 0 {
        supply_status = "Healthy stock levels and supply chain".to_string();
        "Stable agricultural conditions and supply chain.".to_string()
    } else {
        clauses.join(" ")
    };

    debug!(
        snapshot = %data.id,
        price_change_percent,
        total_rainfall,
        water_status = water.status.as_str(),
        "food price forecast"
    );

    FoodPricePrediction {
        price_change_percent,
        affected_items: super::dedup_ordered(affected_items),
        reason,
        timeline: "Next 1-2 months".to_string(),
        supply_status,
        confidence: confidence.score(&data.id, Stage::FoodPrice),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{baseline, with_annual_rainfall};
    use crate::stages::predict_water_supply;

    fn predict(data: &CityData) -> FoodPricePrediction {
        let water = predict_water_supply(data, ConfidencePolicy::Fixed(90));
        predict_food_price(data, &water, ConfidencePolicy::Fixed(80))
    }

    #[test]
    fn healthy_harvest_is_stable() {
        let prediction = predict(&baseline());
        assert_eq!(prediction.price_change_percent, 0);
        assert_eq!(prediction.reason, "Stable agricultural conditions and supply chain.");
        assert_eq!(prediction.supply_status, "Healthy stock levels and supply chain");
        assert!(prediction.affected_items.is_empty());
        assert_eq!(prediction.timeline, "Next 1-2 months");
    }

    #[test]
    fn dry_year_with_low_stock_compounds() {
        let mut data = with_annual_rainfall(baseline(), 1000.0);
        data.agriculture.crop_yield_last_year = 68.4;
        data.agriculture.current_stock_level = 42.0;
        data.agriculture.major_crops_affected =
            vec!["Rice".into(), "Vegetables".into(), "Wheat".into()];

        let prediction = predict(&data);
        // 1000mm is 67% of normal, so the water stage reports a shortage too.
        assert_eq!(prediction.price_change_percent, 15 + 10 + 5);
        assert_eq!(
            prediction.affected_items,
            vec!["Rice", "Vegetables", "Wheat", "Pulses"]
        );
        assert_eq!(
            prediction.supply_status,
            "Crop yield at 68% of normal. Stock reserves low at 42%"
        );
        assert_eq!(
            prediction.reason,
            "Low rainfall over past year (1000mm) reduced crop yield to 68%. \
             Current stock at 42% of normal reserves. \
             Water shortage affecting food production."
        );
    }

    #[test]
    fn low_rainfall_boundary() {
        // 1040mm is 69% of normal: low for crops and a shortage for water.
        let data = with_annual_rainfall(baseline(), 1040.0);
        assert_eq!(predict(&data).price_change_percent, 20);

        let data = with_annual_rainfall(baseline(), 1050.0);
        assert_eq!(predict(&data).price_change_percent, 0);
    }

    #[test]
    fn reservoir_shortage_without_dry_year() {
        let mut data = with_annual_rainfall(baseline(), 1060.0);
        data.public_services.water_supply_level = 45.0;
        let prediction = predict(&data);
        assert_eq!(prediction.price_change_percent, 5);
        assert_eq!(prediction.supply_status, "Normal supply levels");
    }

    #[test]
    fn slow_supply_chain_only_adds_a_clause() {
        let mut data = baseline();
        data.agriculture.supply_chain_efficiency = 64.6;
        let prediction = predict(&data);
        assert_eq!(prediction.price_change_percent, 8);
        assert_eq!(prediction.reason, "Supply chain efficiency at 65% causing delays.");
        assert_eq!(prediction.supply_status, "Normal supply levels");
        assert!(prediction.affected_items.is_empty());
    }

    #[test]
    fn critical_reservoir_alone_raises_prices() {
        let mut data = baseline();
        data.public_services.water_supply_level = 20.0;
        let prediction = predict(&data);
        assert_eq!(prediction.price_change_percent, 5);
        assert_eq!(prediction.reason, "Water shortage affecting food production.");
    }
}
