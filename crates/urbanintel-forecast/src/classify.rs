//! Crisis classification of a forecast bundle.

use urbanintel_types::{AllPredictions, CityData, CrisisAssessment, CrisisType, WaterStatus};

/// Map a forecast bundle to the single crisis reported for the run.
///
/// Rules, evaluated in priority order:
/// - **WATER_CRISIS**: water status is critical.
/// - **FOOD_SUPPLY_CRISIS**: food prices rise more than 25%.
/// - **SUPPLY_SHORTAGE**: water shortage, or food prices rise more than 15%.
/// - **TRAFFIC_GRIDLOCK**: congestion above 80.
/// - **POST_STORM_RECOVERY**: storm cleanup is needed.
/// - **RESOURCE_STRESS**: energy prices rise more than 10%, or congestion above 60.
/// - **NORMAL** otherwise.
///
/// The snapshot is accepted for parity with the synthesizer; only the
/// forecasts are read.
pub fn get_crisis_type(_data: &CityData, predictions: &AllPredictions) -> CrisisAssessment {
    let water = predictions.water_supply.status;
    let congestion = predictions.traffic.congestion_level;
    let food_pct = predictions.food_price.price_change_percent;

    let crisis = if water == WaterStatus::Critical {
        CrisisType::WaterCrisis
    } else if food_pct > 25 {
        CrisisType::FoodSupplyCrisis
    } else if water == WaterStatus::Shortage || food_pct > 15 {
        CrisisType::SupplyShortage
    } else if congestion > 80 {
        CrisisType::TrafficGridlock
    } else if predictions.public_services.cleanup_needed {
        CrisisType::PostStormRecovery
    } else if predictions.energy_price.price_change_percent > 10 || congestion > 60 {
        CrisisType::ResourceStress
    } else {
        CrisisType::Normal
    };

    CrisisAssessment::from(crisis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::generate_all_predictions;
    use crate::fixtures::baseline;
    use urbanintel_types::Severity;

    fn assess(edit: impl FnOnce(&mut AllPredictions)) -> CrisisAssessment {
        let data = baseline();
        let mut predictions = generate_all_predictions(&data).unwrap();
        edit(&mut predictions);
        get_crisis_type(&data, &predictions)
    }

    #[test]
    fn quiet_bundle_is_normal() {
        let assessment = assess(|_| {});
        assert_eq!(assessment.crisis_type, CrisisType::Normal);
        assert_eq!(assessment.severity, Severity::Low);
    }

    #[test]
    fn critical_water_outranks_food_crisis() {
        let assessment = assess(|p| {
            p.water_supply.status = WaterStatus::Critical;
            p.food_price.price_change_percent = 38;
        });
        assert_eq!(assessment.crisis_type, CrisisType::WaterCrisis);
        assert_eq!(assessment.severity, Severity::Critical);
    }

    #[test]
    fn food_thresholds() {
        let a = assess(|p| p.food_price.price_change_percent = 26);
        assert_eq!(a.crisis_type, CrisisType::FoodSupplyCrisis);
        let a = assess(|p| p.food_price.price_change_percent = 25);
        assert_eq!(a.crisis_type, CrisisType::SupplyShortage);
        assert_eq!(a.severity, Severity::High);
        let a = assess(|p| p.food_price.price_change_percent = 15);
        assert_eq!(a.crisis_type, CrisisType::Normal);
    }

    #[test]
    fn shortage_outranks_gridlock() {
        let a = assess(|p| {
            p.water_supply.status = WaterStatus::Shortage;
            p.traffic.congestion_level = 100;
        });
        assert_eq!(a.crisis_type, CrisisType::SupplyShortage);
    }

    #[test]
    fn gridlock_then_storm_then_stress() {
        let a = assess(|p| {
            p.traffic.congestion_level = 85;
            p.public_services.cleanup_needed = true;
        });
        assert_eq!(a.crisis_type, CrisisType::TrafficGridlock);

        let a = assess(|p| {
            p.traffic.congestion_level = 65;
            p.public_services.cleanup_needed = true;
        });
        assert_eq!(a.crisis_type, CrisisType::PostStormRecovery);
        assert_eq!(a.severity, Severity::Medium);

        let a = assess(|p| p.traffic.congestion_level = 65);
        assert_eq!(a.crisis_type, CrisisType::ResourceStress);

        let a = assess(|p| p.energy_price.price_change_percent = 11);
        assert_eq!(a.crisis_type, CrisisType::ResourceStress);

        let a = assess(|p| p.energy_price.price_change_percent = 10);
        assert_eq!(a.crisis_type, CrisisType::Normal);
    }
}
