//! Seeded snapshot generator.
//!
//! Produces plausible monsoon-climate readings for demos and tests. The same
//! seed and timestamp always yield the same snapshot, id included.

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;
use urbanintel_types::{
    Agriculture, CityData, Energy, PublicServices, RouteTag, SnapshotId, Transportation, Weather,
};

use crate::stages::LOW_RAINFALL_MM;

/// Typical monthly rainfall, mm, before noise.
const RAINFALL_PATTERN: [f64; 12] = [
    15.0, 20.0, 35.0, 80.0, 150.0, 300.0, 350.0, 280.0, 180.0, 60.0, 25.0, 18.0,
];

const FLEET_SIZE: u32 = 300;
const AVG_USAGE_LAST_YEAR_MW: f64 = 900.0;

pub struct SnapshotGenerator {
    rng: StdRng,
}

impl SnapshotGenerator {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Next snapshot, stamped now.
    pub fn generate(&mut self) -> CityData {
        self.generate_at(Utc::now())
    }

    /// Next snapshot, stamped `at`.
    pub fn generate_at(&mut self, at: DateTime<Utc>) -> CityData {
        let rng = &mut self.rng;

        let rainfall_last_12_months: Vec<f64> = RAINFALL_PATTERN
            .iter()
            .map(|base| base + rng.gen_range(-20..=20) as f64)
            .collect();
        let total_rainfall: f64 = rainfall_last_12_months.iter().sum();
        let low_rainfall = total_rainfall < LOW_RAINFALL_MM;

        let recent_storm_or_flood = rng.gen_bool(0.3);
        let storm_date = if recent_storm_or_flood && rng.gen_bool(0.7) {
            Some(at - Duration::hours(rng.gen_range(1..=30 * 24)))
        } else {
            None
        };

        let weather = Weather {
            current_temperature: whole(rng.gen_range(28.0..=43.0)),
            humidity: whole(rng.gen_range(40.0..=90.0)),
            wind_speed: whole(rng.gen_range(5.0..=30.0)),
            current_rainfall: whole(rng.gen_range(0.0..=50.0)),
            rainfall_last_12_months,
            recent_storm_or_flood,
            storm_date,
            aqi: None,
        };

        let bus_routes_congested = [RouteTag::West, RouteTag::South]
            .into_iter()
            .filter(|_| rng.gen_bool(0.7))
            .collect();
        let transportation = Transportation {
            buses_operating: rng.gen_range(150..=250),
            total_buses: FLEET_SIZE,
            bus_routes_congested,
            avg_vehicles_per_hour: rng.gen_range(5000..=8000),
            peak_hour_multiplier: rng.gen_range(1.5..=2.3),
        };

        let agriculture = Agriculture {
            crop_yield_last_year: if low_rainfall {
                rng.gen_range(60.0..=80.0)
            } else {
                rng.gen_range(85.0..=100.0)
            },
            current_stock_level: whole(rng.gen_range(40.0..=90.0)),
            supply_chain_efficiency: whole(rng.gen_range(60.0..=95.0)),
            major_crops_affected: if low_rainfall {
                vec!["Rice".into(), "Wheat".into(), "Cotton".into()]
            } else {
                Vec::new()
            },
            import_dependency: whole(rng.gen_range(10.0..=40.0)),
        };

        let energy = Energy {
            current_usage_mw: whole(rng.gen_range(800.0..=1200.0)),
            avg_usage_last_year: AVG_USAGE_LAST_YEAR_MW,
            peak_demand_mw: whole(rng.gen_range(1100.0..=1400.0)),
            grid_stability: whole(rng.gen_range(85.0..=100.0)),
            renewable_percentage: whole(rng.gen_range(15.0..=35.0)),
        };

        let public_services = PublicServices {
            roads_needing_repair: rng.gen_range(10..=50),
            water_supply_level: whole(rng.gen_range(40.0..=90.0)),
            sewer_system_health: whole(rng.gen_range(70.0..=95.0)),
            emergency_response_time: whole(rng.gen_range(8.0..=20.0)),
            pending_maintenance_tasks: rng.gen_range(20..=70),
        };

        let id = SnapshotId::new(
            uuid::Builder::from_random_bytes(rng.gen())
                .into_uuid()
                .to_string(),
        );
        debug!(snapshot = %id, total_rainfall, "snapshot generated");

        CityData {
            id,
            timestamp: at,
            weather,
            transportation,
            agriculture,
            energy,
            public_services,
        }
    }
}

fn whole(value: f64) -> f64 {
    value.round()
}
