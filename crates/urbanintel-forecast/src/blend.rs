//! Model-output blending engine.
//!
//! Runs the rule engine, then pulls each headline number toward the value an
//! external model produced for the same snapshot. Text fields stay rule-based
//! apart from a note that the figure was blended. The food forecast is
//! re-derived from the blended water outlook before its own blend.

use serde::{Deserialize, Serialize};
use tracing::debug;
use urbanintel_types::{clamp_percent, AllPredictions, CityData, ModelOutputs, WaterStatus};

use crate::engine::{PredictionEngine, RuleEngine};
use crate::error::ForecastError;
use crate::stages::{predict_food_price, projected_rate, ROUTINE_MAINTENANCE, STORM_WORK};

/// Supplies model outputs for a snapshot.
pub trait ModelOutputSource: Send + Sync {
    fn outputs(&self, city: &CityData) -> Result<ModelOutputs, ForecastError>;
}

/// A source that returns the same outputs for every snapshot, or reports
/// the model as unavailable.
#[derive(Clone, Debug)]
pub struct StaticModelOutputs {
    outputs: Result<ModelOutputs, String>,
}

impl StaticModelOutputs {
    pub fn new(outputs: ModelOutputs) -> Self {
        Self {
            outputs: Ok(outputs),
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            outputs: Err(reason.into()),
        }
    }
}

impl ModelOutputSource for StaticModelOutputs {
    fn outputs(&self, _city: &CityData) -> Result<ModelOutputs, ForecastError> {
        self.outputs
            .clone()
            .map_err(ForecastError::ModelUnavailable)
    }
}

/// Blend settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlendConfig {
    /// Share of the model value in the blended figure, 0.0 to 1.0.
    #[serde(default = "default_model_weight")]
    pub model_weight: f64,
    /// Blended cleanup probability, in percent, at or above which cleanup is flagged.
    #[serde(default = "default_cleanup_threshold")]
    pub cleanup_threshold: f64,
}

fn default_model_weight() -> f64 {
    0.5
}

fn default_cleanup_threshold() -> f64 {
    50.0
}

impl Default for BlendConfig {
    fn default() -> Self {
        Self {
            model_weight: default_model_weight(),
            cleanup_threshold: default_cleanup_threshold(),
        }
    }
}

/// Water status implied by a blended shortage level.
pub fn status_for_level(level: u8) -> WaterStatus {
    match level {
        75.. => WaterStatus::Critical,
        40..=74 => WaterStatus::Shortage,
        10..=39 => WaterStatus::Normal,
        _ => WaterStatus::Abundant,
    }
}

fn duration_for(status: WaterStatus) -> &'static str {
    match status {
        WaterStatus::Critical => "2-3 months",
        WaterStatus::Shortage => "1 month",
        WaterStatus::Normal | WaterStatus::Abundant => "N/A",
    }
}

/// Rule engine output blended with an external model.
pub struct ModelBlendEngine<S> {
    rules: RuleEngine,
    source: S,
    config: BlendConfig,
}

impl<S: ModelOutputSource> ModelBlendEngine<S> {
    pub fn new(rules: RuleEngine, source: S) -> Self {
        Self::with_config(rules, source, BlendConfig::default())
    }

    /// The weight is clamped into `[0, 1]`; a non-finite weight falls back to the default.
    pub fn with_config(rules: RuleEngine, source: S, mut config: BlendConfig) -> Self {
        config.model_weight = if config.model_weight.is_finite() {
            config.model_weight.clamp(0.0, 1.0)
        } else {
            default_model_weight()
        };
        Self {
            rules,
            source,
            config,
        }
    }

    pub fn config(&self) -> BlendConfig {
        self.config
    }

    fn mix(&self, rule: f64, model: f64) -> f64 {
        let w = self.config.model_weight;
        rule * (1.0 - w) + model * w
    }
}

fn check_finite(outputs: &ModelOutputs) -> Result<(), ForecastError> {
    let fields = [
        ("waterShortageLevel", outputs.water_shortage_level),
        ("trafficCongestionLevel", outputs.traffic_congestion_level),
        ("foodPriceChangePercent", outputs.food_price_change_percent),
        ("energyPriceChangePercent", outputs.energy_price_change_percent),
        ("publicCleanupNeeded", outputs.public_cleanup_needed),
    ];
    match fields.iter().find(|(_, value)| !value.is_finite()) {
        Some((name, _)) => Err(ForecastError::ModelUnavailable(format!(
            "model returned a non-finite {name}"
        ))),
        None => Ok(()),
    }
}

fn non_negative_whole(value: f64) -> u32 {
    // Saturating cast; negatives floor at zero.
    value.max(0.0).round() as u32
}

impl<S: ModelOutputSource> PredictionEngine for ModelBlendEngine<S> {
    fn name(&self) -> &str {
        "model-blend"
    }

    fn predict(&self, city: &CityData) -> Result<AllPredictions, ForecastError> {
        let outputs = self.source.outputs(city)?;
        check_finite(&outputs)?;
        let mut predictions = self.rules.predict(city)?;

        let water = &mut predictions.water_supply;
        let level = clamp_percent(self.mix(
            f64::from(water.shortage_level),
            outputs.water_shortage_level,
        ));
        water.shortage_level = level;
        water.status = status_for_level(level);
        water.shortage_duration = duration_for(water.status).to_string();
        water.reason = format!(
            "{} Blended with model estimate of {}% shortage.",
            water.reason,
            clamp_percent(outputs.water_shortage_level)
        );

        let traffic = &mut predictions.traffic;
        traffic.congestion_level = clamp_percent(self.mix(
            f64::from(traffic.congestion_level),
            outputs.traffic_congestion_level,
        ));
        traffic.reason = format!(
            "{} (blended with model estimate of {}% congestion)",
            traffic.reason,
            clamp_percent(outputs.traffic_congestion_level)
        );

        // Food depends on the water outlook; re-derive it from the blended one.
        predictions.food_price =
            predict_food_price(city, &predictions.water_supply, self.rules.confidence());
        let food = &mut predictions.food_price;
        food.price_change_percent = non_negative_whole(self.mix(
            f64::from(food.price_change_percent),
            outputs.food_price_change_percent,
        ));
        food.reason = format!(
            "{} Blended with model estimate of {}%.",
            food.reason,
            non_negative_whole(outputs.food_price_change_percent)
        );

        let energy = &mut predictions.energy_price;
        energy.price_change_percent = non_negative_whole(self.mix(
            f64::from(energy.price_change_percent),
            outputs.energy_price_change_percent,
        ));
        energy.predicted_rate = projected_rate(energy.price_change_percent);
        energy.reason = format!(
            "{} Blended with model estimate of {}%.",
            energy.reason,
            non_negative_whole(outputs.energy_price_change_percent)
        );

        let services = &mut predictions.public_services;
        if !services.cleanup_needed && outputs.public_cleanup_needed >= self.config.cleanup_threshold {
            services.cleanup_needed = true;
            services.cleanup_reason = Some(format!(
                "Model estimates {}% likelihood of storm debris and road damage",
                clamp_percent(outputs.public_cleanup_needed)
            ));
            services.cleanup_duration = Some("15 days".to_string());
            let mut improvements: Vec<String> = STORM_WORK.iter().map(|w| w.to_string()).collect();
            improvements.extend(
                services
                    .quality_improvements
                    .drain(..)
                    .filter(|item| item != ROUTINE_MAINTENANCE),
            );
            services.quality_improvements = improvements;
        }

        debug!(
            snapshot = %city.id,
            weight = self.config.model_weight,
            water = predictions.water_supply.status.as_str(),
            congestion = predictions.traffic.congestion_level,
            cleanup = predictions.public_services.cleanup_needed,
            "model outputs blended"
        );

        Ok(predictions)
    }
}
