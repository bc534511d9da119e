//! Configuration for the urbanintel CLI

use serde::{Deserialize, Serialize};
use urbanintel_forecast::{BlendConfig, ConfidencePolicy};

use crate::error::CliError;

/// Environment variable prefix, e.g. `URBANINTEL_ENGINE__MODEL_WEIGHT`.
pub const ENV_PREFIX: &str = "URBANINTEL";

/// Main CLI configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Forecast engine configuration
    #[serde(default)]
    pub engine: EngineConfig,

    /// Snapshot generator configuration
    #[serde(default)]
    pub sample: SampleConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Forecast engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// How confidence scores are assigned
    #[serde(default)]
    pub confidence: ConfidencePolicy,

    /// Share of the model value in blended figures
    #[serde(default = "default_model_weight")]
    pub model_weight: f64,

    /// Cleanup probability (%) at which the model flags cleanup
    #[serde(default = "default_cleanup_threshold")]
    pub cleanup_threshold: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            confidence: ConfidencePolicy::Derived,
            model_weight: default_model_weight(),
            cleanup_threshold: default_cleanup_threshold(),
        }
    }
}

impl EngineConfig {
    pub fn blend(&self) -> BlendConfig {
        BlendConfig {
            model_weight: self.model_weight,
            cleanup_threshold: self.cleanup_threshold,
        }
    }
}

/// Snapshot generator configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleConfig {
    /// Fixed seed; unset draws from OS entropy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// Default value helpers
fn default_model_weight() -> f64 {
    BlendConfig::default().model_weight
}

fn default_cleanup_threshold() -> f64 {
    BlendConfig::default().cleanup_threshold
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl CliConfig {
    /// Load configuration: defaults, then the optional file, then
    /// `URBANINTEL_*` environment variables.
    pub fn load(path: Option<&str>) -> Result<Self, CliError> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&CliConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: CliConfig = builder.build()?.try_deserialize()?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<(), CliError> {
        let weight = self.engine.model_weight;
        if !(0.0..=1.0).contains(&weight) {
            return Err(CliError::Invalid(format!(
                "engine.model_weight must be within 0.0-1.0, got {weight}"
            )));
        }
        if let ConfidencePolicy::Fixed(value) = self.engine.confidence {
            if value > 100 {
                return Err(CliError::Invalid(format!(
                    "engine.confidence value must be at most 100, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.engine.confidence, ConfidencePolicy::Derived);
        assert_eq!(config.engine.model_weight, 0.5);
        assert_eq!(config.sample.seed, None);
        assert_eq!(config.logging.level, "warn");
        assert!(!config.logging.json);
    }

    #[test]
    fn test_load_without_file() {
        let config = CliConfig::load(None).unwrap();
        assert_eq!(config.engine.model_weight, 0.5);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = write_config(
            r#"
[engine]
model_weight = 0.25
confidence = { mode = "fixed", value = 88 }

[sample]
seed = 42

[logging]
level = "debug"
json = true
"#,
        );
        let config = CliConfig::load(file.path().to_str()).unwrap();
        assert_eq!(config.engine.model_weight, 0.25);
        assert_eq!(config.engine.confidence, ConfidencePolicy::Fixed(88));
        assert_eq!(config.engine.cleanup_threshold, 50.0);
        assert_eq!(config.sample.seed, Some(42));
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn test_out_of_range_weight_rejected() {
        let file = write_config("[engine]\nmodel_weight = 1.5\n");
        let err = CliConfig::load(file.path().to_str()).unwrap_err();
        assert!(err.to_string().contains("model_weight"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(CliConfig::load(Some("/nonexistent/urbanintel.toml")).is_err());
    }

    #[test]
    fn test_blend_settings() {
        let engine = EngineConfig {
            model_weight: 0.3,
            ..EngineConfig::default()
        };
        assert_eq!(engine.blend().model_weight, 0.3);
        assert_eq!(engine.blend().cleanup_threshold, 50.0);
    }
}
