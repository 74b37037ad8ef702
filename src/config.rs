//! Configuration management for the fraud detection simulator

use crate::error::ConfigError;
use crate::types::assessment::{ClassificationThresholds, MAX_RISK_SCORE};
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Prefix for environment overrides, e.g. `UPI_FRAUD__GENERATOR__SEED=7`
pub const ENV_PREFIX: &str = "UPI_FRAUD";

/// Longest back-date window a generator accepts (one day)
pub const MAX_BACKDATE_SECS: u64 = 86_400;

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub generator: GeneratorConfig,
    pub detection: DetectionConfig,
    pub dashboard: DashboardConfig,
    pub logging: LoggingConfig,
}

/// Synthetic transaction generator configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Probability of drawing from the fraud-leaning profile
    pub fraud_pattern_rate: f64,
    /// Generated timestamps fall up to this many seconds in the past
    pub max_backdate_secs: u64,
    /// Fixed seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            fraud_pattern_rate: 0.3,
            max_backdate_secs: 300,
            seed: None,
        }
    }
}

/// Detection configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct DetectionConfig {
    /// Classification thresholds applied to the saturated score
    pub thresholds: ClassificationThresholds,
}

/// Dashboard configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Number of most recent transactions rendered
    pub display_limit: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self { display_limit: 10 }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default location, falling back to
    /// built-in defaults when the file is absent
    pub fn load() -> Result<Self> {
        Self::build(File::with_name("config/default").required(false))
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::build(File::from(path.as_ref()))
    }

    fn build<S>(file: S) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let app_config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        app_config.validate()?;
        Ok(app_config)
    }

    /// Check value ranges the type system cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rate = self.generator.fraud_pattern_rate;
        if !(0.0..=1.0).contains(&rate) {
            return Err(ConfigError::InvalidFraudRate(rate));
        }

        let backdate = self.generator.max_backdate_secs;
        if backdate > MAX_BACKDATE_SECS {
            return Err(ConfigError::InvalidBackdate {
                got: backdate,
                max: MAX_BACKDATE_SECS,
            });
        }

        let ClassificationThresholds { suspicious, fraud } = self.detection.thresholds;
        if suspicious >= fraud || fraud > MAX_RISK_SCORE {
            return Err(ConfigError::InvalidThresholds { suspicious, fraud });
        }

        if self.dashboard.display_limit == 0 {
            return Err(ConfigError::EmptyDisplay);
        }

        Ok(())
    }
}
