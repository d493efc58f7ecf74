//! Analyzer configuration types and serialisation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    error::ConfigurationError,
    language::Language,
    speed::{
        DEFAULT_FACTOR, DEFAULT_READING_SPEED, DEFAULT_SPAN, ExponentialAdjustment,
        SpeedAdjustment, Unadjusted, is_usable_speed,
    },
};

/// Configuration for the reading-speed model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum SpeedConfig {
    /// Scale the baseline exponentially with the Flesch score.
    Exponential(ExponentialSpeedConfig),
    /// Use the baseline for every text.
    Constant,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self::Exponential(ExponentialSpeedConfig::default())
    }
}

impl SpeedConfig {
    /// Build the configured model.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidSpeedModel`] if the parameters are
    /// out of range.
    pub fn build(self) -> Result<Arc<dyn SpeedAdjustment>, ConfigurationError> {
        match self {
            Self::Exponential(cfg) => {
                let cfg = cfg.validate()?;
                ExponentialAdjustment::new(cfg.factor, cfg.span)
                    .map(|model| Arc::new(model) as Arc<dyn SpeedAdjustment>)
                    .ok_or_else(|| {
                        ConfigurationError::InvalidSpeedModel(format!(
                            "factor {} and span {} are not usable",
                            cfg.factor, cfg.span
                        ))
                    })
            }
            Self::Constant => Ok(Arc::new(Unadjusted)),
        }
    }
}

/// Parameters of the exponential speed model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExponentialSpeedConfig {
    /// Ratio between the speeds at `score = span` and `score = 0`; must be
    /// greater than zero.
    #[serde(default = "default_factor")]
    pub factor: f64,
    /// Score at which the baseline is multiplied by `sqrt(factor)`; must be
    /// greater than zero.
    #[serde(default = "default_span")]
    pub span: f64,
}

fn default_factor() -> f64 {
    DEFAULT_FACTOR
}

fn default_span() -> f64 {
    DEFAULT_SPAN
}

impl Default for ExponentialSpeedConfig {
    fn default() -> Self {
        Self {
            factor: DEFAULT_FACTOR,
            span: DEFAULT_SPAN,
        }
    }
}

impl ExponentialSpeedConfig {
    /// Ensure the configuration values are within acceptable bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if `factor` or `span` is not a positive finite number.
    #[must_use = "Validation should not be ignored"]
    pub fn validate(self) -> Result<Self, ConfigurationError> {
        if !is_usable_speed(self.factor) {
            Err(ConfigurationError::InvalidSpeedModel(format!(
                "factor must be finite and greater than 0, got {}",
                self.factor
            )))
        } else if !is_usable_speed(self.span) {
            Err(ConfigurationError::InvalidSpeedModel(format!(
                "span must be finite and greater than 0, got {}",
                self.span
            )))
        } else {
            Ok(self)
        }
    }
}

/// Start-up settings for an [`Analyzer`](crate::analyzer::Analyzer).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalyzerSettings {
    #[serde(default)]
    pub language: Language,
    /// Default baseline in words per minute.
    #[serde(default = "default_reading_speed")]
    pub base_reading_speed: f64,
    #[serde(default)]
    pub speed: SpeedConfig,
}

fn default_reading_speed() -> f64 {
    DEFAULT_READING_SPEED
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            language: Language::default(),
            base_reading_speed: DEFAULT_READING_SPEED,
            speed: SpeedConfig::default(),
        }
    }
}

impl AnalyzerSettings {
    /// Ensure the configuration values are within acceptable bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if the reading speed or the speed model is invalid.
    #[must_use = "Validation should not be ignored"]
    pub fn validate(self) -> Result<Self, ConfigurationError> {
        if !is_usable_speed(self.base_reading_speed) {
            return Err(ConfigurationError::InvalidReadingSpeed(
                self.base_reading_speed,
            ));
        }
        if let SpeedConfig::Exponential(cfg) = self.speed {
            cfg.validate()?;
        }
        Ok(self)
    }
}
