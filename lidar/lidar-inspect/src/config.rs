//! Inspection tool configuration.

use std::path::Path;

use lidar_nav::SplitRatios;
use lidar_types::LengthUnit;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{InspectError, Result};

/// Configuration for an inspection session.
///
/// Loaded from TOML; every field is optional.
///
/// # Example
///
/// ```
/// use lidar_inspect::InspectConfig;
/// use lidar_types::LengthUnit;
///
/// let config = InspectConfig::from_toml_str(r#"
///     default_step = 5.0
///     default_unit = "millimeters"
///
///     [split]
///     train = 0.8
///     validation = 0.2
///     test = 0.0
///     seed = 42
/// "#).unwrap();
///
/// assert_eq!(config.default_unit, LengthUnit::Millimeters);
/// assert_eq!(config.split.unwrap().seed, Some(42));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectConfig {
    /// Step used by `move` commands that omit one. Default: 0.1
    pub default_step: f64,

    /// Unit used by `move` commands that omit one. Default: meters
    pub default_unit: LengthUnit,

    /// Log filter directive, overridden by `RUST_LOG`. Default: "info"
    pub log_filter: String,

    /// Split applied when no label file is given.
    pub split: Option<SplitConfig>,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            default_step: 0.1,
            default_unit: LengthUnit::Meters,
            log_filter: "info".to_string(),
            split: None,
        }
    }
}

/// Label assignment performed at load time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Partition proportions.
    #[serde(flatten)]
    pub ratios: SplitRatios,

    /// Shuffle seed; entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl InspectConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`InspectError::Config`] for malformed TOML or invalid values.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from `path`, or defaults when `path` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`InspectError::Io`] if the file cannot be read and
    /// [`InspectError::Config`] if it is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            debug!("no config file given; using defaults");
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`InspectError::Config`] describing the first bad value.
    pub fn validate(&self) -> Result<()> {
        if !(self.default_step.is_finite() && self.default_step > 0.0) {
            return Err(InspectError::config(format!(
                "default_step must be > 0, got {}",
                self.default_step
            )));
        }
        if let Some(split) = &self.split {
            split
                .ratios
                .validate()
                .map_err(|e| InspectError::config(e.to_string()))?;
        }
        Ok(())
    }

    /// Set the default move step.
    #[must_use]
    pub fn with_default_step(mut self, step: f64, unit: LengthUnit) -> Self {
        self.default_step = step;
        self.default_unit = unit;
        self
    }

    /// Set the load-time split.
    #[must_use]
    pub fn with_split(mut self, ratios: SplitRatios, seed: Option<u64>) -> Self {
        self.split = Some(SplitConfig { ratios, seed });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = InspectConfig::default();
        assert!((config.default_step - 0.1).abs() < 1e-12);
        assert_eq!(config.default_unit, LengthUnit::Meters);
        assert_eq!(config.log_filter, "info");
        assert!(config.split.is_none());
    }

    #[test]
    fn config_empty_document_is_default() {
        let config = InspectConfig::from_toml_str("").unwrap();
        assert_eq!(config, InspectConfig::default());
    }

    #[test]
    fn config_rejects_bad_step() {
        let err = InspectConfig::from_toml_str("default_step = -1.0").unwrap_err();
        assert!(err.to_string().contains("default_step"));
    }

    #[test]
    fn config_rejects_bad_split() {
        let text = "[split]\ntrain = 0.9\nvalidation = 0.9\ntest = 0.0\n";
        assert!(matches!(
            InspectConfig::from_toml_str(text),
            Err(InspectError::Config(_))
        ));
    }

    #[test]
    fn config_rejects_unknown_unit() {
        assert!(InspectConfig::from_toml_str("default_unit = \"furlongs\"").is_err());
    }

    #[test]
    fn config_load_none() {
        assert_eq!(InspectConfig::load(None).unwrap(), InspectConfig::default());
    }

    #[test]
    fn config_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inspect.toml");
        std::fs::write(&path, "log_filter = \"lidar_nav=debug\"\n").unwrap();

        let config = InspectConfig::load(Some(&path)).unwrap();
        assert_eq!(config.log_filter, "lidar_nav=debug");
    }

    #[test]
    fn config_builders() {
        let config = InspectConfig::default()
            .with_default_step(2.0, LengthUnit::Millimeters)
            .with_split(SplitRatios::default(), Some(3));
        assert!(config.validate().is_ok());
        assert_eq!(config.split.unwrap().seed, Some(3));
    }
}
