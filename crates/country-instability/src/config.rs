//! Engine configuration
//!
//! Blend weights, learning window and trend threshold. Every field has a
//! default so a partial JSON file only overrides what it names.

use crate::{CiiError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// Component weights (9 decimal precision)
/// Sum = 1.000000000
pub const W_UNREST: f64 = 0.250000000;
pub const W_CONFLICT: f64 = 0.300000000;
pub const W_SECURITY: f64 = 0.200000000;
pub const W_INFORMATION: f64 = 0.250000000;

/// Baseline vs. event blend
pub const W_BASELINE: f64 = 0.400000000;
pub const W_EVENTS: f64 = 0.600000000;

pub const DEFAULT_LEARNING_MINUTES: u32 = 15;
pub const DEFAULT_TREND_THRESHOLD: i16 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CiiConfig {
    /// Weight for unrest (U)
    pub w_unrest: f64,
    /// Weight for conflict (C)
    pub w_conflict: f64,
    /// Weight for security (S)
    pub w_security: f64,
    /// Weight for information (I)
    pub w_information: f64,
    /// Weight for baseline structural risk (R)
    pub w_baseline: f64,
    /// Weight for the blended event score (E)
    pub w_events: f64,
    /// Warm-up window before scores are considered settled
    pub learning_minutes: u32,
    /// Minimum |delta| for a rising / falling trend
    pub trend_threshold: i16,
}

impl Default for CiiConfig {
    fn default() -> Self {
        Self {
            w_unrest: W_UNREST,
            w_conflict: W_CONFLICT,
            w_security: W_SECURITY,
            w_information: W_INFORMATION,
            w_baseline: W_BASELINE,
            w_events: W_EVENTS,
            learning_minutes: DEFAULT_LEARNING_MINUTES,
            trend_threshold: DEFAULT_TREND_THRESHOLD,
        }
    }
}

impl CiiConfig {
    /// Load and validate configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading CII config from {:?}", path);

        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let config: CiiConfig = serde_json::from_reader(reader)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("w_unrest", self.w_unrest),
            ("w_conflict", self.w_conflict),
            ("w_security", self.w_security),
            ("w_information", self.w_information),
            ("w_baseline", self.w_baseline),
            ("w_events", self.w_events),
        ];
        if let Some((name, w)) = weights.iter().find(|(_, w)| !w.is_finite() || *w < 0.0) {
            return Err(CiiError::InvalidConfig(format!("{} must be non-negative, got {}", name, w)));
        }

        let component_sum = self.w_unrest + self.w_conflict + self.w_security + self.w_information;
        if (component_sum - 1.000000000).abs() > 0.001000000 {
            return Err(CiiError::InvalidConfig(format!(
                "component weights should sum to 1.0, got {}",
                component_sum
            )));
        }

        if self.learning_minutes == 0 {
            return Err(CiiError::InvalidConfig("learning_minutes must be > 0".to_string()));
        }
        if self.trend_threshold <= 0 {
            return Err(CiiError::InvalidConfig("trend_threshold must be > 0".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_weights_sum_to_one() {
        let config = CiiConfig::default();
        let total = config.w_unrest + config.w_conflict + config.w_security + config.w_information;
        assert!((total - 1.000000000).abs() < 0.001000000, "Weights should sum to 1.0, got {}", total);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"learning_minutes": 5}"#).unwrap();

        let config = CiiConfig::from_file(file.path()).unwrap();
        assert_eq!(config.learning_minutes, 5);
        assert_eq!(config.w_conflict, W_CONFLICT);
        assert_eq!(config.trend_threshold, DEFAULT_TREND_THRESHOLD);
    }

    #[test]
    fn test_rejects_unbalanced_components() {
        let config = CiiConfig {
            w_unrest: 0.5,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(CiiError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_negative_weight_and_zero_window() {
        let config = CiiConfig {
            w_baseline: -0.1,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = CiiConfig {
            learning_minutes: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{not json").unwrap();
        assert!(matches!(CiiConfig::from_file(file.path()), Err(CiiError::Json(_))));
    }
}
