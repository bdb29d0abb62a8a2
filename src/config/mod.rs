//! Configuration module for numgraph-rs
//!
//! Runtime settings for a number graph instance, stored as TOML.
//!
//! # Example
//!
//! ```ignore
//! use numgraph_rs::config::NumGraphConfig;
//!
//! let config = NumGraphConfig::load_or_default("numgraph.toml");
//! let graph = NumberGraph::from_config(&config, registry)?;
//! ```

use crate::error::{NumGraphError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default config filename
pub const CONFIG_FILE_NAME: &str = "numgraph.toml";

/// Default interpreter passes per second
pub const DEFAULT_UPDATES_PER_SECOND: f32 = 3.0;

/// Settings for a running number graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumGraphConfig {
    /// Interpreter passes per second, independent of host frame rate
    #[serde(default = "default_updates_per_second")]
    pub updates_per_second: f32,

    /// Seed for random operations. Unset means seeded from entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Log compile statistics at `info` after each compile-and-install
    #[serde(default = "default_true")]
    pub log_compile_stats: bool,
}

fn default_updates_per_second() -> f32 {
    DEFAULT_UPDATES_PER_SECOND
}

fn default_true() -> bool {
    true
}

impl Default for NumGraphConfig {
    fn default() -> Self {
        Self {
            updates_per_second: DEFAULT_UPDATES_PER_SECOND,
            seed: None,
            log_compile_stats: true,
        }
    }
}

impl NumGraphConfig {
    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            NumGraphError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            NumGraphError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file, returning defaults if it is missing or invalid
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save config to disk as TOML
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| NumGraphError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path.as_ref(), content)
            .map_err(|e| NumGraphError::Config(format!("Failed to write config: {}", e)))
    }

    /// Check that values are usable
    pub fn validate(&self) -> Result<()> {
        update_interval(self.updates_per_second)?;
        Ok(())
    }
}

/// Interval between passes at `updates_per_second`.
///
/// The rate must be finite and positive, and its interval must be non-zero
/// and fit in a [`Duration`].
pub fn update_interval(updates_per_second: f32) -> Result<Duration> {
    if !updates_per_second.is_finite() || updates_per_second <= 0.0 {
        return Err(NumGraphError::Config(format!(
            "updates_per_second must be finite and positive, got {}",
            updates_per_second
        )));
    }

    let interval = Duration::try_from_secs_f64(1.0 / f64::from(updates_per_second))
        .map_err(|e| {
            NumGraphError::Config(format!(
                "updates_per_second {} gives an invalid interval: {}",
                updates_per_second, e
            ))
        })?;
    if interval.is_zero() {
        return Err(NumGraphError::Config(format!(
            "updates_per_second {} is too high",
            updates_per_second
        )));
    }
    Ok(interval)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NumGraphConfig::default();
        assert_eq!(config.updates_per_second, 3.0);
        assert_eq!(config.seed, None);
        assert!(config.log_compile_stats);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: NumGraphConfig = toml::from_str("seed = 42").unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.updates_per_second, DEFAULT_UPDATES_PER_SECOND);
        assert!(config.log_compile_stats);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let config = NumGraphConfig {
            updates_per_second: 12.5,
            seed: Some(7),
            log_compile_stats: false,
        };
        config.save(&path).unwrap();
        assert_eq!(NumGraphConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_rate_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "updates_per_second = -2.0\n").unwrap();

        assert!(matches!(
            NumGraphConfig::load(&path),
            Err(NumGraphError::Config(_))
        ));
        assert_eq!(NumGraphConfig::load_or_default(&path), NumGraphConfig::default());
    }

    #[test]
    fn test_extreme_rates_rejected() {
        let tiny = NumGraphConfig {
            updates_per_second: 1e-30,
            ..Default::default()
        };
        assert!(matches!(tiny.validate(), Err(NumGraphError::Config(_))));

        let huge = NumGraphConfig {
            updates_per_second: f32::MAX,
            ..Default::default()
        };
        assert!(matches!(huge.validate(), Err(NumGraphError::Config(_))));

        assert_eq!(update_interval(4.0).unwrap(), Duration::from_millis(250));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = NumGraphConfig::load_or_default(dir.path().join("absent.toml"));
        assert_eq!(config, NumGraphConfig::default());
    }
}
