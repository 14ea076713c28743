//! Configuration for StressIQ.

use crate::core::{
    RegionKey, VitalsSnapshot, DEFAULT_HARSHNESS, DEFAULT_RELIEF, DEFAULT_SENSITIVITY,
    ELEVATION_THRESHOLD,
};
use crate::mesh::{MeshError, MeshMap};
use crate::source::ScanConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scoring tuning applied to readings that don't carry their own
    pub scoring: ScoringConfig,

    /// Stress removed from a region per completed activity
    pub relief_amount: f64,

    /// A region must exceed this to be highlighted
    pub elevation_threshold: f64,

    /// Pacing of the simulated scan
    pub scan: ScanConfig,

    /// Mesh names overriding the default region bindings
    pub mesh_bindings: BTreeMap<RegionKey, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            relief_amount: DEFAULT_RELIEF,
            elevation_threshold: ELEVATION_THRESHOLD,
            scan: ScanConfig::default(),
            mesh_bindings: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a file, falling back to defaults if it is absent.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(?path, "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to a file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("stressiq")
            .join("config.json")
    }

    /// Reject values the core cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.scoring.sensitivity.is_finite() || !self.scoring.harshness.is_finite() {
            return Err(ConfigError::Invalid(
                "sensitivity and harshness must be finite".to_string(),
            ));
        }
        if !self.relief_amount.is_finite() || self.relief_amount < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "relief_amount must be a non-negative number, got {}",
                self.relief_amount
            )));
        }
        if !(0.0..=1.0).contains(&self.elevation_threshold) {
            return Err(ConfigError::Invalid(format!(
                "elevation_threshold must be within [0, 1], got {}",
                self.elevation_threshold
            )));
        }
        if self.scan.step_percent == 0 {
            return Err(ConfigError::Invalid(
                "scan.step_percent must be at least 1".to_string(),
            ));
        }
        self.mesh_map()?;
        Ok(())
    }

    /// Region to mesh bindings with overrides applied.
    pub fn mesh_map(&self) -> Result<MeshMap, ConfigError> {
        Ok(MeshMap::default().with_overrides(&self.mesh_bindings)?)
    }
}

/// Tuning for the escalation stage of scoring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub sensitivity: f64,
    pub harshness: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            sensitivity: DEFAULT_SENSITIVITY,
            harshness: DEFAULT_HARSHNESS,
        }
    }
}

impl ScoringConfig {
    /// Apply this tuning to a reading.
    pub fn apply(&self, snapshot: VitalsSnapshot) -> VitalsSnapshot {
        snapshot.with_tuning(self.sensitivity, self.harshness)
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(serde_json::Error),
    #[error("Serialize error: {0}")]
    Serialize(serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
    #[error("Invalid mesh bindings: {0}")]
    Mesh(#[from] MeshError),
}

/// Serde support for Duration as milliseconds.
pub(crate) mod duration_millis {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_millis() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
