//! Vital-sign snapshot consumed by the scoring engine.

use crate::core::error::{ensure_finite, StressError};
use serde::{Deserialize, Serialize};

/// Default multiplier on the raw deviation sum.
pub const DEFAULT_SENSITIVITY: f64 = 1.0;

/// Default escalation exponent.
pub const DEFAULT_HARSHNESS: f64 = 1.7;

/// One pre-aggregated reading from a wearable.
///
/// Values are taken as-is: physiologically impossible but finite numbers
/// are scored, not rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VitalsSnapshot {
    /// RMSSD in milliseconds
    pub rmssd: f64,
    /// SDNN in milliseconds (carried but not weighted)
    pub sdnn: f64,
    /// Breaths per minute
    pub resp_rate: f64,
    /// Blood oxygen saturation, percent
    pub spo2: f64,
    /// Beats per minute
    pub heart_rate: f64,
    /// Multiplier on the raw deviation sum
    #[serde(default = "default_sensitivity")]
    pub sensitivity: f64,
    /// Exponent controlling how sharply stress escalates past baseline
    #[serde(default = "default_harshness")]
    pub harshness: f64,
}

fn default_sensitivity() -> f64 {
    DEFAULT_SENSITIVITY
}

fn default_harshness() -> f64 {
    DEFAULT_HARSHNESS
}

impl VitalsSnapshot {
    /// Create a snapshot with default tuning.
    pub fn new(rmssd: f64, sdnn: f64, resp_rate: f64, spo2: f64, heart_rate: f64) -> Self {
        Self {
            rmssd,
            sdnn,
            resp_rate,
            spo2,
            heart_rate,
            sensitivity: DEFAULT_SENSITIVITY,
            harshness: DEFAULT_HARSHNESS,
        }
    }

    /// Override the sensitivity and harshness tuning.
    pub fn with_tuning(mut self, sensitivity: f64, harshness: f64) -> Self {
        self.sensitivity = sensitivity;
        self.harshness = harshness;
        self
    }

    /// A reading sitting exactly on every baseline.
    pub fn baseline() -> Self {
        Self::new(50.0, 50.0, 14.0, 98.0, 65.0)
    }

    /// The acutely stressed reading used by the scan demo.
    pub fn demo() -> Self {
        Self::new(15.0, 25.0, 28.0, 95.0, 115.0)
    }

    /// Check that every field is finite.
    pub fn validate(&self) -> Result<(), StressError> {
        ensure_finite("rmssd", self.rmssd)?;
        ensure_finite("sdnn", self.sdnn)?;
        ensure_finite("resp_rate", self.resp_rate)?;
        ensure_finite("spo2", self.spo2)?;
        ensure_finite("heart_rate", self.heart_rate)?;
        ensure_finite("sensitivity", self.sensitivity)?;
        ensure_finite("harshness", self.harshness)?;
        Ok(())
    }
}
