//! Transfer function from vitals to regional stress.
//!
//! Scoring runs in three stages:
//!
//! 1. Each vital is turned into a non-negative deviation from a fixed
//!    baseline, divided by a fixed scale. Readings better than baseline
//!    contribute nothing.
//! 2. Deviations are combined with fixed weights, scaled by `sensitivity`
//!    and raised to `harshness`, giving the global score.
//! 3. Each region applies its own multiplier and exponent to the global
//!    score.

use crate::core::error::StressError;
use crate::core::region::RegionKey;
use crate::core::vector::{round3, RegionalStressVector};
use crate::core::vitals::VitalsSnapshot;
use serde::{Deserialize, Serialize};

/// Baseline and scale for a single vital.
#[derive(Debug, Clone, Copy)]
struct Norm {
    baseline: f64,
    scale: f64,
}

const RMSSD: Norm = Norm {
    baseline: 50.0,
    scale: 35.0,
};
const RESP_RATE: Norm = Norm {
    baseline: 14.0,
    scale: 10.0,
};
const SPO2: Norm = Norm {
    baseline: 98.0,
    scale: 6.0,
};
const HEART_RATE: Norm = Norm {
    baseline: 65.0,
    scale: 35.0,
};

const W_RMSSD: f64 = 0.45;
const W_RESP_RATE: f64 = 0.25;
const W_SPO2: f64 = 0.15;
const W_HEART_RATE: f64 = 0.15;

/// Per-region response to the global score: `min(1, gain * global^exponent)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionResponse {
    pub gain: f64,
    pub exponent: f64,
}

impl RegionResponse {
    /// Response curve for a region.
    ///
    /// Spinal is the whole-body conduit and carries the global score as-is.
    pub fn for_region(region: RegionKey) -> Self {
        let (gain, exponent) = match region {
            RegionKey::Temporal => (1.0, 1.2),
            RegionKey::Cerebellum => (0.6, 1.3),
            RegionKey::Frontal => (1.0, 1.8),
            RegionKey::Parietal => (0.8, 1.4),
            RegionKey::Occipital => (0.3, 1.2),
            RegionKey::Spinal => (1.0, 1.0),
        };
        Self { gain, exponent }
    }

    /// Apply the curve to a global score in `[0, 1]`.
    pub fn apply(&self, global: f64) -> f64 {
        (self.gain * global.powf(self.exponent)).min(1.0)
    }
}

/// Normalized deviations of each vital from baseline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Deviations {
    pub rmssd: f64,
    pub resp_rate: f64,
    pub spo2: f64,
    pub heart_rate: f64,
}

impl Deviations {
    /// Compute deviations for a snapshot. `sdnn` is ignored.
    pub fn from_snapshot(v: &VitalsSnapshot) -> Self {
        Self {
            // Lower RMSSD and SpO2 are worse; higher rates are worse.
            rmssd: ((RMSSD.baseline - v.rmssd) / RMSSD.scale).max(0.0),
            resp_rate: ((v.resp_rate - RESP_RATE.baseline) / RESP_RATE.scale).max(0.0),
            spo2: ((SPO2.baseline - v.spo2) / SPO2.scale).max(0.0),
            heart_rate: ((v.heart_rate - HEART_RATE.baseline) / HEART_RATE.scale).max(0.0),
        }
    }

    /// Fixed-weight linear combination.
    pub fn weighted_sum(&self) -> f64 {
        W_RMSSD * self.rmssd
            + W_RESP_RATE * self.resp_rate
            + W_SPO2 * self.spo2
            + W_HEART_RATE * self.heart_rate
    }
}

/// Output of one scoring pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StressReport {
    /// Systemic stress score in `[0, 1]`
    pub global: f64,
    /// Per-region scores
    pub regions: RegionalStressVector,
    /// Stage 1 intermediates, kept for inspection
    pub deviations: Deviations,
}

impl StressReport {
    /// Copy with every score rounded to three decimals.
    pub fn rounded(&self) -> Self {
        Self {
            global: round3(self.global),
            regions: self.regions.rounded(),
            deviations: self.deviations,
        }
    }
}

/// Stateless scoring engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct StressScoreEngine;

impl StressScoreEngine {
    pub fn new() -> Self {
        Self
    }

    /// Score a snapshot.
    ///
    /// Fails only on non-finite input. Any finite input yields a report
    /// with every score in `[0, 1]`.
    pub fn score(&self, snapshot: &VitalsSnapshot) -> Result<StressReport, StressError> {
        snapshot.validate()?;

        let deviations = Deviations::from_snapshot(snapshot);
        let global = global_score(
            deviations.weighted_sum(),
            snapshot.sensitivity,
            snapshot.harshness,
        );

        let mut regions = RegionalStressVector::zeroed();
        for region in RegionKey::ALL {
            regions.set(region, RegionResponse::for_region(region).apply(global));
        }

        tracing::debug!(
            rmssd_dev = deviations.rmssd,
            resp_dev = deviations.resp_rate,
            spo2_dev = deviations.spo2,
            hr_dev = deviations.heart_rate,
            global,
            "scored vitals snapshot"
        );

        Ok(StressReport {
            global,
            regions,
            deviations,
        })
    }
}

/// Escalate the weighted deviation sum into the global score.
fn global_score(weighted: f64, sensitivity: f64, harshness: f64) -> f64 {
    // Zero sensitivity silences everything, even an overflowed sum.
    let raw = if sensitivity == 0.0 {
        0.0
    } else {
        sensitivity * weighted
    };
    // A negative base has no real fractional power.
    let raw = if raw.is_nan() { 0.0 } else { raw.max(0.0) };
    raw.powf(harshness).clamp(0.0, 1.0)
}

/// Score a snapshot with the default engine.
pub fn score(snapshot: &VitalsSnapshot) -> Result<StressReport, StressError> {
    StressScoreEngine::new().score(snapshot)
}
