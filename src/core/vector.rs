//! Six-element regional stress vector.

use crate::core::error::{ensure_finite, StressError};
use crate::core::region::{RegionKey, REGION_COUNT};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Index;

/// Stress intensity per region, each value clamped to `[0.0, 1.0]`.
///
/// Values are stored at full precision; use [`RegionalStressVector::rounded`]
/// for display. Serializes as a map keyed by region, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<RegionKey, f64>",
    into = "BTreeMap<RegionKey, f64>"
)]
pub struct RegionalStressVector {
    values: [f64; REGION_COUNT],
}

impl RegionalStressVector {
    /// A vector with every region at zero.
    pub fn zeroed() -> Self {
        Self {
            values: [0.0; REGION_COUNT],
        }
    }

    /// A vector with every region at the same (clamped) value.
    pub fn uniform(value: f64) -> Result<Self, StressError> {
        Self::from_values([value; REGION_COUNT])
    }

    /// Build from values in canonical order. Values are clamped to `[0, 1]`.
    pub fn from_values(values: [f64; REGION_COUNT]) -> Result<Self, StressError> {
        let mut vector = Self::zeroed();
        for (region, value) in RegionKey::ALL.into_iter().zip(values) {
            vector.set(region, ensure_finite("region stress", value)?);
        }
        Ok(vector)
    }

    /// Current value for a region.
    pub fn get(&self, region: RegionKey) -> f64 {
        self.values[region.index()]
    }

    /// Set a region, clamping to `[0, 1]`.
    pub(crate) fn set(&mut self, region: RegionKey, value: f64) {
        self.values[region.index()] = value.clamp(0.0, 1.0);
    }

    /// Values in canonical order.
    pub fn values(&self) -> [f64; REGION_COUNT] {
        self.values
    }

    /// Iterate `(region, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (RegionKey, f64)> + '_ {
        RegionKey::ALL.into_iter().map(move |r| (r, self.get(r)))
    }

    /// Copy rounded to three decimals for display.
    pub fn rounded(&self) -> Self {
        Self {
            values: self.values.map(round3),
        }
    }
}

impl Default for RegionalStressVector {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl Index<RegionKey> for RegionalStressVector {
    type Output = f64;

    fn index(&self, region: RegionKey) -> &f64 {
        &self.values[region.index()]
    }
}

impl TryFrom<BTreeMap<RegionKey, f64>> for RegionalStressVector {
    type Error = String;

    fn try_from(map: BTreeMap<RegionKey, f64>) -> Result<Self, Self::Error> {
        let mut values = [0.0; REGION_COUNT];
        for region in RegionKey::ALL {
            values[region.index()] = *map
                .get(&region)
                .ok_or_else(|| format!("missing region {region}"))?;
        }
        Self::from_values(values).map_err(|e| e.to_string())
    }
}

impl From<RegionalStressVector> for BTreeMap<RegionKey, f64> {
    fn from(vector: RegionalStressVector) -> Self {
        vector.iter().collect()
    }
}

/// Round to three decimal places.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
