//! Session-scoped holder of the live regional stress vector.

use crate::core::error::{ensure_finite, StressError};
use crate::core::region::RegionKey;
use crate::core::vector::{round3, RegionalStressVector};
use serde::{Deserialize, Serialize};

/// Relief applied by one completed activity.
pub const DEFAULT_RELIEF: f64 = 0.4;

/// A region must exceed this to be flagged as the dominant concern.
pub const ELEVATION_THRESHOLD: f64 = 0.1;

/// The most stressed region at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DominantRegion {
    pub region: RegionKey,
    pub value: f64,
    /// Whether `value` exceeds the elevation threshold
    pub elevated: bool,
}

impl DominantRegion {
    /// Copy with `value` rounded for display.
    pub fn rounded(&self) -> Self {
        Self {
            value: round3(self.value),
            ..*self
        }
    }
}

/// Owns the regional vector for one viewing session.
///
/// Starts uninitialized; [`RegionStressStore::initialize`] moves it to the
/// active state, where the vector only ever decreases.
#[derive(Debug, Clone)]
pub struct RegionStressStore {
    state: Option<RegionalStressVector>,
    elevation_threshold: f64,
}

impl RegionStressStore {
    /// Create an uninitialized store.
    pub fn new() -> Self {
        Self {
            state: None,
            elevation_threshold: ELEVATION_THRESHOLD,
        }
    }

    /// Create a store already holding `vector`.
    pub fn with_vector(vector: RegionalStressVector) -> Self {
        let mut store = Self::new();
        store.initialize(vector);
        store
    }

    /// Use a different elevation threshold.
    pub fn with_elevation_threshold(mut self, threshold: f64) -> Self {
        self.elevation_threshold = threshold;
        self
    }

    /// Replace the state wholesale.
    pub fn initialize(&mut self, vector: RegionalStressVector) {
        self.state = Some(vector);
    }

    /// Whether `initialize` has been called.
    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// Read-only copy of the current vector.
    pub fn current_vector(&self) -> Result<RegionalStressVector, StressError> {
        self.state.ok_or(StressError::NotInitialized)
    }

    /// Lower one region by `amount`, flooring at zero.
    ///
    /// Returns the updated vector. Other regions are untouched.
    pub fn decrement(
        &mut self,
        region: RegionKey,
        amount: f64,
    ) -> Result<RegionalStressVector, StressError> {
        let amount = ensure_finite("relief amount", amount)?;
        let state = self.state.as_mut().ok_or(StressError::NotInitialized)?;

        // Negative relief would raise stress; treat it as none.
        let relief = amount.max(0.0);
        let before = state.get(region);
        state.set(region, (before - relief).max(0.0));
        Ok(*state)
    }

    /// Lower a region named by string. Unknown names leave state unchanged.
    pub fn decrement_named(
        &mut self,
        region: &str,
        amount: f64,
    ) -> Result<RegionalStressVector, StressError> {
        let region: RegionKey = region.parse()?;
        self.decrement(region, amount)
    }

    /// The region with the highest value; ties go to the earliest region
    /// in canonical order.
    pub fn most_stressed_region(&self) -> Result<DominantRegion, StressError> {
        let state = self.state.as_ref().ok_or(StressError::NotInitialized)?;

        let mut best = RegionKey::ALL[0];
        for region in RegionKey::ALL.into_iter().skip(1) {
            if state.get(region) > state.get(best) {
                best = region;
            }
        }

        let value = state.get(best);
        Ok(DominantRegion {
            region: best,
            value,
            elevated: value > self.elevation_threshold,
        })
    }
}

impl Default for RegionStressStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active(values: [f64; 6]) -> RegionStressStore {
        let mut store = RegionStressStore::new();
        store.initialize(RegionalStressVector::from_values(values).unwrap());
        store
    }

    #[test]
    fn test_uninitialized_rejects_operations() {
        let mut store = RegionStressStore::new();
        assert!(!store.is_initialized());
        assert_eq!(store.current_vector(), Err(StressError::NotInitialized));
        assert_eq!(
            store.decrement(RegionKey::Frontal, DEFAULT_RELIEF),
            Err(StressError::NotInitialized)
        );
        assert_eq!(store.most_stressed_region(), Err(StressError::NotInitialized));
    }

    #[test]
    fn test_decrement_floor() {
        let mut store = active([0.3, 0.9, 0.0, 0.0, 0.0, 0.0]);
        for _ in 0..5 {
            let v = store.decrement(RegionKey::Temporal, DEFAULT_RELIEF).unwrap();
            assert_eq!(v[RegionKey::Temporal], 0.0);
        }
        // Other regions untouched.
        assert_eq!(store.current_vector().unwrap()[RegionKey::Cerebellum], 0.9);
    }

    #[test]
    fn test_decrement_compounds() {
        let mut store = active([1.0; 6]);
        store.decrement(RegionKey::Parietal, 0.4).unwrap();
        let v = store.decrement(RegionKey::Parietal, 0.4).unwrap();
        assert!((v[RegionKey::Parietal] - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_negative_amount_is_no_op() {
        let mut store = active([0.5; 6]);
        let v = store.decrement(RegionKey::Spinal, -1.0).unwrap();
        assert_eq!(v[RegionKey::Spinal], 0.5);
    }

    #[test]
    fn test_unknown_region_leaves_state() {
        let mut store = active([0.5; 6]);
        let before = store.current_vector().unwrap();
        assert_eq!(
            store.decrement_named("BRAINSTEM", 0.4),
            Err(StressError::UnknownRegion("BRAINSTEM".to_string()))
        );
        assert_eq!(store.current_vector().unwrap(), before);
    }

    #[test]
    fn test_tie_break_uses_canonical_order() {
        let store = active([0.2, 0.7, 0.4, 0.7, 0.1, 0.7]);
        let dominant = store.most_stressed_region().unwrap();
        assert_eq!(dominant.region, RegionKey::Cerebellum);
        assert!(dominant.elevated);
    }

    #[test]
    fn test_uniform_low_vector_not_elevated() {
        let store = active([0.05; 6]);
        let dominant = store.most_stressed_region().unwrap();
        assert_eq!(dominant.region, RegionKey::Temporal);
        assert_eq!(dominant.value, 0.05);
        assert!(!dominant.elevated);
    }

    #[test]
    fn test_with_vector_is_active() {
        let vector = RegionalStressVector::from_values([0.0, 0.0, 0.45, 0.0, 0.0, 0.2]).unwrap();
        let store = RegionStressStore::with_vector(vector).with_elevation_threshold(0.5);
        assert!(store.is_initialized());
        assert_eq!(store.current_vector().unwrap(), vector);

        let dominant = store.most_stressed_region().unwrap();
        assert_eq!(dominant.region, RegionKey::Frontal);
        assert!(!dominant.elevated);
    }

    #[test]
    fn test_dominant_rounded() {
        let mut store = active([1.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        store.decrement(RegionKey::Temporal, 0.4).unwrap();
        store.decrement(RegionKey::Temporal, 0.4).unwrap();
        let dominant = store.most_stressed_region().unwrap();
        assert_ne!(dominant.value, 0.2);
        assert_eq!(dominant.rounded().value, 0.2);
        assert_eq!(dominant.rounded().region, RegionKey::Temporal);
    }

    #[test]
    fn test_threshold_is_strict() {
        let store = active([0.1, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert!(!store.most_stressed_region().unwrap().elevated);
    }
}
