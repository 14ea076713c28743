//! The closed set of anatomical regions.

use crate::core::error::StressError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the six regions tracked by the core.
///
/// Variant order is the canonical order. It drives vector layout,
/// iteration and tie-breaking, so new variants must never be inserted
/// in the middle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegionKey {
    Temporal,
    Cerebellum,
    Frontal,
    Parietal,
    Occipital,
    Spinal,
}

/// Number of regions.
pub const REGION_COUNT: usize = 6;

impl RegionKey {
    /// All regions in canonical order.
    pub const ALL: [RegionKey; REGION_COUNT] = [
        RegionKey::Temporal,
        RegionKey::Cerebellum,
        RegionKey::Frontal,
        RegionKey::Parietal,
        RegionKey::Occipital,
        RegionKey::Spinal,
    ];

    /// Position of this region in canonical order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Canonical upper-case key.
    pub fn as_str(self) -> &'static str {
        match self {
            RegionKey::Temporal => "TEMPORAL",
            RegionKey::Cerebellum => "CEREBELLUM",
            RegionKey::Frontal => "FRONTAL",
            RegionKey::Parietal => "PARIETAL",
            RegionKey::Occipital => "OCCIPITAL",
            RegionKey::Spinal => "SPINAL",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            RegionKey::Temporal => "Temporal lobe",
            RegionKey::Cerebellum => "Cerebellum",
            RegionKey::Frontal => "Frontal lobe",
            RegionKey::Parietal => "Parietal lobe",
            RegionKey::Occipital => "Occipital lobe",
            RegionKey::Spinal => "Spinal cord",
        }
    }
}

impl fmt::Display for RegionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegionKey {
    type Err = StressError;

    /// Parse a region key, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        RegionKey::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| StressError::UnknownRegion(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order_matches_index() {
        for (i, region) in RegionKey::ALL.iter().enumerate() {
            assert_eq!(region.index(), i);
        }
        assert_eq!(RegionKey::ALL[0], RegionKey::Temporal);
        assert_eq!(RegionKey::ALL[5], RegionKey::Spinal);
    }

    #[test]
    fn test_parse_region() {
        assert_eq!("TEMPORAL".parse::<RegionKey>(), Ok(RegionKey::Temporal));
        assert_eq!(" spinal ".parse::<RegionKey>(), Ok(RegionKey::Spinal));
        assert_eq!(
            "hippocampus".parse::<RegionKey>(),
            Err(StressError::UnknownRegion("hippocampus".to_string()))
        );
    }

    #[test]
    fn test_serde_uses_canonical_keys() {
        let json = serde_json::to_string(&RegionKey::Occipital).unwrap();
        assert_eq!(json, "\"OCCIPITAL\"");
        let back: RegionKey = serde_json::from_str("\"CEREBELLUM\"").unwrap();
        assert_eq!(back, RegionKey::Cerebellum);
    }
}
