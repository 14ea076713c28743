//! Core functionality for StressIQ.
//!
//! This module contains:
//! - The closed set of anatomical regions and the regional stress vector
//! - The stateless scoring engine (vitals to regional stress)
//! - The session-scoped region store with bounded relief

pub mod engine;
pub mod error;
pub mod region;
pub mod store;
pub mod vector;
pub mod vitals;

// Re-export commonly used types
pub use engine::{score, Deviations, RegionResponse, StressReport, StressScoreEngine};
pub use error::StressError;
pub use region::{RegionKey, REGION_COUNT};
pub use store::{DominantRegion, RegionStressStore, DEFAULT_RELIEF, ELEVATION_THRESHOLD};
pub use vector::{round3, RegionalStressVector};
pub use vitals::{VitalsSnapshot, DEFAULT_HARSHNESS, DEFAULT_SENSITIVITY};
