//! Vitals sources for the scoring pipeline.
//!
//! Real acquisition happens outside this crate. Sources here either hand
//! back a fixed reading or simulate the timed scan the viewer shows before
//! the first scoring pass.

pub mod simulated;
pub mod types;

pub use simulated::{ScanConfig, SimulatedScan};
pub use types::{ScanEvent, ScanEventKind, SourceError};

use crate::core::VitalsSnapshot;

/// Something that can produce a vitals reading.
pub trait VitalsSource {
    /// Block until a reading is available.
    fn read(&mut self) -> Result<VitalsSnapshot, SourceError>;
}

/// A source that always returns the same reading.
#[derive(Debug, Clone)]
pub struct ManualSource {
    snapshot: VitalsSnapshot,
}

impl ManualSource {
    pub fn new(snapshot: VitalsSnapshot) -> Self {
        Self { snapshot }
    }
}

impl VitalsSource for ManualSource {
    fn read(&mut self) -> Result<VitalsSnapshot, SourceError> {
        Ok(self.snapshot)
    }
}
