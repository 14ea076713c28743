//! Events emitted while a vitals reading is being acquired.

use crate::core::VitalsSnapshot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What happened during a scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScanEventKind {
    /// Scan progress, 0 to 100
    Progress { percent: u8 },
    /// The scan finished with a reading
    Complete { snapshot: VitalsSnapshot },
    /// The scan was cancelled before finishing
    Cancelled,
}

/// A timestamped scan event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanEvent {
    /// When the event was emitted
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: ScanEventKind,
}

impl ScanEvent {
    pub fn new(kind: ScanEventKind) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
        }
    }

    pub fn progress(percent: u8) -> Self {
        Self::new(ScanEventKind::Progress { percent })
    }

    pub fn complete(snapshot: VitalsSnapshot) -> Self {
        Self::new(ScanEventKind::Complete { snapshot })
    }

    pub fn cancelled() -> Self {
        Self::new(ScanEventKind::Cancelled)
    }

    /// Whether no further events follow this one.
    pub fn is_terminal(&self) -> bool {
        !matches!(self.kind, ScanEventKind::Progress { .. })
    }
}

/// Errors from a vitals source.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SourceError {
    #[error("scan is already running")]
    AlreadyRunning,
    #[error("scan was cancelled")]
    Cancelled,
    #[error("scan worker disconnected")]
    Disconnected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_events() {
        assert!(!ScanEvent::progress(40).is_terminal());
        assert!(ScanEvent::complete(VitalsSnapshot::baseline()).is_terminal());
        assert!(ScanEvent::cancelled().is_terminal());
    }

    #[test]
    fn test_event_serialization() {
        let json = serde_json::to_value(ScanEvent::progress(42)).unwrap();
        assert_eq!(json["kind"], "progress");
        assert_eq!(json["percent"], 42);
        assert!(json["timestamp"].is_string());
    }
}
