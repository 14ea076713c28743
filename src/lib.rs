//! StressIQ - regional stress scoring from wearable vitals.
//!
//! This library turns a snapshot of heart-rate variability, respiration,
//! blood oxygen and heart rate into six per-region stress scores used to
//! color an anatomical brain model, and tracks how those scores fall as the
//! user completes corrective activities.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         StressIQ core                        │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐   ┌──────────────┐   ┌─────────────────┐    │
//! │  │   Source    │──▶│    Engine    │──▶│     Session     │    │
//! │  │ (scan/manual│   │ (vitals to 6 │   │ (region store + │    │
//! │  │   vitals)   │   │   regions)   │   │   completions)  │    │
//! │  └─────────────┘   └──────────────┘   └─────────────────┘    │
//! │                                          │          ▲        │
//! │                                          ▼          │        │
//! │                                   ┌───────────┐ ┌────────┐   │
//! │                                   │ Mesh map  │ │Activity│   │
//! │                                   │ (paint)   │ │catalog │   │
//! │                                   └───────────┘ └────────┘   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use stressiq::{RegionKey, Session, SessionSettings, VitalsSnapshot};
//!
//! let vitals = VitalsSnapshot::new(15.0, 25.0, 28.0, 95.0, 115.0);
//! let mut session = Session::from_snapshot(&vitals, SessionSettings::default()).unwrap();
//!
//! assert_eq!(session.dominant().unwrap().region, RegionKey::Temporal);
//! session.complete_activity("pulse-match").unwrap();
//! assert!((session.current_vector().unwrap()[RegionKey::Temporal] - 0.6).abs() < 1e-9);
//! ```

pub mod activities;
pub mod config;
pub mod core;
pub mod mesh;
pub mod session;
pub mod source;

#[cfg(feature = "server")]
pub mod server;

// Re-export key types at crate root for convenience
pub use activities::{Activity, ActivityCatalog, Mechanic, CATALOG};
pub use config::{Config, ConfigError, ScoringConfig};
pub use core::{
    score, DominantRegion, RegionKey, RegionStressStore, RegionalStressVector, StressError,
    StressReport, StressScoreEngine, VitalsSnapshot,
};
pub use mesh::{MeshId, MeshMap, MeshPaint};
pub use session::{ActivityCompletion, Session, SessionSettings, SessionSummary};
pub use source::{ManualSource, ScanConfig, ScanEvent, SimulatedScan, VitalsSource};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Wellness disclaimer that can be displayed to users.
pub const DISCLAIMER: &str = r#"
╔══════════════════════════════════════════════════════════════════╗
║                  STRESSIQ - WELLNESS DISCLAIMER                  ║
╠══════════════════════════════════════════════════════════════════╣
║                                                                  ║
║  StressIQ estimates stress from a single vitals reading.         ║
║                                                                  ║
║  ✓ WHAT THE SCORES ARE:                                          ║
║    • A visual guide mapping HRV, breathing, SpO2 and heart       ║
║      rate onto regions of a brain model                          ║
║    • A way to pick a short relaxation activity                   ║
║                                                                  ║
║  ✗ WHAT THE SCORES ARE NOT:                                      ║
║    • A medical diagnosis of any kind                             ║
║    • A measurement of activity inside your brain                 ║
║    • A substitute for advice from a clinician                    ║
║                                                                  ║
║  Readings are scored in memory and discarded when the            ║
║  session ends. Nothing is stored between sessions.               ║
║                                                                  ║
╚══════════════════════════════════════════════════════════════════╝
"#;

/// Install a `tracing` subscriber honoring `RUST_LOG`.
///
/// Defaults to `stressiq=info`. Safe to call more than once.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("stressiq=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
