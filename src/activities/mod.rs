//! Corrective activities and the mini-game mechanics that run them.
//!
//! Each region owns a fixed list of activities. Completing any of them
//! relieves that region's stress in the active session.

pub mod catalog;

pub use catalog::{ActivityCatalog, CATALOG};

use crate::core::RegionKey;
use serde::Serialize;

/// Mini-game a presentation layer must run for an activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mechanic {
    /// Paced breathing for a total duration.
    Breathing {
        duration_secs: u32,
        inhale_secs: u32,
        exhale_secs: u32,
    },
    /// Tap along to a slow rhythm until the target count.
    Tapping { target_taps: u32 },
    /// Free-text entry answering a prompt.
    Journal { prompt: &'static str },
    /// Track a slowly moving object.
    Focus { duration_secs: u32 },
    /// Step through prompts in order.
    Prompts { steps: &'static [&'static str] },
}

impl Mechanic {
    /// Rough time the mechanic takes, if it is timed.
    pub fn duration_secs(&self) -> Option<u32> {
        match self {
            Mechanic::Breathing { duration_secs, .. } | Mechanic::Focus { duration_secs } => {
                Some(*duration_secs)
            }
            _ => None,
        }
    }

    /// Number of breath cycles for a breathing mechanic.
    pub fn breath_cycles(&self) -> Option<u32> {
        match self {
            Mechanic::Breathing {
                duration_secs,
                inhale_secs,
                exhale_secs,
            } => {
                let cycle = inhale_secs + exhale_secs;
                (cycle > 0).then(|| duration_secs / cycle)
            }
            _ => None,
        }
    }
}

/// One corrective activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Activity {
    pub id: &'static str,
    pub region: RegionKey,
    pub title: &'static str,
    pub blurb: &'static str,
    /// Vitals the activity is meant to move, e.g. "HR ↓, RMSSD ↑"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_metric: Option<&'static str>,
    pub mechanic: Mechanic,
    /// Whether the activity runs on a near-black overlay
    pub dark_overlay: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breath_cycles() {
        let m = Mechanic::Breathing {
            duration_secs: 90,
            inhale_secs: 4,
            exhale_secs: 4,
        };
        assert_eq!(m.breath_cycles(), Some(11));
        assert_eq!(m.duration_secs(), Some(90));
        assert_eq!(Mechanic::Tapping { target_taps: 10 }.breath_cycles(), None);
    }

    #[test]
    fn test_mechanic_serialization() {
        let json = serde_json::to_value(Mechanic::Focus { duration_secs: 60 }).unwrap();
        assert_eq!(json["kind"], "focus");
        assert_eq!(json["duration_secs"], 60);
    }
}
