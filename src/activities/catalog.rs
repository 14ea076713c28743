//! Built-in activity catalog.

use super::{Activity, Mechanic};
use crate::core::{DominantRegion, RegionKey, StressError};

const WALK_STEPS: &[&str] = &[
    "Stand up from your current space.",
    "Walk consistently for the next 3 minutes.",
    "Notice your breathing as you move.",
];

static ACTIVITIES: &[Activity] = &[
    // Temporal
    Activity {
        id: "threat-reframe",
        region: RegionKey::Temporal,
        title: "Threat Reframe",
        blurb: "Quick reframe prompts to reduce threat response.",
        goal_metric: Some("HR ↓"),
        mechanic: Mechanic::Prompts {
            steps: &[
                "Acknowledge the stressor.",
                "Is this a true emergency, or just uncomfortable?",
                "What is one small step you can take?",
                "Release the tension in your jaw.",
            ],
        },
        dark_overlay: false,
    },
    Activity {
        id: "pulse-match",
        region: RegionKey::Temporal,
        title: "Pulse Match",
        blurb: "Tap to a slow rhythm to settle arousal.",
        goal_metric: Some("HR ↓, RMSSD ↑"),
        mechanic: Mechanic::Tapping { target_taps: 10 },
        dark_overlay: false,
    },
    // Cerebellum
    Activity {
        id: "balance-beam",
        region: RegionKey::Cerebellum,
        title: "Balance Beam",
        blurb: "Slow tilt/drag control game for smooth movement.",
        goal_metric: Some("HR stabilizes"),
        mechanic: Mechanic::Breathing {
            duration_secs: 60,
            inhale_secs: 4,
            exhale_secs: 4,
        },
        dark_overlay: false,
    },
    Activity {
        id: "stretch-seq",
        region: RegionKey::Cerebellum,
        title: "Stretch Sequence",
        blurb: "Short guided stretches with checkpoints.",
        goal_metric: Some("HR ↓"),
        mechanic: Mechanic::Prompts {
            steps: &[
                "Gently rotate your neck clockwise.",
                "Rotate your neck counter-clockwise.",
                "Roll your shoulders backwards 5 times.",
                "Take a deep breath and let it out.",
            ],
        },
        dark_overlay: false,
    },
    Activity {
        id: "rhythm-runner",
        region: RegionKey::Cerebellum,
        title: "Rhythm Runner",
        blurb: "Match a calm cadence to regain rhythm.",
        goal_metric: Some("HR stabilizes"),
        mechanic: Mechanic::Tapping { target_taps: 10 },
        dark_overlay: false,
    },
    Activity {
        id: "micro-walk",
        region: RegionKey::Cerebellum,
        title: "Micro Walk",
        blurb: "3-minute walk prompt to normalize arousal.",
        goal_metric: Some("LF/HF normalizes"),
        mechanic: Mechanic::Prompts { steps: WALK_STEPS },
        dark_overlay: false,
    },
    // Frontal
    Activity {
        id: "mindfulness-90",
        region: RegionKey::Frontal,
        title: "Mindfulness 90",
        blurb: "90-second focus to restore regulation.",
        goal_metric: Some("HF ↑, SampEn ↑"),
        mechanic: Mechanic::Breathing {
            duration_secs: 90,
            inhale_secs: 4,
            exhale_secs: 4,
        },
        dark_overlay: false,
    },
    Activity {
        id: "focus-lock",
        region: RegionKey::Frontal,
        title: "Focus Lock",
        blurb: "Track a slow object for 60 seconds.",
        goal_metric: Some("HR stabilizes"),
        mechanic: Mechanic::Focus { duration_secs: 60 },
        dark_overlay: false,
    },
    Activity {
        id: "journal-flash",
        region: RegionKey::Frontal,
        title: "Journal Flash",
        blurb: "Type 2 neutral sentences about the stressor.",
        goal_metric: Some("HR ↓"),
        mechanic: Mechanic::Journal {
            prompt: "Write 2 short, neutral sentences about what is stressing you right now.",
        },
        dark_overlay: false,
    },
    // Parietal
    Activity {
        id: "body-scan",
        region: RegionKey::Parietal,
        title: "Body Scan Tap",
        blurb: "Tap through guided awareness prompts.",
        goal_metric: Some("Resp ↓"),
        mechanic: Mechanic::Prompts {
            steps: &[
                "Focus your attention on your toes.",
                "Move awareness to your calves.",
                "Feel the tension in your thighs, and release it.",
                "Notice your stomach.",
                "Relax your chest and shoulders.",
                "Unclench your jaw.",
            ],
        },
        dark_overlay: false,
    },
    Activity {
        id: "grounding-54321",
        region: RegionKey::Parietal,
        title: "Grounding 5-4-3-2-1",
        blurb: "Quick sensory grounding to reduce overload.",
        goal_metric: Some("HR ↓"),
        mechanic: Mechanic::Prompts {
            steps: &[
                "Look around and name 5 things you can see.",
                "Name 4 things you can physically feel.",
                "Name 3 things you can hear right now.",
                "Name 2 things you can smell.",
                "Name 1 thing you can taste.",
            ],
        },
        dark_overlay: false,
    },
    Activity {
        id: "posture-check",
        region: RegionKey::Parietal,
        title: "Posture Check",
        blurb: "Reset posture and jaw/shoulders.",
        goal_metric: Some("HR ↓"),
        mechanic: Mechanic::Prompts {
            steps: &[
                "Sit up straight.",
                "Drop your shoulders away from your ears.",
                "Unclench your jaw.",
                "Rest your hands softly in your lap.",
            ],
        },
        dark_overlay: false,
    },
    // Occipital
    Activity {
        id: "distance-gaze",
        region: RegionKey::Occipital,
        title: "Distance Gaze",
        blurb: "Look far away for 30 seconds to reduce visual load.",
        goal_metric: Some("HR ↓"),
        mechanic: Mechanic::Focus { duration_secs: 60 },
        dark_overlay: false,
    },
    Activity {
        id: "blink-counter",
        region: RegionKey::Occipital,
        title: "Blink Counter",
        blurb: "Guided blinking to reset eye strain.",
        goal_metric: Some("HR ↓"),
        mechanic: Mechanic::Tapping { target_taps: 10 },
        dark_overlay: false,
    },
    Activity {
        id: "dark-meditation",
        region: RegionKey::Occipital,
        title: "Dark Mode Meditation",
        blurb: "Minimal screen + short breath guide.",
        goal_metric: Some("HF ↑"),
        mechanic: Mechanic::Breathing {
            duration_secs: 120,
            inhale_secs: 6,
            exhale_secs: 6,
        },
        dark_overlay: true,
    },
    // Spinal
    Activity {
        id: "coherent-breath-3",
        region: RegionKey::Spinal,
        title: "3-Min Coherent Breathing",
        blurb: "The global reset: inhale 5, exhale 5.",
        goal_metric: Some("HF ↑, RMSSD ↑"),
        mechanic: Mechanic::Breathing {
            duration_secs: 180,
            inhale_secs: 5,
            exhale_secs: 5,
        },
        dark_overlay: false,
    },
    Activity {
        id: "micro-walk-spinal",
        region: RegionKey::Spinal,
        title: "3-Min Micro Walk",
        blurb: "Movement to reduce global stress score.",
        goal_metric: Some("LF/HF normalizes"),
        mechanic: Mechanic::Prompts { steps: WALK_STEPS },
        dark_overlay: false,
    },
    Activity {
        id: "cold-reset",
        region: RegionKey::Spinal,
        title: "Cold Reset",
        blurb: "Short cold splash prompt for rapid downshift.",
        goal_metric: Some("HR ↓"),
        mechanic: Mechanic::Prompts {
            steps: &[
                "Go to a sink and get cold water.",
                "Splash it on your face.",
                "Hold a cold towel to your neck for 10 seconds.",
            ],
        },
        dark_overlay: false,
    },
];

/// Read-only view over a set of activities.
#[derive(Debug, Clone, Copy)]
pub struct ActivityCatalog {
    activities: &'static [Activity],
}

/// The built-in catalog.
pub const CATALOG: ActivityCatalog = ActivityCatalog {
    activities: ACTIVITIES,
};

impl ActivityCatalog {
    /// Every activity, grouped by region in canonical order.
    pub fn all(&self) -> &'static [Activity] {
        self.activities
    }

    /// Activities that relieve one region.
    pub fn for_region(&self, region: RegionKey) -> impl Iterator<Item = &'static Activity> {
        let activities = self.activities;
        activities.iter().filter(move |a| a.region == region)
    }

    /// Look an activity up by id.
    pub fn find(&self, id: &str) -> Result<&'static Activity, StressError> {
        self.activities
            .iter()
            .find(|a| a.id == id)
            .ok_or_else(|| StressError::UnknownActivity(id.to_string()))
    }

    /// Activities to offer for the dominant region.
    ///
    /// Empty when no region is elevated.
    pub fn recommend(&self, dominant: &DominantRegion) -> Vec<&'static Activity> {
        if !dominant.elevated {
            return Vec::new();
        }
        self.for_region(dominant.region).collect()
    }
}

impl Default for ActivityCatalog {
    fn default() -> Self {
        CATALOG
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_region_has_activities() {
        for region in RegionKey::ALL {
            assert!(CATALOG.for_region(region).count() >= 2, "{region} has no activities");
        }
        assert_eq!(CATALOG.for_region(RegionKey::Cerebellum).count(), 4);
    }

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<_> = CATALOG.all().iter().map(|a| a.id).collect();
        assert_eq!(ids.len(), CATALOG.all().len());
    }

    #[test]
    fn test_find() {
        let activity = CATALOG.find("coherent-breath-3").unwrap();
        assert_eq!(activity.region, RegionKey::Spinal);
        assert_eq!(activity.mechanic.breath_cycles(), Some(18));
        assert_eq!(
            CATALOG.find("juggling").unwrap_err(),
            StressError::UnknownActivity("juggling".to_string())
        );
    }

    #[test]
    fn test_recommend_requires_elevation() {
        let calm = DominantRegion {
            region: RegionKey::Frontal,
            value: 0.05,
            elevated: false,
        };
        assert!(CATALOG.recommend(&calm).is_empty());

        let stressed = DominantRegion {
            region: RegionKey::Frontal,
            value: 0.8,
            elevated: true,
        };
        let ids: Vec<_> = CATALOG.recommend(&stressed).iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["mindfulness-90", "focus-lock", "journal-flash"]);
    }

    #[test]
    fn test_dark_overlay_only_for_dark_meditation() {
        let dark: Vec<_> = CATALOG.all().iter().filter(|a| a.dark_overlay).collect();
        assert_eq!(dark.len(), 1);
        assert_eq!(dark[0].id, "dark-meditation");
    }
}
