//! A single viewing session.
//!
//! The session owns the live regional vector, so callers pass it to
//! whatever needs to read or relieve stress instead of sharing a global.
//! Completed activities are kept in memory only and vanish with the
//! session.

use crate::activities::{Activity, ActivityCatalog, CATALOG};
use crate::config::Config;
use crate::core::{
    round3, score, DominantRegion, RegionKey, RegionStressStore, RegionalStressVector,
    StressError, StressReport, VitalsSnapshot, DEFAULT_RELIEF, ELEVATION_THRESHOLD,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use uuid::Uuid;

/// Per-session tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSettings {
    pub relief_amount: f64,
    pub elevation_threshold: f64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            relief_amount: DEFAULT_RELIEF,
            elevation_threshold: ELEVATION_THRESHOLD,
        }
    }
}

impl From<&Config> for SessionSettings {
    fn from(config: &Config) -> Self {
        Self {
            relief_amount: config.relief_amount,
            elevation_threshold: config.elevation_threshold,
        }
    }
}

/// Record of one relief step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityCompletion {
    /// Catalog activity, if the relief came from one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_id: Option<String>,
    pub region: RegionKey,
    pub completed_at: DateTime<Utc>,
    pub before: f64,
    pub after: f64,
}

impl ActivityCompletion {
    /// Stress actually removed.
    pub fn relief(&self) -> f64 {
        self.before - self.after
    }

    /// Copy with `before` and `after` rounded for display.
    pub fn rounded(&self) -> Self {
        Self {
            before: round3(self.before),
            after: round3(self.after),
            ..self.clone()
        }
    }
}

/// Aggregate view of a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub duration_secs: u64,
    pub global_at_start: f64,
    pub completions: usize,
    pub total_relief: f64,
    /// Mean of the current regional values
    pub mean_stress: f64,
    /// Population standard deviation of the current regional values
    pub stress_spread: f64,
    pub dominant: DominantRegion,
}

/// Serializable state of a session for presentation clients.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub global: f64,
    pub regions: RegionalStressVector,
    pub dominant: DominantRegion,
    pub recommended: Vec<&'static str>,
    pub completions: Vec<ActivityCompletion>,
}

/// One viewing session.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    started_at: DateTime<Utc>,
    initial: StressReport,
    store: RegionStressStore,
    relief_amount: f64,
    catalog: ActivityCatalog,
    completions: Vec<ActivityCompletion>,
}

impl Session {
    /// Start a session from a scoring report.
    pub fn start(report: StressReport, settings: SessionSettings) -> Self {
        let mut store =
            RegionStressStore::new().with_elevation_threshold(settings.elevation_threshold);
        store.initialize(report.regions);

        let id = Uuid::new_v4();
        tracing::info!(session_id = %id, global = report.global, "session started");

        Self {
            id,
            started_at: Utc::now(),
            initial: report,
            store,
            relief_amount: settings.relief_amount,
            catalog: CATALOG,
            completions: Vec::new(),
        }
    }

    /// Score a reading and start a session from it.
    pub fn from_snapshot(
        snapshot: &VitalsSnapshot,
        settings: SessionSettings,
    ) -> Result<Self, StressError> {
        Ok(Self::start(score(snapshot)?, settings))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// The report the session was started from.
    pub fn initial_report(&self) -> &StressReport {
        &self.initial
    }

    /// Relief applied per completion.
    pub fn relief_amount(&self) -> f64 {
        self.relief_amount
    }

    /// Current regional vector.
    pub fn current_vector(&self) -> Result<RegionalStressVector, StressError> {
        self.store.current_vector()
    }

    /// Most stressed region right now.
    pub fn dominant(&self) -> Result<DominantRegion, StressError> {
        self.store.most_stressed_region()
    }

    /// Activities offered for the dominant region, if it is elevated.
    pub fn recommendations(&self) -> Result<Vec<&'static Activity>, StressError> {
        Ok(self.catalog.recommend(&self.dominant()?))
    }

    /// Record a finished catalog activity and relieve its region.
    pub fn complete_activity(&mut self, activity_id: &str) -> Result<ActivityCompletion, StressError> {
        let activity = self.catalog.find(activity_id).map_err(|e| {
            tracing::warn!(session_id = %self.id, activity_id, "unknown activity");
            e
        })?;
        let amount = self.relief_amount;
        self.relieve(activity.region, amount, Some(activity.id.to_string()))
    }

    /// Relieve a region by the session's relief amount without a catalog activity.
    pub fn complete_region(&mut self, region: RegionKey) -> Result<ActivityCompletion, StressError> {
        self.relieve(region, self.relief_amount, None)
    }

    /// Relieve a region by an explicit amount.
    pub fn relieve_region(
        &mut self,
        region: RegionKey,
        amount: f64,
    ) -> Result<ActivityCompletion, StressError> {
        self.relieve(region, amount, None)
    }

    fn relieve(
        &mut self,
        region: RegionKey,
        amount: f64,
        activity_id: Option<String>,
    ) -> Result<ActivityCompletion, StressError> {
        let before = self.store.current_vector()?.get(region);
        let after = self.store.decrement(region, amount)?.get(region);

        let completion = ActivityCompletion {
            activity_id,
            region,
            completed_at: Utc::now(),
            before,
            after,
        };

        tracing::info!(
            session_id = %self.id,
            region = %region,
            activity = completion.activity_id.as_deref().unwrap_or("-"),
            before,
            after,
            "activity completed"
        );

        self.completions.push(completion.clone());
        Ok(completion)
    }

    /// Every relief step so far, oldest first.
    pub fn completions(&self) -> &[ActivityCompletion] {
        &self.completions
    }

    /// Aggregate statistics for the session.
    pub fn summary(&self) -> Result<SessionSummary, StressError> {
        let values = self.current_vector()?.values();

        Ok(SessionSummary {
            session_id: self.id,
            started_at: self.started_at,
            duration_secs: (Utc::now() - self.started_at).num_seconds().max(0) as u64,
            global_at_start: round3(self.initial.global),
            completions: self.completions.len(),
            total_relief: round3(self.completions.iter().map(|c| c.relief()).sum()),
            mean_stress: round3(values.iter().mean()),
            stress_spread: round3(values.iter().population_std_dev()),
            dominant: self.dominant()?.rounded(),
        })
    }

    /// Display-ready state.
    pub fn view(&self) -> Result<SessionView, StressError> {
        Ok(SessionView {
            session_id: self.id,
            started_at: self.started_at,
            global: round3(self.initial.global),
            regions: self.current_vector()?.rounded(),
            dominant: self.dominant()?.rounded(),
            recommended: self.recommendations()?.iter().map(|a| a.id).collect(),
            completions: self.completions.iter().map(|c| c.rounded()).collect(),
        })
    }
}
