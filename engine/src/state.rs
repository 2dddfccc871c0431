//! Application state management
//!
//! Wires the collaborators (metric store, sample source) into the services
//! once at startup. Nothing reaches for a global; everything a service needs
//! is handed to it here.
//!
//! # Design Principles
//!
//! 1. **Explicit collaborators**: store and source are injected, so tests and
//!    previews swap in fixtures without flags
//! 2. **Cheap cloning**: all fields are `Arc` or wrap one

use chrono::{DateTime, FixedOffset};
use fitness_tracker_shared::{DashboardSummary, HistoryView};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::EngineResult;
use crate::services::{DashboardService, GoalsService, HistoryService, TrackerService};
use crate::sources::SampleSource;
use crate::store::{MetricStore, PreferencesRepository};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn MetricStore>,
    pub source: Arc<dyn SampleSource>,
    pub tracker: Arc<TrackerService>,
    pub history: HistoryService,
    pub goals: GoalsService,
    pub dashboard: DashboardService,
}

impl AppState {
    /// Build every service over the given collaborators
    ///
    /// Loads the persisted snapshot, so this should only be called once at
    /// startup.
    pub async fn new(
        config: AppConfig,
        store: Arc<dyn MetricStore>,
        source: Arc<dyn SampleSource>,
    ) -> EngineResult<Self> {
        let preferences = PreferencesRepository::new(store.clone());
        let tracker = Arc::new(
            TrackerService::load(source.clone(), preferences.clone(), config.tracker.water_step_ml)
                .await?,
        );
        let history = HistoryService::new(source.clone());
        let goals = GoalsService::new(preferences);
        let dashboard = DashboardService::new(tracker.clone(), history.clone(), goals.clone());

        Ok(Self {
            config: Arc::new(config),
            store,
            source,
            tracker,
            history,
            goals,
            dashboard,
        })
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Dashboard for the configured user
    pub async fn dashboard_for_user(
        &self,
        now: DateTime<FixedOffset>,
    ) -> EngineResult<DashboardSummary> {
        self.dashboard.summary(&self.config.user.name, now).await
    }

    /// Current week's history against the saved step goal
    pub async fn current_week(&self, now: DateTime<FixedOffset>) -> EngineResult<HistoryView> {
        let goals = self.goals.goals().await?;
        self.history.week(now, goals.daily_step_goal).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::FixtureSampleSource;
    use crate::store::MemoryMetricStore;
    use chrono::TimeZone;

    #[tokio::test]
    async fn test_state_clone_shares_services() {
        let state = AppState::new(
            AppConfig::default(),
            Arc::new(MemoryMetricStore::new()),
            Arc::new(FixtureSampleSource::new()),
        )
        .await
        .unwrap();
        let cloned = state.clone();

        state.tracker.add_water().await.unwrap();

        assert_eq!(cloned.tracker.snapshot().await.water_intake_ml, 250);
        assert_eq!(cloned.config().user.name, "guest");
    }

    #[tokio::test]
    async fn test_current_week_uses_saved_goal() {
        let now = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 10, 9, 12, 0, 0)
            .unwrap();
        let source = Arc::new(FixtureSampleSource::with_samples(vec![
            fitness_tracker_shared::RawBucketSample::steps(now, 6_000),
        ]));
        let state = AppState::new(AppConfig::default(), Arc::new(MemoryMetricStore::new()), source)
            .await
            .unwrap();
        state.goals.save_goals(5_000, 2_000).await.unwrap();

        let week = state.current_week(now).await.unwrap();

        assert_eq!(week.goals_reached, 1);
    }
}
