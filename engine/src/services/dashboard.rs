//! Home dashboard composition

use chrono::{DateTime, FixedOffset};
use fitness_tracker_shared::DashboardSummary;
use std::sync::Arc;
use tracing::debug;

use crate::error::EngineResult;
use crate::services::{GoalsService, HistoryService, TrackerService};

/// Builds the dashboard from the tracker, history and goals services
///
/// Only reads current state; call [`TrackerService::refresh_today`] first
/// for fresh sensor totals.
#[derive(Clone)]
pub struct DashboardService {
    tracker: Arc<TrackerService>,
    history: HistoryService,
    goals: GoalsService,
}

impl DashboardService {
    pub fn new(tracker: Arc<TrackerService>, history: HistoryService, goals: GoalsService) -> Self {
        Self {
            tracker,
            history,
            goals,
        }
    }

    /// Dashboard for `username` as of `now`
    pub async fn summary(
        &self,
        username: &str,
        now: DateTime<FixedOffset>,
    ) -> EngineResult<DashboardSummary> {
        let goals = self.goals.goals().await?;
        let snapshot = self.tracker.snapshot().await;
        let week = self
            .history
            .weekly_summary(now.date_naive(), *now.offset(), goals.daily_step_goal)
            .await?;
        let today_hours = self.history.hourly(now.date_naive(), now).await?;

        debug!(
            username,
            goals_reached = week.goals_reached,
            active_hours = today_hours.len(),
            "Dashboard composed"
        );
        Ok(DashboardSummary::build(username, snapshot, goals, &week, &today_hours))
    }
}
