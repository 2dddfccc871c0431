//! View types handed to the presentation layer

use chrono::NaiveDate;
use serde::Serialize;

use crate::aggregation::{active_hours, heart_points, hour_label, week_range_label, WeeklySummary};
use crate::models::{DailyStepRecord, FitnessSnapshot, GoalConfig, HourlyStepRecord};
use crate::progress::{is_goal_met, progress, remaining};

/// One hour row in the activity lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourView {
    pub hour_of_day: u32,
    pub step_count: u32,
    /// "9 am", "2 pm", ...
    pub label: String,
}

impl From<HourlyStepRecord> for HourView {
    fn from(record: HourlyStepRecord) -> Self {
        Self {
            hour_of_day: record.hour_of_day,
            step_count: record.step_count,
            label: hour_label(record.hour_of_day),
        }
    }
}

/// Active hours, most recent first, ready for display
fn active_hour_views(hours: &[HourlyStepRecord]) -> Vec<HourView> {
    active_hours(hours).into_iter().map(HourView::from).collect()
}

/// Everything the home dashboard shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub username: String,
    pub snapshot: FitnessSnapshot,
    pub goals: GoalConfig,
    /// Step ring fill, 0.0-1.0
    pub step_progress: f64,
    /// Steps still needed to reach the daily goal
    pub steps_remaining: u32,
    /// Hydration bar fill, 0.0-1.0
    pub water_progress: f64,
    pub water_goal_reached: bool,
    pub goals_reached_this_week: usize,
    /// Today's hours with activity, most recent first
    pub active_hours: Vec<HourView>,
}

impl DashboardSummary {
    pub fn build(
        username: impl Into<String>,
        snapshot: FitnessSnapshot,
        goals: GoalConfig,
        week: &WeeklySummary,
        today_hours: &[HourlyStepRecord],
    ) -> Self {
        let step_progress = progress(
            f64::from(snapshot.step_count),
            f64::from(goals.daily_step_goal),
        );
        let steps_remaining = remaining(
            f64::from(snapshot.step_count),
            f64::from(goals.daily_step_goal),
        ) as u32;
        let water_progress = progress(
            f64::from(snapshot.water_intake_ml),
            f64::from(goals.daily_water_goal_ml),
        );
        let water_goal_reached = is_goal_met(
            f64::from(snapshot.water_intake_ml),
            f64::from(goals.daily_water_goal_ml),
        );

        Self {
            username: username.into(),
            snapshot,
            goals,
            step_progress,
            steps_remaining,
            water_progress,
            water_goal_reached,
            goals_reached_this_week: week.goals_reached,
            active_hours: active_hour_views(today_hours),
        }
    }
}

/// Week tab of the activity history
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryView {
    pub range_label: String,
    pub days: Vec<DailyStepRecord>,
    pub total_steps: u64,
    pub goals_reached: usize,
    pub heart_points: u64,
}

impl HistoryView {
    pub fn from_week(week_start: NaiveDate, summary: WeeklySummary) -> Self {
        Self {
            range_label: week_range_label(week_start),
            days: summary.days,
            total_steps: summary.total_steps,
            goals_reached: summary.goals_reached,
            heart_points: summary.heart_points,
        }
    }
}

/// Day tab of the activity history
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayHistoryView {
    pub date: NaiveDate,
    pub label: String,
    /// Hours with activity, most recent first
    pub hours: Vec<HourView>,
    pub total_steps: u64,
    pub heart_points: u64,
}

impl DayHistoryView {
    pub fn from_hours(date: NaiveDate, hours: &[HourlyStepRecord]) -> Self {
        let total_steps: u64 = hours.iter().map(|h| u64::from(h.step_count)).sum();

        Self {
            date,
            label: date.format("%A, %-d %b").to_string(),
            hours: active_hour_views(hours),
            total_steps,
            heart_points: heart_points(total_steps),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::compute_daily;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 7).unwrap()
    }

    fn hour(hour_of_day: u32, step_count: u32) -> HourlyStepRecord {
        HourlyStepRecord {
            hour_of_day,
            step_count,
        }
    }

    #[test]
    fn test_dashboard_summary() {
        let snapshot = FitnessSnapshot {
            step_count: 5432,
            calories_expended: 230.0,
            distance_meters: 3800.0,
            water_intake_ml: 2250,
        };
        let week = WeeklySummary::from_days(compute_daily(&[], monday(), 10_000));
        let hours = vec![hour(10, 800), hour(11, 0), hour(12, 1200)];

        let summary =
            DashboardSummary::build("alex", snapshot, GoalConfig::default(), &week, &hours);

        assert!((summary.step_progress - 0.5432).abs() < 1e-9);
        assert_eq!(summary.steps_remaining, 4568);
        assert_eq!(summary.water_progress, 1.0);
        assert!(summary.water_goal_reached);
        assert_eq!(summary.goals_reached_this_week, 0);
        assert_eq!(
            summary.active_hours.iter().map(|h| h.hour_of_day).collect::<Vec<_>>(),
            vec![12, 10]
        );
        assert_eq!(summary.active_hours[0].label, "12 pm");
    }

    #[test]
    fn test_steps_remaining_stops_at_zero() {
        let snapshot = FitnessSnapshot {
            step_count: 12_000,
            ..FitnessSnapshot::default()
        };
        let week = WeeklySummary::from_days(compute_daily(&[], monday(), 10_000));

        let summary = DashboardSummary::build("alex", snapshot, GoalConfig::default(), &week, &[]);

        assert_eq!(summary.steps_remaining, 0);
        assert_eq!(summary.step_progress, 1.0);
    }

    #[test]
    fn test_day_history_totals() {
        let hours = vec![hour(8, 450), hour(14, 1500)];
        let view = DayHistoryView::from_hours(monday(), &hours);
        assert_eq!(view.label, "Monday, 7 Oct");
        assert_eq!(view.total_steps, 1950);
        assert_eq!(view.heart_points, 19);
        assert_eq!(view.hours[0].hour_of_day, 14);
        assert_eq!(view.hours[0].label, "2 pm");
        assert_eq!(view.hours[1].label, "8 am");
    }

    #[test]
    fn test_history_view_serializes_days_in_order() {
        let view = HistoryView::from_week(
            monday(),
            WeeklySummary::from_days(compute_daily(&[], monday(), 10_000)),
        );
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["range_label"], "7 Oct – 13 Oct");
        assert_eq!(json["days"][0]["day_label"], "Mon");
        assert_eq!(json["days"][6]["day_label"], "Sun");
        assert_eq!(json["days"][6]["goal_reached"], false);
    }
}
