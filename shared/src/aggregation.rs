//! Step aggregation module
//!
//! Turns time-bucketed sensor samples into the per-day and per-hour records
//! shown on the dashboard and history screens, and into today's snapshot.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: No I/O; callers fetch samples first and hand them in
//! 2. **Local Time**: Dates and hours come from the bucket's own UTC offset
//! 3. **Fixed Week Shape**: A week is always seven records, Monday to Sunday

use chrono::{Datelike, Duration, NaiveDate, Timelike};
use serde::Serialize;

use crate::models::{DailyStepRecord, FitnessSnapshot, HourlyStepRecord, RawBucketSample};

/// Steps per heart point in the history view
pub const STEPS_PER_HEART_POINT: u64 = 100;

/// Days in an aggregated week
pub const DAYS_PER_WEEK: i64 = 7;

// ============================================================================
// Calendar Helpers
// ============================================================================

/// The Monday on or before `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Short weekday name ("Mon" .. "Sun")
pub fn day_label(date: NaiveDate) -> String {
    date.format("%a").to_string()
}

/// Clock label for an hour of the day, e.g. "12 am", "1 pm"
pub fn hour_label(hour_of_day: u32) -> String {
    let suffix = if hour_of_day % 24 < 12 { "am" } else { "pm" };
    match hour_of_day % 12 {
        0 => format!("12 {suffix}"),
        hour => format!("{hour} {suffix}"),
    }
}

/// Label for the week starting at `week_start_date`, e.g. "7 Oct – 13 Oct"
pub fn week_range_label(week_start_date: NaiveDate) -> String {
    let start = week_start(week_start_date);
    let end = start + Duration::days(DAYS_PER_WEEK - 1);
    format!("{} – {}", start.format("%-d %b"), end.format("%-d %b"))
}

/// Heart points earned for a step total
pub fn heart_points(steps: u64) -> u64 {
    steps / STEPS_PER_HEART_POINT
}

// ============================================================================
// Daily / Hourly Aggregation
// ============================================================================

/// Build the seven daily records of the week containing `week_start_date`
///
/// Days without a sensor bucket become zero-step records. When several
/// buckets fall on the same date, the first one in input order wins.
pub fn compute_daily(
    samples: &[RawBucketSample],
    week_start_date: NaiveDate,
    goal: u32,
) -> Vec<DailyStepRecord> {
    let monday = week_start(week_start_date);

    (0..DAYS_PER_WEEK)
        .map(|offset| {
            let date = monday + Duration::days(offset);
            let steps = samples
                .iter()
                .find(|sample| sample.local_date() == date)
                .map(|sample| sample.step_count)
                .unwrap_or(0);
            DailyStepRecord::for_date(date, steps, goal)
        })
        .collect()
}

/// Build hourly records for the buckets that fall on `day`
///
/// Hours without a bucket are not filled in. Output is sorted by hour;
/// buckets sharing an hour keep their input order.
pub fn compute_hourly(samples: &[RawBucketSample], day: NaiveDate) -> Vec<HourlyStepRecord> {
    let mut records: Vec<HourlyStepRecord> = samples
        .iter()
        .filter(|sample| sample.local_date() == day)
        .map(|sample| HourlyStepRecord {
            hour_of_day: sample.bucket_start.hour(),
            step_count: sample.step_count,
        })
        .collect();

    records.sort_by_key(|record| record.hour_of_day);
    records
}

/// Hours with any activity, most recent first
pub fn active_hours(records: &[HourlyStepRecord]) -> Vec<HourlyStepRecord> {
    let mut active: Vec<HourlyStepRecord> = records
        .iter()
        .filter(|record| record.step_count > 0)
        .copied()
        .collect();

    active.sort_by(|a, b| b.hour_of_day.cmp(&a.hour_of_day));
    active
}

/// Build today's snapshot from the single day bucket covering today
///
/// A missing bucket counts as zero activity. Water intake is never
/// sensor-derived and is carried over from `prior`.
pub fn compute_today_snapshot(
    samples: &[RawBucketSample],
    prior: &FitnessSnapshot,
) -> FitnessSnapshot {
    let bucket = samples.first();

    FitnessSnapshot {
        step_count: bucket.map(|b| b.step_count).unwrap_or(0),
        calories_expended: bucket.map(|b| b.calories_expended).unwrap_or(0.0),
        distance_meters: bucket.map(|b| b.distance_meters).unwrap_or(0.0),
        water_intake_ml: prior.water_intake_ml,
    }
}

// ============================================================================
// Weekly Summary
// ============================================================================

/// Totals over a computed week
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklySummary {
    pub days: Vec<DailyStepRecord>,
    pub total_steps: u64,
    /// Number of days on which the step goal was reached
    pub goals_reached: usize,
    pub heart_points: u64,
}

impl WeeklySummary {
    pub fn from_days(days: Vec<DailyStepRecord>) -> Self {
        let total_steps: u64 = days.iter().map(|d| u64::from(d.step_count())).sum();
        let goals_reached = days.iter().filter(|d| d.goal_reached()).count();

        Self {
            heart_points: heart_points(total_steps),
            days,
            total_steps,
            goals_reached,
        }
    }
}
