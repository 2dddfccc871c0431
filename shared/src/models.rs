//! Data models for the Fitness Tracker core

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::validation::{validate_step_goal, validate_water_goal};

/// Default daily step goal
pub const DEFAULT_STEP_GOAL: u32 = 10_000;

/// Default daily hydration goal in ml
pub const DEFAULT_WATER_GOAL_ML: u32 = 2_000;

// ============================================================================
// Sensor Samples
// ============================================================================

/// Width of the time buckets a sample source pre-aggregates into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketWidth {
    Hour,
    Day,
}

impl BucketWidth {
    pub fn duration(&self) -> Duration {
        match self {
            BucketWidth::Hour => Duration::hours(1),
            BucketWidth::Day => Duration::days(1),
        }
    }
}

/// One pre-aggregated bucket as delivered by the sensor platform
///
/// `bucket_start` keeps the local UTC offset so that calendar date and hour
/// of day are always derived in local wall-clock time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBucketSample {
    pub bucket_start: DateTime<FixedOffset>,
    pub step_count: u32,
    #[serde(default)]
    pub calories_expended: f64,
    #[serde(default)]
    pub distance_meters: f64,
}

impl RawBucketSample {
    /// Sample carrying only a step count
    pub fn steps(bucket_start: DateTime<FixedOffset>, step_count: u32) -> Self {
        Self {
            bucket_start,
            step_count,
            calories_expended: 0.0,
            distance_meters: 0.0,
        }
    }

    /// Local calendar date of the bucket start
    pub fn local_date(&self) -> NaiveDate {
        self.bucket_start.date_naive()
    }
}

/// Half-open time range `[start, end)` in local wall-clock time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl TimeRange {
    pub fn new(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Self {
        Self { start, end }
    }

    /// The whole calendar day `date`
    pub fn day(date: NaiveDate, offset: FixedOffset) -> Self {
        let start = local_midnight(date, offset);
        Self {
            start,
            end: start + Duration::days(1),
        }
    }

    /// From local midnight of `now` up to `now`
    pub fn today_so_far(now: DateTime<FixedOffset>) -> Self {
        Self {
            start: local_midnight(now.date_naive(), *now.offset()),
            end: now,
        }
    }

    pub fn contains(&self, instant: DateTime<FixedOffset>) -> bool {
        instant >= self.start && instant < self.end
    }

    /// Range bounds as epoch seconds, the form platform APIs accept
    pub fn epoch_seconds(&self) -> (i64, i64) {
        (self.start.timestamp(), self.end.timestamp())
    }
}

/// Local midnight of `date` at the given offset
pub fn local_midnight(date: NaiveDate, offset: FixedOffset) -> DateTime<FixedOffset> {
    let local = NaiveDateTime::new(date, NaiveTime::MIN);
    let utc = local - Duration::seconds(i64::from(offset.local_minus_utc()));
    DateTime::from_naive_utc_and_offset(utc, offset)
}

// ============================================================================
// Aggregated Records
// ============================================================================

/// Steps recorded within one hour of a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyStepRecord {
    /// Hour of day in local time, 0-23
    pub hour_of_day: u32,
    pub step_count: u32,
}

/// Steps recorded on one calendar day, with the goal flag derived from them
///
/// Fields are private so `goal_reached` can only come from comparing the
/// step count against a goal at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyStepRecord {
    day_label: String,
    step_count: u32,
    goal_reached: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    calendar_date: Option<NaiveDate>,
}

impl DailyStepRecord {
    /// Build the record for `date`, labelled with its short weekday name
    pub fn for_date(date: NaiveDate, step_count: u32, goal: u32) -> Self {
        Self {
            day_label: crate::aggregation::day_label(date),
            step_count,
            goal_reached: step_count >= goal,
            calendar_date: Some(date),
        }
    }

    pub fn day_label(&self) -> &str {
        &self.day_label
    }

    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    pub fn goal_reached(&self) -> bool {
        self.goal_reached
    }

    pub fn calendar_date(&self) -> Option<NaiveDate> {
        self.calendar_date
    }
}

// ============================================================================
// Snapshot and Settings
// ============================================================================

/// Today's cumulative totals
///
/// Sensor fields are replaced on every refresh; `water_intake_ml` is only
/// changed by manual increments and decrements.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FitnessSnapshot {
    pub step_count: u32,
    pub calories_expended: f64,
    pub distance_meters: f64,
    pub water_intake_ml: u32,
}

/// User goals, saved together from the settings screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalConfig {
    pub daily_step_goal: u32,
    pub daily_water_goal_ml: u32,
}

impl Default for GoalConfig {
    fn default() -> Self {
        Self {
            daily_step_goal: DEFAULT_STEP_GOAL,
            daily_water_goal_ml: DEFAULT_WATER_GOAL_ML,
        }
    }
}

impl GoalConfig {
    /// Validated constructor; both goals must be positive
    pub fn new(daily_step_goal: u32, daily_water_goal_ml: u32) -> Result<Self, String> {
        validate_step_goal(i64::from(daily_step_goal))?;
        validate_water_goal(i64::from(daily_water_goal_ml))?;
        Ok(Self {
            daily_step_goal,
            daily_water_goal_ml,
        })
    }
}

/// Theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThemeMode {
    #[default]
    System,
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::System => "System",
            ThemeMode::Light => "Light",
            ThemeMode::Dark => "Dark",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" | "auto" => Ok(ThemeMode::System),
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            _ => Err(format!("Unknown theme mode: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn offset() -> FixedOffset {
        FixedOffset::east_opt(2 * 3600).unwrap()
    }

    #[test]
    fn test_goal_config_defaults() {
        let goals = GoalConfig::default();
        assert_eq!(goals.daily_step_goal, 10_000);
        assert_eq!(goals.daily_water_goal_ml, 2_000);
    }

    #[test]
    fn test_goal_config_rejects_zero() {
        assert!(GoalConfig::new(0, 2000).is_err());
        assert!(GoalConfig::new(8000, 0).is_err());
        assert_eq!(
            GoalConfig::new(8000, 2500).unwrap(),
            GoalConfig {
                daily_step_goal: 8000,
                daily_water_goal_ml: 2500
            }
        );
    }

    #[test]
    fn test_daily_record_goal_flag_is_derived() {
        let date = NaiveDate::from_ymd_opt(2024, 10, 9).unwrap();
        assert!(DailyStepRecord::for_date(date, 10_000, 10_000).goal_reached());
        assert!(!DailyStepRecord::for_date(date, 9_999, 10_000).goal_reached());
        assert_eq!(DailyStepRecord::for_date(date, 0, 10_000).day_label(), "Wed");
    }

    #[test]
    fn test_local_midnight_respects_offset() {
        let date = NaiveDate::from_ymd_opt(2024, 10, 9).unwrap();
        let midnight = local_midnight(date, offset());
        assert_eq!(midnight.date_naive(), date);
        assert_eq!(midnight.format("%H:%M").to_string(), "00:00");
        assert_eq!(
            midnight.timestamp(),
            chrono::Utc.with_ymd_and_hms(2024, 10, 8, 22, 0, 0).unwrap().timestamp()
        );
    }

    #[test]
    fn test_day_range_is_half_open() {
        let date = NaiveDate::from_ymd_opt(2024, 10, 9).unwrap();
        let range = TimeRange::day(date, offset());
        assert!(range.contains(range.start));
        assert!(!range.contains(range.end));
        let (start, end) = range.epoch_seconds();
        assert_eq!(end - start, 86_400);
    }

    #[test]
    fn test_theme_mode_parse_and_display() {
        assert_eq!("dark".parse::<ThemeMode>().unwrap(), ThemeMode::Dark);
        assert_eq!("System".parse::<ThemeMode>().unwrap(), ThemeMode::System);
        assert!("sepia".parse::<ThemeMode>().is_err());
        assert_eq!(ThemeMode::default().to_string(), "System");
    }
}
