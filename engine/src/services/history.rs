//! Activity history service
//!
//! Reads sensor buckets on demand and aggregates them for the week and day
//! tabs. Nothing here is cached or persisted; every call goes to the source.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate};
use fitness_tracker_shared::aggregation::{compute_daily, compute_hourly, week_start, DAYS_PER_WEEK};
use fitness_tracker_shared::models::local_midnight;
use fitness_tracker_shared::{
    BucketWidth, DayHistoryView, HistoryView, HourlyStepRecord, TimeRange, WeeklySummary,
};
use std::sync::Arc;
use tracing::debug;

use crate::error::EngineResult;
use crate::sources::SampleSource;

/// Service for weekly and hourly step history
#[derive(Clone)]
pub struct HistoryService {
    source: Arc<dyn SampleSource>,
}

impl HistoryService {
    pub fn new(source: Arc<dyn SampleSource>) -> Self {
        Self { source }
    }

    /// Seven daily records for the week containing `date`, Monday first
    pub async fn weekly_summary(
        &self,
        date: NaiveDate,
        offset: FixedOffset,
        goal: u32,
    ) -> EngineResult<WeeklySummary> {
        let monday = week_start(date);
        let start = local_midnight(monday, offset);
        let range = TimeRange::new(start, start + Duration::days(DAYS_PER_WEEK));

        let buckets = self.source.read_buckets(range, BucketWidth::Day).await?;
        debug!(week_start = %monday, buckets = buckets.len(), "Read weekly buckets");

        Ok(WeeklySummary::from_days(compute_daily(&buckets, monday, goal)))
    }

    /// Hourly records for `date`, up to `now` when `date` is today
    ///
    /// Dates after today have no activity and are not fetched.
    pub async fn hourly(
        &self,
        date: NaiveDate,
        now: DateTime<FixedOffset>,
    ) -> EngineResult<Vec<HourlyStepRecord>> {
        let today = now.date_naive();
        if date > today {
            return Ok(Vec::new());
        }

        let range = if date == today {
            TimeRange::today_so_far(now)
        } else {
            TimeRange::day(date, *now.offset())
        };

        let buckets = self.source.read_buckets(range, BucketWidth::Hour).await?;
        debug!(%date, buckets = buckets.len(), "Read hourly buckets");

        Ok(compute_hourly(&buckets, date))
    }

    /// Week tab for the current week
    pub async fn week(&self, now: DateTime<FixedOffset>, goal: u32) -> EngineResult<HistoryView> {
        self.week_of(now.date_naive(), *now.offset(), goal).await
    }

    /// Week tab for any week, given one of its dates
    pub async fn week_of(
        &self,
        date: NaiveDate,
        offset: FixedOffset,
        goal: u32,
    ) -> EngineResult<HistoryView> {
        let summary = self.weekly_summary(date, offset, goal).await?;
        Ok(HistoryView::from_week(week_start(date), summary))
    }

    /// Day tab for `date`
    pub async fn day(
        &self,
        date: NaiveDate,
        now: DateTime<FixedOffset>,
    ) -> EngineResult<DayHistoryView> {
        let hours = self.hourly(date, now).await?;
        Ok(DayHistoryView::from_hours(date, &hours))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::sources::FixtureSampleSource;
    use chrono::TimeZone;
    use fitness_tracker_shared::{RawBucketSample, SourceError};

    fn offset() -> FixedOffset {
        FixedOffset::east_opt(-5 * 3600).unwrap()
    }

    fn at(day: u32, hour: u32) -> DateTime<FixedOffset> {
        offset().with_ymd_and_hms(2024, 10, day, hour, 0, 0).unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, day).unwrap()
    }

    fn service(samples: Vec<RawBucketSample>) -> (Arc<FixtureSampleSource>, HistoryService) {
        let source = Arc::new(FixtureSampleSource::with_samples(samples));
        (source.clone(), HistoryService::new(source))
    }

    #[tokio::test]
    async fn test_week_fills_missing_days() {
        // Wednesday 9 Oct and Friday 11 Oct 2024
        let (_, history) = service(vec![
            RawBucketSample::steps(at(9, 9), 4000),
            RawBucketSample::steps(at(9, 18), 3000),
            RawBucketSample::steps(at(11, 7), 12000),
        ]);

        let view = history.week(at(11, 20), 10_000).await.unwrap();

        let days: Vec<(&str, u32, bool)> = view
            .days
            .iter()
            .map(|d| (d.day_label(), d.step_count(), d.goal_reached()))
            .collect();
        assert_eq!(
            days,
            vec![
                ("Mon", 0, false),
                ("Tue", 0, false),
                ("Wed", 7000, false),
                ("Thu", 0, false),
                ("Fri", 12000, true),
                ("Sat", 0, false),
                ("Sun", 0, false),
            ]
        );
        assert_eq!(view.total_steps, 19_000);
        assert_eq!(view.goals_reached, 1);
        assert_eq!(view.heart_points, 190);
        assert_eq!(view.range_label, "7 Oct – 13 Oct");
    }

    #[tokio::test]
    async fn test_week_requests_whole_week_in_days() {
        let (source, history) = service(vec![]);

        history.week_of(date(10), offset(), 10_000).await.unwrap();

        let requests = source.requests().await;
        assert_eq!(requests.len(), 1);
        let (range, width) = requests[0];
        assert_eq!(width, BucketWidth::Day);
        assert_eq!(range.start, at(7, 0));
        assert_eq!(range.end, at(14, 0));
    }

    #[tokio::test]
    async fn test_today_stops_at_now() {
        let (_, history) = service(vec![
            RawBucketSample::steps(at(9, 10), 800),
            RawBucketSample::steps(at(9, 12), 1200),
            RawBucketSample::steps(at(9, 14), 450),
        ]);

        let view = history.day(date(9), at(9, 13)).await.unwrap();

        assert_eq!(view.total_steps, 2000);
        assert_eq!(view.hours.len(), 2);
        assert_eq!(view.hours[0].hour_of_day, 12);
    }

    #[tokio::test]
    async fn test_past_day_reads_whole_day() {
        let (_, history) = service(vec![
            RawBucketSample::steps(at(8, 23), 500),
            RawBucketSample::steps(at(8, 6), 0),
        ]);

        let hours = history.hourly(date(8), at(9, 13)).await.unwrap();
        let view = history.day(date(8), at(9, 13)).await.unwrap();

        let recorded: Vec<u32> = hours.iter().map(|h| h.hour_of_day).collect();
        assert_eq!(recorded, vec![6, 23]);
        assert_eq!(view.hours.len(), 1);
        assert_eq!(view.hours[0].hour_of_day, 23);
    }

    #[tokio::test]
    async fn test_future_day_is_not_fetched() {
        let (source, history) = service(vec![]);

        let view = history.day(date(12), at(9, 13)).await.unwrap();

        assert!(view.hours.is_empty());
        assert_eq!(source.read_count(), 0);
    }

    #[tokio::test]
    async fn test_fetch_error_propagates() {
        let (source, history) = service(vec![]);
        source.fail_next(SourceError::Fetch("offline".to_string())).await;

        let err = history.week(at(9, 13), 10_000).await.unwrap_err();

        assert!(matches!(err, EngineError::Fetch(_)));
    }
}
