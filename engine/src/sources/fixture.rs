//! In-process sample source for previews and testing.
//!
//! [`FixtureSampleSource`] holds hourly samples and answers any
//! [`SampleSource::read_buckets`] request by summing them into buckets of the
//! requested width, aligned to the start of the requested range.
//!
//! # Features
//!
//! - **Failure injection**: fail every read, or only the next few
//! - **Latency simulation**: delay individual reads to reorder completions
//! - **Request log**: inspect which ranges were asked for

use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::{Duration, FixedOffset, NaiveDate};
use fitness_tracker_shared::models::local_midnight;
use fitness_tracker_shared::{BucketWidth, RawBucketSample, SourceError, TimeRange};
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use super::SampleSource;

/// Average energy per step used for generated preview samples, in kcal
const PREVIEW_KCAL_PER_STEP: f64 = 0.04;

/// Average stride used for generated preview samples, in meters
const PREVIEW_METERS_PER_STEP: f64 = 0.75;

/// Daily totals for the six days before today in the preview week
const PREVIEW_PAST_DAYS: [u32; 6] = [4500, 7000, 3000, 8500, 5000, 2000];

/// Today's hourly activity in the preview
const PREVIEW_TODAY_HOURS: [(i64, u32); 5] =
    [(8, 450), (10, 1200), (12, 800), (14, 1500), (16, 600)];

/// A sample source backed by an in-memory list of hourly samples
#[derive(Default)]
pub struct FixtureSampleSource {
    samples: RwLock<Vec<RawBucketSample>>,
    requests: RwLock<Vec<(TimeRange, BucketWidth)>>,
    read_count: AtomicU32,
    /// Failure returned by every read until cleared
    failure: RwLock<Option<SourceError>>,
    /// One-shot failures, consumed before `failure` is consulted
    queued_failures: Mutex<VecDeque<SourceError>>,
    /// Latency applied to reads that have no queued latency (0 = no delay)
    read_latency_ms: AtomicU64,
    /// Per-read latencies, consumed in call order
    queued_latencies: Mutex<VecDeque<StdDuration>>,
}

impl std::fmt::Debug for FixtureSampleSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixtureSampleSource")
            .field("read_count", &self.read_count.load(Ordering::Relaxed))
            .field("read_latency_ms", &self.read_latency_ms.load(Ordering::Relaxed))
            .finish()
    }
}

impl FixtureSampleSource {
    /// Create an empty source that reports no activity
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source holding `samples`
    pub fn with_samples(samples: Vec<RawBucketSample>) -> Self {
        Self {
            samples: RwLock::new(samples),
            ..Self::default()
        }
    }

    /// Create a source with a plausible week of activity ending on `today`
    pub fn preview(today: NaiveDate, offset: FixedOffset) -> Self {
        let mut samples = Vec::new();

        for (days_back, steps) in (1..=6i64).rev().zip(PREVIEW_PAST_DAYS) {
            samples.push(preview_sample(today - Duration::days(days_back), 12, steps, offset));
        }
        for (hour, steps) in PREVIEW_TODAY_HOURS {
            samples.push(preview_sample(today, hour, steps, offset));
        }

        Self::with_samples(samples)
    }

    /// Add one sample
    pub async fn push_sample(&self, sample: RawBucketSample) {
        self.samples.write().await.push(sample);
    }

    /// Fail every read with `error` until [`clear_failure`](Self::clear_failure) is called
    pub async fn fail_with(&self, error: SourceError) {
        *self.failure.write().await = Some(error);
    }

    pub async fn clear_failure(&self) {
        *self.failure.write().await = None;
    }

    /// Fail only the next read with `error`
    pub async fn fail_next(&self, error: SourceError) {
        self.queued_failures.lock().await.push_back(error);
    }

    /// Delay every read by `latency`
    pub fn set_read_latency(&self, latency: StdDuration) {
        let millis = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
        self.read_latency_ms.store(millis, Ordering::Relaxed);
    }

    /// Delay the next reads, in call order, by the given latencies
    pub async fn queue_latencies(&self, latencies: impl IntoIterator<Item = StdDuration>) {
        self.queued_latencies.lock().await.extend(latencies);
    }

    /// Number of reads served or failed so far
    pub fn read_count(&self) -> u32 {
        self.read_count.load(Ordering::Relaxed)
    }

    /// Every requested range and width, in call order
    pub async fn requests(&self) -> Vec<(TimeRange, BucketWidth)> {
        self.requests.read().await.clone()
    }

    async fn next_latency(&self) -> StdDuration {
        match self.queued_latencies.lock().await.pop_front() {
            Some(latency) => latency,
            None => StdDuration::from_millis(self.read_latency_ms.load(Ordering::Relaxed)),
        }
    }

    async fn next_failure(&self) -> Option<SourceError> {
        if let Some(error) = self.queued_failures.lock().await.pop_front() {
            return Some(error);
        }
        self.failure.read().await.clone()
    }
}

#[async_trait]
impl SampleSource for FixtureSampleSource {
    async fn read_buckets(
        &self,
        range: TimeRange,
        width: BucketWidth,
    ) -> Result<Vec<RawBucketSample>, SourceError> {
        self.read_count.fetch_add(1, Ordering::Relaxed);
        self.requests.write().await.push((range, width));

        // Latency and failure are decided at call time so concurrent reads
        // pick them up in the order they were issued
        let latency = self.next_latency().await;
        let failure = self.next_failure().await;

        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        if let Some(error) = failure {
            debug!(error = %error, "Fixture read failed");
            return Err(error);
        }

        let samples = self.samples.read().await;
        let buckets = rebucket(&samples, range, width);

        let (start, end) = range.epoch_seconds();
        debug!(
            start,
            end,
            ?width,
            buckets = buckets.len(),
            "Fixture read served"
        );
        Ok(buckets)
    }
}

/// Sum samples inside `range` into buckets of `width` aligned to `range.start`
fn rebucket(
    samples: &[RawBucketSample],
    range: TimeRange,
    width: BucketWidth,
) -> Vec<RawBucketSample> {
    let width_secs = width.duration().num_seconds();
    let mut buckets: BTreeMap<i64, RawBucketSample> = BTreeMap::new();

    for sample in samples.iter().filter(|s| range.contains(s.bucket_start)) {
        let index = (sample.bucket_start - range.start).num_seconds() / width_secs;
        let bucket = buckets.entry(index).or_insert_with(|| {
            RawBucketSample::steps(range.start + Duration::seconds(index * width_secs), 0)
        });

        bucket.step_count = bucket.step_count.saturating_add(sample.step_count);
        bucket.calories_expended += sample.calories_expended;
        bucket.distance_meters += sample.distance_meters;
    }

    buckets.into_values().collect()
}

fn preview_sample(date: NaiveDate, hour: i64, steps: u32, offset: FixedOffset) -> RawBucketSample {
    RawBucketSample {
        bucket_start: local_midnight(date, offset) + Duration::hours(hour),
        step_count: steps,
        calories_expended: f64::from(steps) * PREVIEW_KCAL_PER_STEP,
        distance_meters: f64::from(steps) * PREVIEW_METERS_PER_STEP,
    }
}
