//! Sensor sample sources
//!
//! The [`SampleSource`] trait abstracts over the platform fitness API and
//! the in-process [`FixtureSampleSource`] used for previews and tests.
//! Services take an `Arc<dyn SampleSource>` and never know which one they hold.

pub mod fixture;

pub use fixture::FixtureSampleSource;

use async_trait::async_trait;
use fitness_tracker_shared::{BucketWidth, RawBucketSample, SourceError, TimeRange};

/// Supplier of time-bucketed sensor samples
///
/// # Example
///
/// ```ignore
/// use fitness_tracker_engine::sources::SampleSource;
/// use fitness_tracker_shared::{BucketWidth, TimeRange};
///
/// async fn steps_so_far<S: SampleSource + ?Sized>(source: &S, range: TimeRange) -> u32 {
///     source
///         .read_buckets(range, BucketWidth::Day)
///         .await
///         .map(|buckets| buckets.iter().map(|b| b.step_count).sum())
///         .unwrap_or(0)
/// }
/// ```
#[async_trait]
pub trait SampleSource: Send + Sync {
    /// Read buckets of `width` covering the half-open `range`, oldest first
    ///
    /// Buckets without any recorded activity may be omitted.
    async fn read_buckets(
        &self,
        range: TimeRange,
        width: BucketWidth,
    ) -> Result<Vec<RawBucketSample>, SourceError>;
}
