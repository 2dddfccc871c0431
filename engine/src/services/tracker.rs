//! Today's snapshot tracking service
//!
//! Owns the single mutable [`FitnessSnapshot`] and keeps the metric store in
//! step with it:
//! - Sensor refreshes with a stale-response guard
//! - Manual water increments and decrements
//! - Write-through persistence on every change

use chrono::{DateTime, FixedOffset};
use fitness_tracker_shared::aggregation::compute_today_snapshot;
use fitness_tracker_shared::hydration::{decrement, increment, WaterChange};
use fitness_tracker_shared::validation::{validate_calories, validate_distance_meters};
use fitness_tracker_shared::{BucketWidth, FitnessSnapshot, RawBucketSample, TimeRange};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::{EngineError, EngineResult};
use crate::sources::SampleSource;
use crate::store::PreferencesRepository;

/// Result of a sensor refresh that did not fail
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// The refresh was the newest to complete and its totals are now current
    Applied(FitnessSnapshot),
    /// A refresh requested later had already been applied; this result was dropped
    Superseded { sequence: u64 },
}

impl RefreshOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, RefreshOutcome::Applied(_))
    }
}

#[derive(Debug)]
struct TrackerState {
    snapshot: FitnessSnapshot,
    /// Sequence number of the newest refresh applied so far (0 = none)
    applied_sequence: u64,
}

/// Service owning today's totals
pub struct TrackerService {
    source: Arc<dyn SampleSource>,
    preferences: PreferencesRepository,
    water_step_ml: u32,
    state: Mutex<TrackerState>,
    next_sequence: AtomicU64,
}

impl TrackerService {
    /// Create the service, starting from the snapshot persisted in the store
    pub async fn load(
        source: Arc<dyn SampleSource>,
        preferences: PreferencesRepository,
        water_step_ml: u32,
    ) -> EngineResult<Self> {
        let snapshot = preferences.load_snapshot().await?;
        debug!(
            steps = snapshot.step_count,
            water_ml = snapshot.water_intake_ml,
            "Loaded persisted snapshot"
        );

        Ok(Self {
            source,
            preferences,
            water_step_ml,
            state: Mutex::new(TrackerState {
                snapshot,
                applied_sequence: 0,
            }),
            next_sequence: AtomicU64::new(0),
        })
    }

    /// Current snapshot
    pub async fn snapshot(&self) -> FitnessSnapshot {
        self.state.lock().await.snapshot.clone()
    }

    /// Re-read today's sensor totals
    ///
    /// Each call is numbered when it starts. A result is applied only if no
    /// call started after it has been applied already, so a slow response can
    /// never overwrite a newer one. Water intake always comes from the
    /// in-memory snapshot at the moment of applying.
    ///
    /// On a source failure nothing changes and the error is returned as is.
    pub async fn refresh_today(&self, now: DateTime<FixedOffset>) -> EngineResult<RefreshOutcome> {
        let sequence = self.next_sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let range = TimeRange::today_so_far(now);
        debug!(
            sequence,
            start = %range.start,
            end = %range.end,
            "Refreshing today's totals"
        );

        let buckets = self
            .source
            .read_buckets(range, BucketWidth::Day)
            .await
            .map_err(|err| {
                warn!(sequence, error = %err, "Refresh failed, keeping previous totals");
                EngineError::from(err)
            })?;
        validate_buckets(&buckets)?;

        let mut state = self.state.lock().await;
        if sequence <= state.applied_sequence {
            warn!(
                sequence,
                applied = state.applied_sequence,
                "Dropping superseded refresh result"
            );
            return Ok(RefreshOutcome::Superseded { sequence });
        }

        let next = compute_today_snapshot(&buckets, &state.snapshot);
        self.preferences.save_snapshot(&next).await?;
        state.snapshot = next.clone();
        state.applied_sequence = sequence;

        info!(
            sequence,
            steps = next.step_count,
            calories = next.calories_expended,
            distance_m = next.distance_meters,
            "Refresh applied"
        );
        Ok(RefreshOutcome::Applied(next))
    }

    /// Add one glass of water, reporting whether this crossed the saved water goal
    pub async fn add_water(&self) -> EngineResult<WaterChange> {
        let goal_ml = self.preferences.goals().await?.daily_water_goal_ml;
        let mut state = self.state.lock().await;
        let change = increment(state.snapshot.water_intake_ml, self.water_step_ml, goal_ml);
        self.commit_water(&mut state, change).await?;

        if change.goal_crossed {
            info!(water_ml = change.current_ml, goal_ml, "Water goal reached");
        }
        Ok(change)
    }

    /// Remove one glass of water, stopping at zero
    pub async fn remove_water(&self) -> EngineResult<WaterChange> {
        let mut state = self.state.lock().await;
        // Decrements never report a crossing, whatever the goal
        let change = decrement(state.snapshot.water_intake_ml, self.water_step_ml, 0);
        self.commit_water(&mut state, change).await?;
        Ok(change)
    }

    async fn commit_water(
        &self,
        state: &mut TrackerState,
        change: WaterChange,
    ) -> EngineResult<()> {
        if change.current_ml == change.previous_ml {
            return Ok(());
        }

        let next = FitnessSnapshot {
            water_intake_ml: change.current_ml,
            ..state.snapshot.clone()
        };
        self.preferences.save_snapshot(&next).await?;
        state.snapshot = next;

        debug!(
            previous_ml = change.previous_ml,
            current_ml = change.current_ml,
            "Water intake updated"
        );
        Ok(())
    }
}

/// Reject sensor buckets carrying values no real sensor reports
fn validate_buckets(buckets: &[RawBucketSample]) -> EngineResult<()> {
    for bucket in buckets {
        validate_calories(bucket.calories_expended)
            .and_then(|_| validate_distance_meters(bucket.distance_meters))
            .map_err(|msg| EngineError::Fetch(format!("Invalid sample: {}", msg)))?;
    }
    Ok(())
}
