//! Common test utilities for integration tests
//!
//! Builds an [`AppState`] over a fixture sample source and a metric store,
//! either in memory or in a temporary JSON file.

#![allow(dead_code)]

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use fitness_tracker_engine::config::{AppConfig, StoreBackend};
use fitness_tracker_engine::sources::FixtureSampleSource;
use fitness_tracker_engine::store::{self, MetricStore};
use fitness_tracker_engine::AppState;
use fitness_tracker_shared::RawBucketSample;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Test application wrapper
pub struct TestApp {
    pub state: AppState,
    pub source: Arc<FixtureSampleSource>,
    pub store: Arc<dyn MetricStore>,
    /// Keeps the file store's directory alive for the test's duration
    pub dir: TempDir,
}

impl TestApp {
    /// Create an application backed by an in-memory store
    pub async fn new(samples: Vec<RawBucketSample>) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let mut config = test_config(&dir);
        config.store.backend = StoreBackend::Memory;
        Self::build(config, dir, samples).await
    }

    /// Create an application backed by a JSON file store
    pub async fn with_file_store(samples: Vec<RawBucketSample>) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = test_config(&dir);
        Self::build(config, dir, samples).await
    }

    /// Rebuild the application over the same file, as after a process restart
    pub async fn restart(self) -> Self {
        let config = (*self.state.config).clone();
        let samples = Vec::new();
        Self::build(config, self.dir, samples).await
    }

    pub fn store_path(&self) -> PathBuf {
        self.state.config.store.path.clone()
    }

    async fn build(config: AppConfig, dir: TempDir, samples: Vec<RawBucketSample>) -> Self {
        let store = store::open(&config.store)
            .await
            .expect("Failed to open metric store");
        let source = Arc::new(FixtureSampleSource::with_samples(samples));
        let state = AppState::new(config, store.clone(), source.clone())
            .await
            .expect("Failed to build app state");

        Self {
            state,
            source,
            store,
            dir,
        }
    }
}

/// Get test configuration pointing the file store into `dir`
pub fn test_config(dir: &TempDir) -> AppConfig {
    let mut config = AppConfig::default();
    config.store.path = dir.path().join("fitness_prefs.json");
    config.user.name = "test-user".to_string();
    config
}

/// UTC+2, a local offset with distinct local and UTC dates around midnight
pub fn offset() -> FixedOffset {
    FixedOffset::east_opt(2 * 3600).unwrap()
}

/// Local time on a day of October 2024 (7 Oct is a Monday)
pub fn at(day: u32, hour: u32) -> DateTime<FixedOffset> {
    offset().with_ymd_and_hms(2024, 10, day, hour, 0, 0).unwrap()
}

pub fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 10, day).unwrap()
}

/// Hourly sample with calories and distance in proportion to steps
pub fn walk(day: u32, hour: u32, steps: u32) -> RawBucketSample {
    RawBucketSample {
        bucket_start: at(day, hour),
        step_count: steps,
        calories_expended: f64::from(steps) * 0.04,
        distance_meters: f64::from(steps) * 0.75,
    }
}
