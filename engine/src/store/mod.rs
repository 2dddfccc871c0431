//! Local key-value persistence
//!
//! A [`MetricStore`] is the single shared key-value space holding today's
//! totals, goals and the theme. Multi-key writes go through
//! [`MetricStore::set_all`], which must apply every entry or none.

pub mod file;
pub mod memory;
pub mod preferences;

pub use file::FileMetricStore;
pub use memory::MemoryMetricStore;
pub use preferences::PreferencesRepository;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::info;

use crate::config::{StoreBackend, StoreConfig};

/// Keys understood by the metric store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKey {
    Steps,
    Calories,
    Distance,
    Water,
    StepGoal,
    WaterGoal,
    ThemeMode,
}

impl MetricKey {
    pub const ALL: [MetricKey; 7] = [
        MetricKey::Steps,
        MetricKey::Calories,
        MetricKey::Distance,
        MetricKey::Water,
        MetricKey::StepGoal,
        MetricKey::WaterGoal,
        MetricKey::ThemeMode,
    ];

    /// Name the value is stored under
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKey::Steps => "steps",
            MetricKey::Calories => "calories",
            MetricKey::Distance => "distance",
            MetricKey::Water => "water",
            MetricKey::StepGoal => "step_goal",
            MetricKey::WaterGoal => "water_goal",
            MetricKey::ThemeMode => "theme_mode",
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stored value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrefValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl PrefValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            PrefValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Floats accept integer values too, since JSON does not keep `1.0` apart from `1`
    pub fn as_float(&self) -> Option<f64> {
        match self {
            PrefValue::Float(v) => Some(*v),
            PrefValue::Int(v) => Some(*v as f64),
            PrefValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PrefValue::Text(v) => Some(v),
            _ => None,
        }
    }
}

/// Key-value persistence boundary
#[async_trait]
pub trait MetricStore: Send + Sync {
    /// Read one value, `None` if never written
    async fn get(&self, key: MetricKey) -> Result<Option<PrefValue>>;

    /// Write several values as one unit
    async fn set_all(&self, entries: Vec<(MetricKey, PrefValue)>) -> Result<()>;

    /// Write a single value
    async fn set(&self, key: MetricKey, value: PrefValue) -> Result<()> {
        self.set_all(vec![(key, value)]).await
    }
}

/// Open the store selected by configuration
pub async fn open(config: &StoreConfig) -> Result<Arc<dyn MetricStore>> {
    match config.backend {
        StoreBackend::Memory => {
            info!("Using in-memory metric store");
            Ok(Arc::new(MemoryMetricStore::new()))
        }
        StoreBackend::File => {
            info!(path = %config.path.display(), "Using file metric store");
            Ok(Arc::new(FileMetricStore::open(&config.path).await?))
        }
    }
}
