//! In-memory metric store

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{MetricKey, MetricStore, PrefValue};

/// Metric store kept in process memory, for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryMetricStore {
    values: RwLock<HashMap<MetricKey, PrefValue>>,
}

impl MemoryMetricStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MetricStore for MemoryMetricStore {
    async fn get(&self, key: MetricKey) -> Result<Option<PrefValue>> {
        Ok(self.values.read().await.get(&key).cloned())
    }

    async fn set_all(&self, entries: Vec<(MetricKey, PrefValue)>) -> Result<()> {
        let mut values = self.values.write().await;
        values.extend(entries);
        Ok(())
    }
}
