//! JSON file backed metric store

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::debug;

use super::{MetricKey, MetricStore, PrefValue};

/// Metric store persisted as a single JSON document
///
/// Every write replaces the whole document through a temp file and a rename,
/// so readers never observe half of a multi-key write.
#[derive(Debug)]
pub struct FileMetricStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, PrefValue>>,
}

impl FileMetricStore {
    /// Open the store at `path`, starting empty if the file does not exist yet
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let values = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .with_context(|| format!("Failed to parse metric store {}", path.display()))?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to read metric store {}", path.display()))
            }
        };

        debug!(path = %path.display(), keys = values.len(), "Opened metric store");

        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    async fn write_document(&self, values: &BTreeMap<String, PrefValue>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let body = serde_json::to_vec_pretty(values)?;
        let tmp_path = self.path.with_extension("json.tmp");

        tokio::fs::write(&tmp_path, body)
            .await
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        Ok(())
    }
}

#[async_trait]
impl MetricStore for FileMetricStore {
    async fn get(&self, key: MetricKey) -> Result<Option<PrefValue>> {
        Ok(self.values.lock().await.get(key.as_str()).cloned())
    }

    async fn set_all(&self, entries: Vec<(MetricKey, PrefValue)>) -> Result<()> {
        let mut values = self.values.lock().await;

        let mut next = values.clone();
        for (key, value) in entries {
            next.insert(key.as_str().to_string(), value);
        }

        // Memory only changes once the document is safely on disk
        self.write_document(&next).await?;
        *values = next;

        debug!(path = %self.path.display(), "Metric store written");
        Ok(())
    }
}
