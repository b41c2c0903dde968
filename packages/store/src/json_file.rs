//! Flat-file record store.
//!
//! All records live in one pretty-printed JSON array
//! (`<data dir>/denuncias.json`). Appends rewrite the whole file through a
//! temporary sibling and a rename, serialized by a process-local mutex.
//! Readers are not locked: a listing may observe the file before or after
//! any concurrent append, never half of one.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use theft_map_incident_models::IncidentRecord;
use tokio::sync::Mutex;

use crate::paths::{ensure_dir, records_path};
use crate::{RecordSource, RecordStore, StoreError};

/// Record store backed by a single JSON file.
pub struct JsonFileStore {
    data_dir: PathBuf,
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Creates a store rooted at `data_dir`. Nothing is touched on disk
    /// until the first read or write.
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let path = records_path(&data_dir);
        Self {
            data_dir,
            path,
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing JSON file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_records(&self) -> Result<Vec<IncidentRecord>, StoreError> {
        if !tokio::fs::try_exists(&self.path).await? {
            return Ok(Vec::new());
        }

        let content = tokio::fs::read_to_string(&self.path).await?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_str(&content)?)
    }

    async fn write_records(&self, records: &[IncidentRecord]) -> Result<(), StoreError> {
        ensure_dir(&self.data_dir).await?;

        let json = serde_json::to_string_pretty(records)?;
        let tmp = self.tmp_path();

        let result = match tokio::fs::write(&tmp, json).await {
            Ok(()) => tokio::fs::rename(&tmp, &self.path).await,
            Err(e) => Err(e),
        };

        if let Err(e) = result {
            log::warn!("Failed to replace {}: {e}", self.path.display());
            if let Err(cleanup) = tokio::fs::remove_file(&tmp).await
                && cleanup.kind() != std::io::ErrorKind::NotFound
            {
                log::warn!("Failed to remove {}: {cleanup}", tmp.display());
            }
            return Err(e.into());
        }

        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

#[async_trait]
impl RecordSource for JsonFileStore {
    async fn list_all(&self) -> Result<Vec<IncidentRecord>, StoreError> {
        let records = self.read_records().await?;
        log::debug!("Loaded {} records from {}", records.len(), self.path.display());
        Ok(records)
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn append(&self, record: IncidentRecord) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.read_records().await?;
        log::info!("Appending record {} to {}", record.id, self.path.display());
        records.push(record);
        self.write_records(&records).await
    }
}
