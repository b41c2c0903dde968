//! In-memory record store.

use async_trait::async_trait;
use theft_map_incident_models::IncidentRecord;
use tokio::sync::RwLock;

use crate::{RecordSource, RecordStore, StoreError};

/// Record store held entirely in memory. Contents are lost on drop.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Vec<IncidentRecord>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `records`.
    #[must_use]
    pub fn with_records(records: Vec<IncidentRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

#[async_trait]
impl RecordSource for MemoryStore {
    async fn list_all(&self) -> Result<Vec<IncidentRecord>, StoreError> {
        Ok(self.records.read().await.clone())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn append(&self, record: IncidentRecord) -> Result<(), StoreError> {
        self.records.write().await.push(record);
        Ok(())
    }
}
