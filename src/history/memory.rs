use std::sync::Arc;

use anyhow::Result;
use tokio::sync::Mutex;

use super::{HistoryRecord, HistoryStore};

/// In-memory history store, used when no endpoint is configured and by
/// tests that assert on what was recorded
#[derive(Clone, Default)]
pub struct MemoryHistoryStore {
    records: Arc<Mutex<Vec<HistoryRecord>>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn records(&self) -> Vec<HistoryRecord> {
        self.records.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn record(&self, record: HistoryRecord) -> Result<()> {
        self.records.lock().await.push(record);
        Ok(())
    }
}
