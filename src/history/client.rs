use anyhow::{Context, Result};
use reqwest::Client;
use tracing::info;

use super::{HistoryRecord, HistoryStore};

/// History store backed by the backend-as-a-service entity endpoint
pub struct RemoteHistoryStore {
    client: Client,
    endpoint: String,
}

impl RemoteHistoryStore {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait::async_trait]
impl HistoryStore for RemoteHistoryStore {
    async fn record(&self, record: HistoryRecord) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&record)
            .send()
            .await
            .context("Failed to reach history endpoint")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("history endpoint returned status {status}");
        }

        info!(
            "Recorded analysis history (emotion={}, score={})",
            record.emotion, record.empathy_score
        );

        Ok(())
    }
}
