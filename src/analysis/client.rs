use std::time::Duration;

use reqwest::Client;

use super::{AnalysisError, AnalysisRequest, EmpathyAnalyzer, EmpathyJudgment};

/// Analysis client backed by an HTTP endpoint.
///
/// Posts the structured request as JSON and expects an
/// [`EmpathyJudgment`] back. No retries: a failed call is surfaced to
/// the user and the transcript stays available for a manual retry.
pub struct RemoteAnalyzer {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl RemoteAnalyzer {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, AnalysisError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key,
        })
    }
}

#[async_trait::async_trait]
impl EmpathyAnalyzer for RemoteAnalyzer {
    async fn analyze(&self, request: AnalysisRequest) -> Result<EmpathyJudgment, AnalysisError> {
        let mut http_request = self.client.post(&self.endpoint).json(&request);
        if let Some(key) = &self.api_key {
            http_request = http_request.bearer_auth(key);
        }

        let response = http_request.send().await?;
        if !response.status().is_success() {
            return Err(AnalysisError::Service(response.status().as_u16()));
        }

        Ok(response.json::<EmpathyJudgment>().await?)
    }

    fn name(&self) -> &str {
        "remote"
    }
}
