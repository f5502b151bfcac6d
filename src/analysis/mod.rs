//! Empathy analysis service contract and clients
//!
//! The session hands a stopped recording's transcript and speech-rate
//! metrics to an [`EmpathyAnalyzer`], which returns a structured
//! judgment. The real analysis (tone classification, empathy scoring)
//! happens in an externally hosted service; this crate only owns the
//! request/response shapes and the call.

mod client;
mod stub;
mod types;

pub use client::RemoteAnalyzer;
pub use stub::{FailingAnalyzer, StubAnalyzer};
pub use types::{AnalysisRequest, EmpathyJudgment, UserContext};

/// Errors from the analysis service call
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("analysis request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("analysis service returned status {0}")]
    Service(u16),

    #[error("{0}")]
    Unavailable(String),
}

#[async_trait::async_trait]
pub trait EmpathyAnalyzer: Send + Sync {
    /// Analyze one stopped recording. The call is asynchronous and is
    /// not retried here; callers surface failures to the user.
    async fn analyze(&self, request: AnalysisRequest) -> Result<EmpathyJudgment, AnalysisError>;

    /// Get analyzer name for logging
    fn name(&self) -> &str;
}
