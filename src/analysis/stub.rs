use super::{AnalysisError, AnalysisRequest, EmpathyAnalyzer, EmpathyJudgment};

/// Analyzer that returns a fixed judgment, for tests and local runs
/// without a configured service
pub struct StubAnalyzer {
    judgment: EmpathyJudgment,
}

impl StubAnalyzer {
    pub fn new(judgment: EmpathyJudgment) -> Self {
        Self { judgment }
    }

    /// A plausible calm judgment
    pub fn calm() -> Self {
        Self::new(EmpathyJudgment {
            emotion_label: "😊 Calm".to_string(),
            emotion_color: "#4ade80".to_string(),
            vibe_summary: "Calm and measured".to_string(),
            receiver_reaction: "The listener would likely feel at ease".to_string(),
            empathy_score: 75,
            empathy_suggestions: vec![
                "💬 Acknowledge the other person's view first".to_string(),
                "💡 Ask one open question".to_string(),
                "🌿 Keep the measured pace".to_string(),
            ],
            confidence_score: 0.9,
            detected_language: "English".to_string(),
            reflection_question: None,
        })
    }
}

#[async_trait::async_trait]
impl EmpathyAnalyzer for StubAnalyzer {
    async fn analyze(&self, _request: AnalysisRequest) -> Result<EmpathyJudgment, AnalysisError> {
        Ok(self.judgment.clone())
    }

    fn name(&self) -> &str {
        "stub"
    }
}

/// Analyzer that always fails, for exercising the failure path
pub struct FailingAnalyzer;

#[async_trait::async_trait]
impl EmpathyAnalyzer for FailingAnalyzer {
    async fn analyze(&self, _request: AnalysisRequest) -> Result<EmpathyJudgment, AnalysisError> {
        Err(AnalysisError::Unavailable(
            "analysis service is unavailable".to_string(),
        ))
    }

    fn name(&self) -> &str {
        "failing"
    }
}
