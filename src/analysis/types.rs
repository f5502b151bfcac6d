use serde::{Deserialize, Serialize};

/// Who is speaking, forwarded so the service can personalize its judgment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserContext {
    pub display_name: String,
    pub role: String,
}

impl Default for UserContext {
    fn default() -> Self {
        Self {
            display_name: "there".to_string(),
            role: "user".to_string(),
        }
    }
}

/// Payload sent to the analysis service after a recording stops
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub transcript: String,
    pub word_count: usize,
    pub words_per_minute: u32,
    /// Qualitative delivery bucket, e.g. "Normal pace"
    pub pace_label: String,
    pub user_context: UserContext,
}

/// Structured judgment returned by the analysis service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmpathyJudgment {
    /// Emoji-prefixed label, e.g. "😊 Calm"
    pub emotion_label: String,
    /// Hex color associated with the emotion, e.g. "#4ade80"
    pub emotion_color: String,
    pub vibe_summary: String,
    /// How a listener might perceive the message
    pub receiver_reaction: String,
    /// 0..=100
    pub empathy_score: u8,
    pub empathy_suggestions: Vec<String>,
    /// 0.0..=1.0
    pub confidence_score: f32,
    pub detected_language: String,
    #[serde(default)]
    pub reflection_question: Option<String>,
}

impl EmpathyJudgment {
    /// The emotion word without its leading emoji, e.g. "Calm"
    pub fn emotion(&self) -> &str {
        self.emotion_label
            .split_whitespace()
            .nth(1)
            .unwrap_or("neutral")
    }
}
