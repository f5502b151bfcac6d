//! Analysis history persistence
//!
//! Create-only: the session records one entry per completed analysis
//! and never reads history back. Reading and displaying history belongs
//! to the surrounding application.

mod client;
mod memory;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::analysis::EmpathyJudgment;

pub use client::RemoteHistoryStore;
pub use memory::MemoryHistoryStore;

/// One persisted analysis result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub original_text: String,
    /// Emotion word without its emoji, e.g. "Calm"
    pub emotion: String,
    pub empathy_score: u8,
    /// The judgment's receiver reaction
    pub feedback: String,
    pub was_speech: bool,
}

impl HistoryRecord {
    /// Build the record written after a spoken transcript is analyzed
    pub fn from_judgment(transcript: &str, judgment: &EmpathyJudgment) -> Self {
        Self {
            original_text: transcript.to_string(),
            emotion: judgment.emotion().to_string(),
            empathy_score: judgment.empathy_score,
            feedback: judgment.receiver_reaction.clone(),
            was_speech: true,
        }
    }
}

#[async_trait::async_trait]
pub trait HistoryStore: Send + Sync {
    /// Append one record. Called exactly once per completed analysis.
    async fn record(&self, record: HistoryRecord) -> Result<()>;
}
