use serde::{Deserialize, Serialize};

/// Qualitative speech-rate bucket derived from words per minute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaceLabel {
    #[serde(rename = "Fast-paced")]
    Fast,
    #[serde(rename = "Normal pace")]
    Normal,
    #[serde(rename = "Slow/deliberate")]
    Slow,
}

impl PaceLabel {
    /// Bucket boundaries: above 160 wpm is fast, below 120 is slow.
    /// Exactly 120 counts as normal.
    pub fn from_words_per_minute(wpm: u32) -> Self {
        if wpm > 160 {
            PaceLabel::Fast
        } else if wpm >= 120 {
            PaceLabel::Normal
        } else {
            PaceLabel::Slow
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaceLabel::Fast => "Fast-paced",
            PaceLabel::Normal => "Normal pace",
            PaceLabel::Slow => "Slow/deliberate",
        }
    }
}

impl std::fmt::Display for PaceLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Speech-rate metrics derived from a transcript and its recording time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechMetrics {
    /// Whitespace-delimited tokens in the transcript
    pub word_count: usize,

    /// Rounded words per minute; 0 when no time has elapsed
    pub words_per_minute: u32,

    /// Pace bucket for `words_per_minute`
    pub pace: PaceLabel,
}

impl SpeechMetrics {
    pub fn compute(transcript: &str, elapsed_seconds: u64) -> Self {
        let word_count = transcript.split_whitespace().count();

        let words_per_minute = if elapsed_seconds > 0 {
            (word_count as f64 / elapsed_seconds as f64 * 60.0).round() as u32
        } else {
            0
        };

        Self {
            word_count,
            words_per_minute,
            pace: PaceLabel::from_words_per_minute(words_per_minute),
        }
    }
}
