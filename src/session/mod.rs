//! Capture session management
//!
//! This module owns the speech-capture session core:
//! - `SessionState`: the pure Idle/Recording/Stopped transition machine
//!   with transcript accumulation and elapsed-time tracking
//! - `SpeechMetrics`: word count, words per minute, and pace label
//! - `RecordingSession`: async wiring of the state machine to a capture
//!   backend, the 1 Hz ticker, and the analysis hand-off

mod config;
mod metrics;
mod runner;
mod state;

pub use config::SessionConfig;
pub use metrics::{PaceLabel, SpeechMetrics};
pub use runner::{AnalysisOutcome, RecordingSession};
pub use state::{SessionSnapshot, SessionState, SessionStatus};
