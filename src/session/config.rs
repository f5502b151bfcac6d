use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::analysis::UserContext;
use crate::capture::CaptureOptions;

/// Configuration for one capture session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Unique session identifier (e.g. "session-<uuid>")
    pub session_id: String,

    /// BCP-47 recognition locale
    pub locale: String,

    /// Keep recognizing across pauses
    pub continuous: bool,

    /// Ask the recognizer for interim fragments
    pub interim_results: bool,

    /// How often elapsed time is recomputed while recording
    /// Default: 1 second
    pub tick_interval: Duration,

    /// Speaker context forwarded with the analysis request
    pub user: UserContext,
}

impl SessionConfig {
    pub fn capture_options(&self) -> CaptureOptions {
        CaptureOptions {
            continuous: self.continuous,
            interim_results: self.interim_results,
            locale: self.locale.clone(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_id: format!("session-{}", uuid::Uuid::new_v4()),
            locale: "en-US".to_string(),
            continuous: true,
            interim_results: true,
            tick_interval: Duration::from_secs(1),
            user: UserContext::default(),
        }
    }
}
