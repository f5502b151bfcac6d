use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::metrics::SpeechMetrics;

/// Lifecycle status of a capture session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// No recording has started (or the last start attempt failed)
    Idle,
    /// Capture is active and the transcript may still grow
    Recording,
    /// Recording finished; transcript and elapsed time are frozen
    Stopped,
}

/// Point-in-time view of a session, safe to hand to an HTTP response
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub status: SessionStatus,
    pub transcript: String,
    /// Most recent interim (non-final) fragment, display-only
    pub interim: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub elapsed_seconds: u64,
    pub error_message: Option<String>,
    pub metrics: SpeechMetrics,
}

/// The speech-capture state machine.
///
/// Pure state and transitions only: no timers, no capture backend, no
/// I/O. The async wiring lives in [`super::RecordingSession`], which
/// feeds capture events and clock ticks into this type. Every method
/// takes the current time as a parameter where it matters, so the
/// transitions are fully deterministic under test.
#[derive(Debug)]
pub struct SessionState {
    session_id: String,
    status: SessionStatus,
    /// Finalized fragments in arrival order; joined with single spaces
    fragments: Vec<String>,
    interim: Option<String>,
    started_at: Option<DateTime<Utc>>,
    elapsed_seconds: u64,
    error_message: Option<String>,
}

impl SessionState {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            status: SessionStatus::Idle,
            fragments: Vec::new(),
            interim: None,
            started_at: None,
            elapsed_seconds: 0,
            error_message: None,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Begin a new recording, discarding everything from the previous one.
    ///
    /// Returns false (and changes nothing) if a recording is already
    /// active; only one capture stream may exist per session.
    pub fn begin(&mut self, now: DateTime<Utc>) -> bool {
        if self.status == SessionStatus::Recording {
            return false;
        }

        self.fragments.clear();
        self.interim = None;
        self.error_message = None;
        self.started_at = Some(now);
        self.elapsed_seconds = 0;
        self.status = SessionStatus::Recording;
        true
    }

    /// Record that the capture backend could not be started.
    ///
    /// The session returns to Idle so the user can retry; the failure is
    /// observable only through `error_message`.
    pub fn fail_to_begin(&mut self, message: impl Into<String>) {
        self.status = SessionStatus::Idle;
        self.started_at = None;
        self.error_message = Some(message.into());
    }

    /// Apply one recognized fragment from the capture backend.
    ///
    /// Final fragments are appended to the durable transcript; interim
    /// fragments only replace the display-only `interim` field and are
    /// discarded on the next event. Fragments arriving outside the
    /// Recording state are dropped.
    pub fn apply_fragment(&mut self, text: &str, is_final: bool) {
        if self.status != SessionStatus::Recording {
            return;
        }

        if is_final {
            let text = text.trim();
            if !text.is_empty() {
                self.fragments.push(text.to_string());
            }
            self.interim = None;
        } else {
            self.interim = Some(text.to_string());
        }
    }

    /// Recompute elapsed time from the session start. No-op unless
    /// Recording. Elapsed time never decreases.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        if self.status != SessionStatus::Recording {
            return;
        }
        self.elapsed_seconds = self.elapsed_seconds.max(self.elapsed_since_start(now));
    }

    /// Transition Recording -> Stopped, freezing elapsed time at `now`.
    ///
    /// Returns true when the frozen transcript is non-empty, i.e. when
    /// the caller should hand the session off for analysis. Calling
    /// this in any state other than Recording is a no-op that returns
    /// false, which makes stop idempotent and guarantees at most one
    /// analysis hand-off per recording.
    pub fn finish(&mut self, now: DateTime<Utc>) -> bool {
        if self.status != SessionStatus::Recording {
            return false;
        }

        self.elapsed_seconds = self.elapsed_seconds.max(self.elapsed_since_start(now));
        self.interim = None;
        self.status = SessionStatus::Stopped;
        !self.fragments.is_empty()
    }

    /// Handle a mid-recording capture error: move to Stopped (not Idle,
    /// so any transcript captured so far survives and stays eligible
    /// for manual analysis) and surface the message.
    pub fn fail(&mut self, now: DateTime<Utc>, message: impl Into<String>) {
        if self.status == SessionStatus::Recording {
            self.elapsed_seconds = self.elapsed_seconds.max(self.elapsed_since_start(now));
            self.status = SessionStatus::Stopped;
        }
        self.interim = None;
        self.error_message = Some(message.into());
    }

    /// The durable transcript: finalized fragments joined by single spaces.
    pub fn transcript(&self) -> String {
        self.fragments.join(" ")
    }

    pub fn interim(&self) -> Option<&str> {
        self.interim.as_deref()
    }

    /// Speech-rate metrics for the current transcript. Callable in any
    /// state; zero-valued while the transcript is empty.
    pub fn metrics(&self) -> SpeechMetrics {
        SpeechMetrics::compute(&self.transcript(), self.elapsed_seconds)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.session_id.clone(),
            status: self.status,
            transcript: self.transcript(),
            interim: self.interim.clone(),
            started_at: self.started_at,
            elapsed_seconds: self.elapsed_seconds,
            error_message: self.error_message.clone(),
            metrics: self.metrics(),
        }
    }

    fn elapsed_since_start(&self, now: DateTime<Utc>) -> u64 {
        match self.started_at {
            Some(started_at) => now.signed_duration_since(started_at).num_seconds().max(0) as u64,
            None => 0,
        }
    }
}
