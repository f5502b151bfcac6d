use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::config::SessionConfig;
use super::state::{SessionSnapshot, SessionState, SessionStatus};
use crate::analysis::{AnalysisRequest, EmpathyAnalyzer, EmpathyJudgment};
use crate::capture::{CaptureEvent, SpeechCapture};
use crate::history::{HistoryRecord, HistoryStore};

/// Result of the fire-and-forget analysis hand-off, tagged by session
/// id so it stays deliverable after the session is superseded
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutcome {
    pub session_id: String,
    pub judgment: Option<EmpathyJudgment>,
    pub error: Option<String>,
}

impl AnalysisOutcome {
    fn ready(session_id: String, judgment: EmpathyJudgment) -> Self {
        Self {
            session_id,
            judgment: Some(judgment),
            error: None,
        }
    }

    fn failed(session_id: String, error: String) -> Self {
        Self {
            session_id,
            judgment: None,
            error: Some(error),
        }
    }
}

/// A recording session that wires the speech-capture state machine to a
/// capture backend, a periodic elapsed-time ticker, and the analysis
/// hand-off.
///
/// The state machine itself is [`SessionState`]; this type owns the
/// resource lifetimes around it. The ticker task is cancelled on every
/// path that leaves the Recording state: explicit stop, capture error,
/// and drop.
pub struct RecordingSession {
    config: SessionConfig,
    state: Arc<Mutex<SessionState>>,
    capture: Arc<Mutex<Box<dyn SpeechCapture>>>,
    analyzer: Arc<dyn EmpathyAnalyzer>,
    history: Arc<dyn HistoryStore>,
    outcome_tx: mpsc::UnboundedSender<AnalysisOutcome>,
    ticker_handle: Arc<std::sync::Mutex<Option<JoinHandle<()>>>>,
    pump_handle: std::sync::Mutex<Option<JoinHandle<()>>>,
}

impl RecordingSession {
    pub fn new(
        config: SessionConfig,
        capture: Box<dyn SpeechCapture>,
        analyzer: Arc<dyn EmpathyAnalyzer>,
        history: Arc<dyn HistoryStore>,
        outcome_tx: mpsc::UnboundedSender<AnalysisOutcome>,
    ) -> Self {
        let state = SessionState::new(config.session_id.clone());
        Self {
            config,
            state: Arc::new(Mutex::new(state)),
            capture: Arc::new(Mutex::new(capture)),
            analyzer,
            history,
            outcome_tx,
            ticker_handle: Arc::new(std::sync::Mutex::new(None)),
            pump_handle: std::sync::Mutex::new(None),
        }
    }

    /// Start recording
    ///
    /// Resets the transcript and any previous error, then asks the
    /// capture backend to begin. A second start while already recording
    /// is a no-op. A backend start failure leaves the session Idle with
    /// `error_message` set rather than returning an error; the user may
    /// retry.
    pub async fn start(&self) -> Result<()> {
        {
            let mut state = self.state.lock().await;
            if !state.begin(Utc::now()) {
                warn!("Session {} is already recording", state.session_id());
                return Ok(());
            }
        }

        let rx = {
            let mut capture = self.capture.lock().await;
            match capture.begin(self.config.capture_options()).await {
                Ok(rx) => rx,
                Err(e) => {
                    warn!("Failed to start speech capture: {e:#}");
                    let mut state = self.state.lock().await;
                    state.fail_to_begin(format!("Could not start recording: {e}"));
                    return Ok(());
                }
            }
        };

        self.spawn_pump(rx);
        self.spawn_ticker();

        info!("Recording started for session {}", self.config.session_id);
        Ok(())
    }

    /// Stop recording
    ///
    /// Freezes elapsed time, halts the capture backend, cancels the
    /// ticker, and (when the transcript is non-empty) hands the session
    /// off for analysis exactly once. Calling stop when not recording
    /// is a no-op that returns the current snapshot.
    pub async fn stop(&self) -> Result<SessionSnapshot> {
        let should_analyze = {
            let mut state = self.state.lock().await;
            if state.status() != SessionStatus::Recording {
                return Ok(state.snapshot());
            }
            state.finish(Utc::now())
        };

        abort_ticker(&self.ticker_handle);

        {
            let mut capture = self.capture.lock().await;
            if let Err(e) = capture.halt().await {
                warn!("Failed to halt speech capture: {e:#}");
            }
        }

        if should_analyze {
            self.spawn_analysis().await;
        } else {
            info!(
                "Session {} stopped with an empty transcript; skipping analysis",
                self.config.session_id
            );
        }

        info!("Recording stopped for session {}", self.config.session_id);
        Ok(self.state.lock().await.snapshot())
    }

    /// Re-submit a stopped session's transcript for analysis, e.g.
    /// after an analysis failure
    pub async fn analyze(&self) -> Result<()> {
        {
            let state = self.state.lock().await;
            if state.status() != SessionStatus::Stopped {
                anyhow::bail!("session is not stopped");
            }
            if state.transcript().is_empty() {
                anyhow::bail!("nothing to analyze: transcript is empty");
            }
        }
        self.spawn_analysis().await;
        Ok(())
    }

    /// Get a point-in-time view of the session
    pub async fn snapshot(&self) -> SessionSnapshot {
        self.state.lock().await.snapshot()
    }

    /// Pump capture events into the state machine.
    ///
    /// A spontaneous `Ended` while still recording means the platform
    /// capped the capture call; the stream is restarted immediately so
    /// no speech is silently lost. After an explicit stop the status
    /// has already left Recording, so no restart happens.
    fn spawn_pump(&self, mut rx: mpsc::Receiver<CaptureEvent>) {
        let state = Arc::clone(&self.state);
        let capture = Arc::clone(&self.capture);
        let ticker = Arc::clone(&self.ticker_handle);
        let options = self.config.capture_options();

        let handle = tokio::spawn(async move {
            loop {
                let Some(event) = rx.recv().await else {
                    warn!("Capture stream closed without an end event");
                    break;
                };

                match event {
                    CaptureEvent::Fragment { text, is_final } => {
                        let mut state = state.lock().await;
                        state.apply_fragment(&text, is_final);
                    }
                    CaptureEvent::Ended => {
                        let recording = {
                            let state = state.lock().await;
                            state.status() == SessionStatus::Recording
                        };
                        if !recording {
                            break;
                        }

                        let mut capture = capture.lock().await;
                        match capture.begin(options.clone()).await {
                            Ok(new_rx) => {
                                info!("Capture stream ended early; restarted");
                                rx = new_rx;
                            }
                            Err(e) => {
                                error!("Failed to restart speech capture: {e:#}");
                                let mut state = state.lock().await;
                                state.fail(
                                    Utc::now(),
                                    format!("Recording stopped unexpectedly: {e}"),
                                );
                                abort_ticker(&ticker);
                                break;
                            }
                        }
                    }
                    CaptureEvent::Error(err) => {
                        error!("Speech capture error: {err}");
                        let mut state = state.lock().await;
                        state.fail(Utc::now(), format!("Speech recognition error: {err}"));
                        abort_ticker(&ticker);
                        break;
                    }
                }
            }
        });

        let mut pump = self.pump_handle.lock().unwrap();
        if let Some(old) = pump.replace(handle) {
            old.abort();
        }
    }

    /// Recompute elapsed time once per tick interval while recording
    fn spawn_ticker(&self) {
        let state = Arc::clone(&self.state);
        let period = self.config.tick_interval;

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                let mut state = state.lock().await;
                if state.status() != SessionStatus::Recording {
                    break;
                }
                state.tick(Utc::now());
            }
        });

        let mut ticker = self.ticker_handle.lock().unwrap();
        if let Some(old) = ticker.replace(handle) {
            old.abort();
        }
    }

    /// Fire-and-forget analysis hand-off. The session does not wait for
    /// the result; the outcome is delivered on the outcome channel
    /// tagged with this session's id, and one history record is written
    /// per successful analysis.
    async fn spawn_analysis(&self) {
        let (request, session_id) = {
            let state = self.state.lock().await;
            let metrics = state.metrics();
            let request = AnalysisRequest {
                transcript: state.transcript(),
                word_count: metrics.word_count,
                words_per_minute: metrics.words_per_minute,
                pace_label: metrics.pace.as_str().to_string(),
                user_context: self.config.user.clone(),
            };
            (request, state.session_id().to_string())
        };

        let analyzer = Arc::clone(&self.analyzer);
        let history = Arc::clone(&self.history);
        let outcome_tx = self.outcome_tx.clone();

        tokio::spawn(async move {
            info!(
                "Analyzing session {session_id} ({} words, {} wpm)",
                request.word_count, request.words_per_minute
            );

            match analyzer.analyze(request.clone()).await {
                Ok(judgment) => {
                    let record = HistoryRecord::from_judgment(&request.transcript, &judgment);
                    if let Err(e) = history.record(record).await {
                        warn!("Failed to persist analysis history: {e:#}");
                    }
                    let _ = outcome_tx.send(AnalysisOutcome::ready(session_id, judgment));
                }
                Err(e) => {
                    warn!("Analysis failed for session {session_id}: {e}");
                    let _ = outcome_tx.send(AnalysisOutcome::failed(session_id, e.to_string()));
                }
            }
        });
    }
}

impl Drop for RecordingSession {
    fn drop(&mut self) {
        abort_ticker(&self.ticker_handle);
        if let Ok(mut pump) = self.pump_handle.lock() {
            if let Some(handle) = pump.take() {
                handle.abort();
            }
        }
    }
}

fn abort_ticker(ticker: &std::sync::Mutex<Option<JoinHandle<()>>>) {
    if let Ok(mut ticker) = ticker.lock() {
        if let Some(handle) = ticker.take() {
            handle.abort();
        }
    }
}
