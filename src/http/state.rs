use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{mpsc, RwLock};

use crate::analysis::{EmpathyAnalyzer, UserContext};
use crate::capture::FragmentFeeder;
use crate::history::HistoryStore;
use crate::session::{AnalysisOutcome, RecordingSession};

/// Defaults applied to sessions started over HTTP, taken from the
/// service configuration
#[derive(Debug, Clone)]
pub struct SessionDefaults {
    pub locale: String,
    pub continuous: bool,
    pub interim_results: bool,
    pub user: UserContext,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            locale: "en-US".to_string(),
            continuous: true,
            interim_results: true,
            user: UserContext::default(),
        }
    }
}

/// One live session and the feeder that pushes recognizer output into it
#[derive(Clone)]
pub struct SessionEntry {
    pub session: Arc<RecordingSession>,
    pub feeder: FragmentFeeder,
}

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Active and stopped sessions (session_id -> entry)
    pub sessions: Arc<RwLock<HashMap<String, SessionEntry>>>,

    /// Completed analysis outcomes, kept by session id so a result is
    /// still deliverable after its session is superseded
    pub outcomes: Arc<RwLock<HashMap<String, AnalysisOutcome>>>,

    pub analyzer: Arc<dyn EmpathyAnalyzer>,
    pub history: Arc<dyn HistoryStore>,
    pub defaults: SessionDefaults,

    outcome_tx: mpsc::UnboundedSender<AnalysisOutcome>,
}

impl AppState {
    pub fn new(
        analyzer: Arc<dyn EmpathyAnalyzer>,
        history: Arc<dyn HistoryStore>,
        defaults: SessionDefaults,
    ) -> Self {
        let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel::<AnalysisOutcome>();
        let outcomes: Arc<RwLock<HashMap<String, AnalysisOutcome>>> =
            Arc::new(RwLock::new(HashMap::new()));

        // Collect fire-and-forget analysis outcomes into the shared map
        let sink = Arc::clone(&outcomes);
        tokio::spawn(async move {
            while let Some(outcome) = outcome_rx.recv().await {
                let mut sink = sink.write().await;
                sink.insert(outcome.session_id.clone(), outcome);
            }
        });

        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            outcomes,
            analyzer,
            history,
            defaults,
            outcome_tx,
        }
    }

    pub fn outcome_sender(&self) -> mpsc::UnboundedSender<AnalysisOutcome> {
        self.outcome_tx.clone()
    }
}
