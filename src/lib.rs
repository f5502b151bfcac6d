pub mod analysis;
pub mod capture;
pub mod config;
pub mod history;
pub mod http;
pub mod session;

pub use analysis::{
    AnalysisError, AnalysisRequest, EmpathyAnalyzer, EmpathyJudgment, FailingAnalyzer,
    RemoteAnalyzer, StubAnalyzer, UserContext,
};
pub use capture::{
    CaptureError, CaptureEvent, CaptureOptions, ChannelCapture, FragmentFeeder, ScriptedCapture,
    SpeechCapture,
};
pub use config::Config;
pub use history::{HistoryRecord, HistoryStore, MemoryHistoryStore, RemoteHistoryStore};
pub use http::{create_router, AppState, SessionDefaults};
pub use session::{
    AnalysisOutcome, PaceLabel, RecordingSession, SessionConfig, SessionSnapshot, SessionState,
    SessionStatus, SpeechMetrics,
};
