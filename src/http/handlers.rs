use super::state::{AppState, SessionEntry};
use crate::analysis::UserContext;
use crate::capture::{CaptureError, ChannelCapture};
use crate::session::{RecordingSession, SessionConfig, SessionSnapshot, SessionStatus};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    /// Optional session ID (if not provided, generate UUID)
    pub session_id: Option<String>,

    /// Recognition locale override (default from config)
    pub locale: Option<String>,

    /// Speaker name forwarded with the analysis request
    pub display_name: Option<String>,

    /// Speaker role forwarded with the analysis request
    pub role: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StartSessionResponse {
    pub session_id: String,
    pub status: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct StopSessionResponse {
    pub session_id: String,
    pub status: String,
    pub message: String,
    pub snapshot: SessionSnapshot,
}

/// One recognizer event forwarded by the capture frontend
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CaptureEventRequest {
    Fragment { text: String, is_final: bool },
    End,
    Error { code: String },
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /sessions/start
/// Start a new capture session
pub async fn start_session(
    State(state): State<AppState>,
    Json(req): Json<StartSessionRequest>,
) -> impl IntoResponse {
    let session_id = req
        .session_id
        .unwrap_or_else(|| format!("session-{}", uuid::Uuid::new_v4()));

    info!("Starting capture session: {}", session_id);

    // Reject only if this id is still recording; a stopped session with
    // the same id is superseded and replaced
    {
        let sessions = state.sessions.read().await;
        if let Some(entry) = sessions.get(&session_id) {
            if entry.session.snapshot().await.status == SessionStatus::Recording {
                return (
                    StatusCode::CONFLICT,
                    Json(ErrorResponse {
                        error: format!("Session {} is already recording", session_id),
                    }),
                )
                    .into_response();
            }
        }
    }

    let config = SessionConfig {
        session_id: session_id.clone(),
        locale: req.locale.unwrap_or_else(|| state.defaults.locale.clone()),
        continuous: state.defaults.continuous,
        interim_results: state.defaults.interim_results,
        user: UserContext {
            display_name: req
                .display_name
                .unwrap_or_else(|| state.defaults.user.display_name.clone()),
            role: req.role.unwrap_or_else(|| state.defaults.user.role.clone()),
        },
        ..SessionConfig::default()
    };

    let (capture, feeder) = ChannelCapture::new();
    let session = Arc::new(RecordingSession::new(
        config,
        Box::new(capture),
        Arc::clone(&state.analyzer),
        Arc::clone(&state.history),
        state.outcome_sender(),
    ));

    if let Err(e) = session.start().await {
        error!("Failed to start session: {}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Failed to start session: {}", e),
            }),
        )
            .into_response();
    }

    // Replacing a superseded entry drops its session, which aborts any
    // tasks it still owns
    {
        let mut sessions = state.sessions.write().await;
        sessions.insert(session_id.clone(), SessionEntry { session, feeder });
    }

    info!("Capture session started: {}", session_id);

    (
        StatusCode::OK,
        Json(StartSessionResponse {
            session_id: session_id.clone(),
            status: "recording".to_string(),
            message: format!("Capture session {} started", session_id),
        }),
    )
        .into_response()
}

/// POST /sessions/:session_id/events
/// Push one recognizer event (fragment, end-of-stream, or error) into
/// a session's capture feed
pub async fn push_capture_event(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(event): Json<CaptureEventRequest>,
) -> impl IntoResponse {
    let feeder = {
        let sessions = state.sessions.read().await;
        match sessions.get(&session_id) {
            Some(entry) => entry.feeder.clone(),
            None => {
                return (
                    StatusCode::NOT_FOUND,
                    Json(ErrorResponse {
                        error: format!("Session {} not found", session_id),
                    }),
                )
                    .into_response();
            }
        }
    };

    let result = match event {
        CaptureEventRequest::Fragment { text, is_final } => feeder.fragment(text, is_final),
        CaptureEventRequest::End => feeder.end(),
        CaptureEventRequest::Error { code } => feeder.error(CaptureError::from_code(&code)),
    };

    match result {
        Ok(()) => StatusCode::ACCEPTED.into_response(),
        Err(e) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: format!("Session {} no longer accepts events: {}", session_id, e),
            }),
        )
            .into_response(),
    }
}

/// POST /sessions/:session_id/stop
/// Stop a capture session; triggers the analysis hand-off when the
/// transcript is non-empty
pub async fn stop_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let session = {
        let sessions = state.sessions.read().await;
        sessions.get(&session_id).map(|e| Arc::clone(&e.session))
    };

    match session {
        Some(session) => match session.stop().await {
            Ok(snapshot) => {
                info!("Capture session stopped: {}", session_id);
                (
                    StatusCode::OK,
                    Json(StopSessionResponse {
                        session_id: session_id.clone(),
                        status: "stopped".to_string(),
                        message: "Capture session stopped".to_string(),
                        snapshot,
                    }),
                )
                    .into_response()
            }
            Err(e) => {
                error!("Failed to stop session: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: format!("Failed to stop session: {}", e),
                    }),
                )
                    .into_response()
            }
        },
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Session {} not found", session_id),
            }),
        )
            .into_response(),
    }
}

/// GET /sessions/:session_id/status
/// Get the current snapshot of a session (status, transcript, interim
/// guess, elapsed time, metrics, error surface)
pub async fn get_session_status(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let sessions = state.sessions.read().await;

    match sessions.get(&session_id) {
        Some(entry) => (StatusCode::OK, Json(entry.session.snapshot().await)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Session {} not found", session_id),
            }),
        )
            .into_response(),
    }
}

/// GET /sessions/:session_id/analysis
/// Fetch the analysis outcome for a session, if one has completed.
/// Works for superseded sessions too, since outcomes are kept by id.
pub async fn get_session_analysis(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let outcomes = state.outcomes.read().await;

    match outcomes.get(&session_id) {
        Some(outcome) => (StatusCode::OK, Json(outcome.clone())).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("No analysis available for session {}", session_id),
            }),
        )
            .into_response(),
    }
}

/// POST /sessions/:session_id/analyze
/// Re-submit a stopped session's transcript for analysis
pub async fn analyze_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let session = {
        let sessions = state.sessions.read().await;
        sessions.get(&session_id).map(|e| Arc::clone(&e.session))
    };

    match session {
        Some(session) => match session.analyze().await {
            Ok(()) => (
                StatusCode::ACCEPTED,
                Json(StartSessionResponse {
                    session_id: session_id.clone(),
                    status: "analyzing".to_string(),
                    message: format!("Analysis started for session {}", session_id),
                }),
            )
                .into_response(),
            Err(e) => (
                StatusCode::CONFLICT,
                Json(ErrorResponse {
                    error: format!("{}", e),
                }),
            )
                .into_response(),
        },
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Session {} not found", session_id),
            }),
        )
            .into_response(),
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
