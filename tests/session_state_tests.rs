// Unit tests for the speech-capture state machine
//
// These tests drive SessionState directly with explicit timestamps, so
// every transition is deterministic.

use chrono::{Duration, Utc};
use empathy_mirror::{PaceLabel, SessionState, SessionStatus};

#[test]
fn test_new_session_is_idle_and_empty() {
    let state = SessionState::new("s1");

    assert_eq!(state.status(), SessionStatus::Idle);
    assert_eq!(state.transcript(), "");
    assert_eq!(state.elapsed_seconds(), 0);
    assert!(state.error_message().is_none());
    assert!(state.interim().is_none());
}

#[test]
fn test_final_fragments_accumulate_in_order() {
    let mut state = SessionState::new("s1");
    state.begin(Utc::now());

    state.apply_fragment("I feel", true);
    state.apply_fragment("unheard", true);
    state.apply_fragment("sometimes today", true);

    assert_eq!(state.transcript(), "I feel unheard sometimes today");
}

#[test]
fn test_interim_fragments_never_reach_the_transcript() {
    let mut state = SessionState::new("s1");
    state.begin(Utc::now());

    state.apply_fragment("I", false);
    state.apply_fragment("I fee", false);
    state.apply_fragment("I feel", true);
    state.apply_fragment("unhea", false);
    state.apply_fragment("unheard", true);

    assert_eq!(state.transcript(), "I feel unheard");
}

#[test]
fn test_only_latest_interim_is_kept() {
    let mut state = SessionState::new("s1");
    state.begin(Utc::now());

    state.apply_fragment("first guess", false);
    state.apply_fragment("second guess", false);
    assert_eq!(state.interim(), Some("second guess"));

    // A final fragment supersedes the interim guess
    state.apply_fragment("second guess confirmed", true);
    assert!(state.interim().is_none());
}

#[test]
fn test_fragments_outside_recording_are_dropped() {
    let mut state = SessionState::new("s1");

    state.apply_fragment("before start", true);
    assert_eq!(state.transcript(), "");

    let start = Utc::now();
    state.begin(start);
    state.apply_fragment("while recording", true);
    state.finish(start + Duration::seconds(2));

    state.apply_fragment("after stop", true);
    assert_eq!(state.transcript(), "while recording");
}

#[test]
fn test_begin_resets_everything_even_after_error() {
    let start = Utc::now();
    let mut state = SessionState::new("s1");
    state.begin(start);
    state.apply_fragment("old words", true);
    state.fail(start + Duration::seconds(1), "Speech recognition error: network");

    assert_eq!(state.status(), SessionStatus::Stopped);
    assert!(state.error_message().is_some());

    let restart = start + Duration::seconds(5);
    assert!(state.begin(restart));

    assert_eq!(state.status(), SessionStatus::Recording);
    assert_eq!(state.transcript(), "");
    assert_eq!(state.elapsed_seconds(), 0);
    assert!(state.error_message().is_none());
}

#[test]
fn test_begin_while_recording_is_rejected() {
    let start = Utc::now();
    let mut state = SessionState::new("s1");
    state.begin(start);
    state.apply_fragment("keep me", true);

    assert!(!state.begin(start + Duration::seconds(1)));
    assert_eq!(state.transcript(), "keep me");
    assert_eq!(state.status(), SessionStatus::Recording);
}

#[test]
fn test_tick_tracks_elapsed_and_never_decreases() {
    let start = Utc::now();
    let mut state = SessionState::new("s1");
    state.begin(start);

    state.tick(start + Duration::seconds(3));
    assert_eq!(state.elapsed_seconds(), 3);

    // Clock skew backwards must not reduce elapsed time
    state.tick(start + Duration::seconds(2));
    assert_eq!(state.elapsed_seconds(), 3);

    state.tick(start + Duration::seconds(7));
    assert_eq!(state.elapsed_seconds(), 7);
}

#[test]
fn test_tick_after_stop_has_no_effect() {
    let start = Utc::now();
    let mut state = SessionState::new("s1");
    state.begin(start);
    state.apply_fragment("hello", true);
    state.finish(start + Duration::seconds(4));

    assert_eq!(state.elapsed_seconds(), 4);

    state.tick(start + Duration::seconds(60));
    assert_eq!(state.elapsed_seconds(), 4, "elapsed must stay frozen after stop");
}

#[test]
fn test_finish_freezes_elapsed_and_reports_handoff() {
    let start = Utc::now();
    let mut state = SessionState::new("s1");
    state.begin(start);
    state.apply_fragment("some words", true);

    let should_analyze = state.finish(start + Duration::seconds(3));

    assert!(should_analyze);
    assert_eq!(state.status(), SessionStatus::Stopped);
    assert_eq!(state.elapsed_seconds(), 3);
}

#[test]
fn test_finish_is_idempotent() {
    let start = Utc::now();
    let mut state = SessionState::new("s1");
    state.begin(start);
    state.apply_fragment("hello there", true);

    assert!(state.finish(start + Duration::seconds(2)));
    let first = state.snapshot();

    // Second stop: no-op, and no second analysis hand-off
    assert!(!state.finish(start + Duration::seconds(9)));
    let second = state.snapshot();

    assert_eq!(first.status, second.status);
    assert_eq!(first.transcript, second.transcript);
    assert_eq!(first.elapsed_seconds, second.elapsed_seconds);
}

#[test]
fn test_finish_with_empty_transcript_skips_handoff() {
    let start = Utc::now();
    let mut state = SessionState::new("s1");
    state.begin(start);
    state.apply_fragment("just a guess", false);
    state.apply_fragment("   ", true);

    assert!(!state.finish(start + Duration::seconds(2)));
    assert_eq!(state.transcript(), "");
}

#[test]
fn test_mid_recording_failure_preserves_transcript() {
    let start = Utc::now();
    let mut state = SessionState::new("s1");
    state.begin(start);
    state.apply_fragment("words so far", true);

    state.fail(start + Duration::seconds(2), "Speech recognition error: audio capture failed");

    assert_eq!(state.status(), SessionStatus::Stopped);
    assert_eq!(state.transcript(), "words so far");
    assert_eq!(
        state.error_message(),
        Some("Speech recognition error: audio capture failed")
    );
}

#[test]
fn test_failed_start_returns_to_idle_with_message() {
    let mut state = SessionState::new("s1");
    state.begin(Utc::now());
    // Driver observed a backend start failure right away
    state.fail_to_begin("Could not start recording: permission denied");

    assert_eq!(state.status(), SessionStatus::Idle);
    assert_eq!(
        state.error_message(),
        Some("Could not start recording: permission denied")
    );
}

#[test]
fn test_metrics_from_spoken_transcript() {
    let start = Utc::now();
    let mut state = SessionState::new("s1");
    state.begin(start);
    state.apply_fragment("I feel unheard", true);
    state.apply_fragment("sometimes today", true);
    state.apply_fragment("honestly", true);
    state.finish(start + Duration::seconds(3));

    let metrics = state.metrics();
    assert_eq!(metrics.word_count, 6);
    assert_eq!(metrics.words_per_minute, 120);
    assert_eq!(metrics.pace, PaceLabel::Normal);
}

#[test]
fn test_snapshot_reflects_state() {
    let start = Utc::now();
    let mut state = SessionState::new("snapshot-session");
    state.begin(start);
    state.apply_fragment("hello world", true);
    state.apply_fragment("partial gu", false);
    state.tick(start + Duration::seconds(2));

    let snapshot = state.snapshot();
    assert_eq!(snapshot.session_id, "snapshot-session");
    assert_eq!(snapshot.status, SessionStatus::Recording);
    assert_eq!(snapshot.transcript, "hello world");
    assert_eq!(snapshot.interim.as_deref(), Some("partial gu"));
    assert_eq!(snapshot.elapsed_seconds, 2);
    assert_eq!(snapshot.metrics.word_count, 2);
}
