// Tests for the channel-fed capture backend

use std::time::Duration;

use empathy_mirror::{CaptureError, CaptureEvent, CaptureOptions, ChannelCapture, SpeechCapture};
use tokio::time::timeout;

async fn next_event(rx: &mut tokio::sync::mpsc::Receiver<CaptureEvent>) -> CaptureEvent {
    timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("event should arrive")
        .expect("stream should be open")
}

#[tokio::test]
async fn test_fed_events_flow_through_the_stream() {
    let (mut capture, feeder) = ChannelCapture::new();
    let mut rx = capture.begin(CaptureOptions::default()).await.unwrap();

    feeder.fragment("hello", false).unwrap();
    feeder.fragment("hello world", true).unwrap();

    assert_eq!(
        next_event(&mut rx).await,
        CaptureEvent::Fragment {
            text: "hello".to_string(),
            is_final: false
        }
    );
    assert_eq!(
        next_event(&mut rx).await,
        CaptureEvent::Fragment {
            text: "hello world".to_string(),
            is_final: true
        }
    );
}

#[tokio::test]
async fn test_halt_ends_the_stream() {
    let (mut capture, _feeder) = ChannelCapture::new();
    let mut rx = capture.begin(CaptureOptions::default()).await.unwrap();

    assert!(capture.is_capturing());
    capture.halt().await.unwrap();

    assert_eq!(next_event(&mut rx).await, CaptureEvent::Ended);
    assert!(rx.recv().await.is_none(), "stream should close after Ended");
}

#[tokio::test]
async fn test_begin_twice_without_end_is_rejected() {
    let (mut capture, _feeder) = ChannelCapture::new();
    let _rx = capture.begin(CaptureOptions::default()).await.unwrap();

    assert!(capture.begin(CaptureOptions::default()).await.is_err());
}

#[tokio::test]
async fn test_stream_can_resume_after_recognizer_end() {
    let (mut capture, feeder) = ChannelCapture::new();

    let mut rx = capture.begin(CaptureOptions::default()).await.unwrap();
    feeder.fragment("first stream", true).unwrap();
    feeder.end().unwrap();

    assert!(matches!(
        next_event(&mut rx).await,
        CaptureEvent::Fragment { .. }
    ));
    assert_eq!(next_event(&mut rx).await, CaptureEvent::Ended);
    assert!(rx.recv().await.is_none());

    // Events fed after the end are delivered on the next stream
    feeder.fragment("second stream", true).unwrap();
    let mut rx = capture.begin(CaptureOptions::default()).await.unwrap();

    assert_eq!(
        next_event(&mut rx).await,
        CaptureEvent::Fragment {
            text: "second stream".to_string(),
            is_final: true
        }
    );
}

#[tokio::test]
async fn test_recognizer_error_ends_the_stream() {
    let (mut capture, feeder) = ChannelCapture::new();
    let mut rx = capture.begin(CaptureOptions::default()).await.unwrap();

    feeder.error(CaptureError::NotAllowed).unwrap();

    assert_eq!(
        next_event(&mut rx).await,
        CaptureEvent::Error(CaptureError::NotAllowed)
    );
    assert!(rx.recv().await.is_none());
}

#[test]
fn test_error_codes_map_to_typed_errors() {
    assert_eq!(
        CaptureError::from_code("not-allowed"),
        CaptureError::NotAllowed
    );
    assert_eq!(CaptureError::from_code("no-speech"), CaptureError::NoSpeech);
    assert_eq!(
        CaptureError::from_code("audio-capture"),
        CaptureError::AudioCapture
    );
    assert_eq!(CaptureError::from_code("network"), CaptureError::Network);
    assert_eq!(
        CaptureError::from_code("aborted"),
        CaptureError::Other("aborted".to_string())
    );
}
