use anyhow::Result;
use tokio::sync::mpsc;

/// Options passed to the capture backend when a stream begins
#[derive(Debug, Clone)]
pub struct CaptureOptions {
    /// Keep recognizing across pauses instead of ending after one utterance
    pub continuous: bool,
    /// Emit interim (provisional) fragments in addition to final ones
    pub interim_results: bool,
    /// BCP-47 locale tag for recognition (e.g. "en-US")
    pub locale: String,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            continuous: true,
            interim_results: true,
            locale: "en-US".to_string(),
        }
    }
}

/// Error codes a speech recognizer can report mid-stream
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaptureError {
    #[error("microphone permission was denied")]
    NotAllowed,

    #[error("no speech was detected")]
    NoSpeech,

    #[error("audio capture failed")]
    AudioCapture,

    #[error("network error during recognition")]
    Network,

    #[error("speech capture error: {0}")]
    Other(String),
}

impl CaptureError {
    /// Map a recognizer's string error code to a typed error.
    /// Codes follow the Web Speech API naming.
    pub fn from_code(code: &str) -> Self {
        match code {
            "not-allowed" | "service-not-allowed" => CaptureError::NotAllowed,
            "no-speech" => CaptureError::NoSpeech,
            "audio-capture" => CaptureError::AudioCapture,
            "network" => CaptureError::Network,
            other => CaptureError::Other(other.to_string()),
        }
    }
}

/// One event on a capture stream
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureEvent {
    /// A piece of recognized text. Final fragments are committed to the
    /// transcript; interim fragments are provisional and superseded by
    /// the next event.
    Fragment { text: String, is_final: bool },

    /// The stream ended, either after `halt()` or spontaneously
    /// (platforms cap the duration of a single capture call)
    Ended,

    /// The recognizer failed; the stream is over
    Error(CaptureError),
}

/// Speech capture backend trait
///
/// Implementations bridge to whatever actually performs recognition:
/// - `ChannelCapture`: fragments pushed in by an external recognizer
///   (e.g. a browser forwarding Web Speech API results)
/// - `ScriptedCapture`: deterministic event sequences for tests
#[async_trait::async_trait]
pub trait SpeechCapture: Send + Sync {
    /// Start producing capture events
    ///
    /// Returns a channel receiver for the event stream. May be called
    /// again after the previous stream emitted `Ended`.
    async fn begin(&mut self, options: CaptureOptions) -> Result<mpsc::Receiver<CaptureEvent>>;

    /// Request that the current stream stop; it ends with `Ended`
    async fn halt(&mut self) -> Result<()>;

    /// Check if a stream is currently active
    fn is_capturing(&self) -> bool;

    /// Get backend name for logging
    fn name(&self) -> &str;
}
