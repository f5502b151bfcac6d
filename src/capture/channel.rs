use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::{mpsc, Mutex};
use tracing::warn;

use super::backend::{CaptureError, CaptureEvent, CaptureOptions, SpeechCapture};

/// Handle for pushing recognizer output into a [`ChannelCapture`].
///
/// Held by whatever receives the actual recognition results (the HTTP
/// layer, in this service). Cloneable so it can outlive the session
/// that consumes the events.
#[derive(Clone)]
pub struct FragmentFeeder {
    tx: mpsc::UnboundedSender<CaptureEvent>,
}

impl FragmentFeeder {
    pub fn fragment(&self, text: impl Into<String>, is_final: bool) -> Result<()> {
        self.send(CaptureEvent::Fragment {
            text: text.into(),
            is_final,
        })
    }

    /// Signal end-of-stream from the recognizer side
    pub fn end(&self) -> Result<()> {
        self.send(CaptureEvent::Ended)
    }

    pub fn error(&self, error: CaptureError) -> Result<()> {
        self.send(CaptureEvent::Error(error))
    }

    fn send(&self, event: CaptureEvent) -> Result<()> {
        self.tx
            .send(event)
            .map_err(|_| anyhow::anyhow!("capture feed is closed"))
    }
}

/// Capture backend fed by an external recognizer through a channel.
///
/// `begin()` attaches a forwarder to the shared inbox and relays events
/// until an `Ended` or `Error` event passes through; a later `begin()`
/// resumes from the same inbox, which is what the restart-on-end policy
/// relies on.
pub struct ChannelCapture {
    inbox: Arc<Mutex<mpsc::UnboundedReceiver<CaptureEvent>>>,
    feed: mpsc::UnboundedSender<CaptureEvent>,
    capturing: Arc<AtomicBool>,
}

impl ChannelCapture {
    pub fn new() -> (Self, FragmentFeeder) {
        let (tx, rx) = mpsc::unbounded_channel();
        let capture = Self {
            inbox: Arc::new(Mutex::new(rx)),
            feed: tx.clone(),
            capturing: Arc::new(AtomicBool::new(false)),
        };
        (capture, FragmentFeeder { tx })
    }
}

#[async_trait::async_trait]
impl SpeechCapture for ChannelCapture {
    async fn begin(&mut self, _options: CaptureOptions) -> Result<mpsc::Receiver<CaptureEvent>> {
        if self.capturing.swap(true, Ordering::SeqCst) {
            anyhow::bail!("capture stream is already active");
        }

        let (tx, rx) = mpsc::channel(64);
        let inbox = Arc::clone(&self.inbox);
        let capturing = Arc::clone(&self.capturing);

        tokio::spawn(async move {
            let mut inbox = inbox.lock().await;
            while let Some(event) = inbox.recv().await {
                let terminal = matches!(event, CaptureEvent::Ended | CaptureEvent::Error(_));
                if terminal {
                    // Clear the flag before delivery: the consumer may
                    // call begin() again the moment it sees the event
                    capturing.store(false, Ordering::SeqCst);
                }
                if tx.send(event).await.is_err() {
                    warn!("capture event receiver dropped; stopping forwarder");
                    break;
                }
                if terminal {
                    return;
                }
            }
            capturing.store(false, Ordering::SeqCst);
        });

        Ok(rx)
    }

    async fn halt(&mut self) -> Result<()> {
        if !self.capturing.load(Ordering::SeqCst) {
            return Ok(());
        }
        // The forwarder exits once it relays this event
        let _ = self.feed.send(CaptureEvent::Ended);
        Ok(())
    }

    fn is_capturing(&self) -> bool {
        self.capturing.load(Ordering::SeqCst)
    }

    fn name(&self) -> &str {
        "channel"
    }
}
