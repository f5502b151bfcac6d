use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::{mpsc, Mutex};

use super::backend::{CaptureEvent, CaptureOptions, SpeechCapture};

/// Capture backend that replays pre-scripted event sequences.
///
/// Each call to `begin()` consumes the next script and streams its
/// events in order. A stream whose script does not end with `Ended`
/// stays open until `halt()`. Used by tests to exercise the session
/// runner deterministically, including the spontaneous end-of-stream
/// restart path.
pub struct ScriptedCapture {
    scripts: VecDeque<Vec<CaptureEvent>>,
    begins: Arc<AtomicUsize>,
    capturing: Arc<AtomicBool>,
    current: Arc<Mutex<Option<mpsc::Sender<CaptureEvent>>>>,
}

impl ScriptedCapture {
    pub fn new(scripts: Vec<Vec<CaptureEvent>>) -> Self {
        Self {
            scripts: scripts.into(),
            begins: Arc::new(AtomicUsize::new(0)),
            capturing: Arc::new(AtomicBool::new(false)),
            current: Arc::new(Mutex::new(None)),
        }
    }

    /// Shared counter of `begin()` calls, for asserting on restarts
    /// after the backend has been handed to a session
    pub fn begin_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.begins)
    }
}

#[async_trait::async_trait]
impl SpeechCapture for ScriptedCapture {
    async fn begin(&mut self, _options: CaptureOptions) -> Result<mpsc::Receiver<CaptureEvent>> {
        self.begins.fetch_add(1, Ordering::SeqCst);
        self.capturing.store(true, Ordering::SeqCst);

        let script = self.scripts.pop_front().unwrap_or_default();
        let (tx, rx) = mpsc::channel(64);

        {
            let mut current = self.current.lock().await;
            *current = Some(tx.clone());
        }

        let capturing = Arc::clone(&self.capturing);
        tokio::spawn(async move {
            for event in script {
                let terminal = matches!(event, CaptureEvent::Ended | CaptureEvent::Error(_));
                if tx.send(event).await.is_err() {
                    break;
                }
                if terminal {
                    capturing.store(false, Ordering::SeqCst);
                    return;
                }
            }
            // Keep tx alive so the stream stays open until halt()
            // drops the receiver side
            tx.closed().await;
        });

        Ok(rx)
    }

    async fn halt(&mut self) -> Result<()> {
        self.capturing.store(false, Ordering::SeqCst);
        let current = self.current.lock().await.take();
        if let Some(tx) = current {
            let _ = tx.send(CaptureEvent::Ended).await;
        }
        Ok(())
    }

    fn is_capturing(&self) -> bool {
        self.capturing.load(Ordering::SeqCst)
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
