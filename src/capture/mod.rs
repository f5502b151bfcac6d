//! Speech capture backends
//!
//! This module defines the contract between a recording session and
//! whatever produces recognized speech:
//! - `SpeechCapture` trait: begin/halt a stream of capture events
//! - `ChannelCapture`: events pushed in by an external recognizer
//! - `ScriptedCapture`: deterministic event replay for tests

mod backend;
mod channel;
mod scripted;

pub use backend::{CaptureError, CaptureEvent, CaptureOptions, SpeechCapture};
pub use channel::{ChannelCapture, FragmentFeeder};
pub use scripted::ScriptedCapture;
