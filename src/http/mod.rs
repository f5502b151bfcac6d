//! HTTP control surface
//!
//! Owns the session map: a frontend starts a session, forwards its
//! recognizer's events into the capture feed, stops it, and polls for
//! the analysis outcome.

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::{AppState, SessionDefaults, SessionEntry};
