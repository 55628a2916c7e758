//! Inbox scan: the end-to-end workflow
//!
//! One pass over the newest inbox messages, turning each meeting-like
//! message into a calendar event. Not idempotent: every run inserts again.

mod orchestrator;
mod stage;

pub use orchestrator::{Clock, Orchestrator, ScanStats};
pub use stage::Stage;
