//! Meeting detection and event composition
//!
//! Pure functions with no I/O; the scan feeds them fetched messages.

mod compose;
mod detect;

pub use compose::{EVENT_DURATION, compose};
pub use detect::{DEFAULT_KEYWORD, MeetingDetector, is_meeting};
