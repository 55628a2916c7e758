//! Google Calendar integration
//!
//! Events are written to the primary calendar with no idempotency key, so
//! inserting the same payload twice creates two events.

mod client;

pub use client::CalendarClient;

use anyhow::Result;

use crate::models::{CalendarEvent, EventId};

/// Write access to the user's primary calendar
pub trait CalendarWriter {
    fn insert_event(&self, event: &CalendarEvent) -> Result<EventId>;
}

/// Calendar API response types
pub mod api {
    use serde::Deserialize;

    /// The parts of the created event resource we read back
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct InsertedEvent {
        pub id: String,
        pub html_link: Option<String>,
        pub status: Option<String>,
    }
}
