//! Calendar event models
//!
//! The types serialize directly into the Calendar API's event resource.

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// Identifier assigned by the calendar provider to an inserted event
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub String);

impl EventId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Local wall-clock time paired with an IANA zone identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTime {
    /// ISO 8601 timestamp without offset; the zone gives it meaning
    pub date_time: NaiveDateTime,
    pub time_zone: String,
}

/// Event payload submitted to the primary calendar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub summary: String,
    pub description: String,
    pub start: EventDateTime,
    pub end: EventDateTime,
}

impl CalendarEvent {
    pub fn duration(&self) -> TimeDelta {
        self.end.date_time - self.start.date_time
    }
}
