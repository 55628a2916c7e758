//! Calendar event composition

use chrono::{NaiveDateTime, TimeDelta};

use crate::models::{CalendarEvent, EventDateTime};

/// Length of every created event
pub const EVENT_DURATION: TimeDelta = TimeDelta::hours(1);

/// Build the event for a detected meeting message.
///
/// The event starts at `now` (processing time, not anything in the message)
/// and lasts [`EVENT_DURATION`]. Subject and snippet are copied verbatim.
pub fn compose(subject: &str, snippet: &str, now: NaiveDateTime, time_zone: &str) -> CalendarEvent {
    CalendarEvent {
        summary: subject.to_string(),
        description: snippet.to_string(),
        start: EventDateTime {
            date_time: now,
            time_zone: time_zone.to_string(),
        },
        end: EventDateTime {
            date_time: now + EVENT_DURATION,
            time_zone: time_zone.to_string(),
        },
    }
}
