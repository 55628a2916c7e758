//! Calendar API HTTP client
//!
//! Uses synchronous HTTP (ureq) to insert events into the primary calendar.

use anyhow::Result;
use log::debug;

use super::CalendarWriter;
use super::api::InsertedEvent;
use crate::auth::Credential;
use crate::error::AgendaError;
use crate::models::{CalendarEvent, EventId};

/// Calendar API client bound to one calendar-scope credential
pub struct CalendarClient {
    agent: ureq::Agent,
    credential: Credential,
    base_url: String,
    calendar_id: String,
}

impl CalendarClient {
    /// Calendar API base URL
    const BASE_URL: &'static str = "https://www.googleapis.com/calendar/v3";

    /// Alias for the authenticated user's default calendar
    const PRIMARY: &'static str = "primary";

    /// Create a new client writing to the primary calendar
    pub fn new(credential: Credential) -> Self {
        Self {
            agent: ureq::Agent::new_with_defaults(),
            credential,
            base_url: Self::BASE_URL.to_string(),
            calendar_id: Self::PRIMARY.to_string(),
        }
    }

    /// Use a preconfigured HTTP agent (timeouts, proxy)
    pub fn with_agent(mut self, agent: ureq::Agent) -> Self {
        self.agent = agent;
        self
    }

    /// Point the client at a different API root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn events_url(&self) -> String {
        format!(
            "{}/calendars/{}/events",
            self.base_url,
            urlencoding::encode(&self.calendar_id)
        )
    }
}

impl CalendarWriter for CalendarClient {
    fn insert_event(&self, event: &CalendarEvent) -> Result<EventId> {
        let mut response = self
            .agent
            .post(&self.events_url())
            .header(
                "Authorization",
                &format!("Bearer {}", self.credential.access_token),
            )
            .send_json(event)
            .map_err(|e| AgendaError::remote("Insert calendar event", e))?;

        let inserted: InsertedEvent = response
            .body_mut()
            .read_json()
            .map_err(|e| AgendaError::remote("Parse inserted event", e))?;

        if let Some(link) = &inserted.html_link {
            debug!("Event {} available at {}", inserted.id, link);
        }
        Ok(EventId::new(inserted.id))
    }
}
