//! In-memory mailbox and calendar
//!
//! Used for testing and dry runs. Both sides use RwLocks so they can be
//! shared through `Arc` while the orchestrator holds them as trait objects.

use anyhow::Result;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::calendar::CalendarWriter;
use crate::error::AgendaError;
use crate::gmail::MailReader;
use crate::models::{CalendarEvent, EventId, MailMessage, MailMessageSummary, MessageId};

/// In-memory implementation of MailReader
///
/// Messages are listed in insertion order, newest first by convention.
#[derive(Default)]
pub struct InMemoryMailbox {
    messages: RwLock<Vec<MailMessage>>,
    /// Ids returned by listing but gone when fetched
    vanished: RwLock<Vec<MessageId>>,
}

impl InMemoryMailbox {
    pub fn new(messages: Vec<MailMessage>) -> Self {
        Self {
            messages: RwLock::new(messages),
            vanished: RwLock::new(Vec::new()),
        }
    }

    /// Deliver a new message; it lists first, like the newest inbox entry
    pub fn push(&self, message: MailMessage) {
        self.messages.write().unwrap().insert(0, message);
    }

    /// Keep listing `id` but fail to fetch it, as if it was deleted in between
    pub fn vanish(&self, id: &MessageId) {
        self.vanished.write().unwrap().push(id.clone());
    }
}

impl MailReader for InMemoryMailbox {
    fn list_inbox_messages(&self, max_results: usize) -> Result<Vec<MailMessageSummary>> {
        let messages = self.messages.read().unwrap();
        Ok(messages
            .iter()
            .take(max_results)
            .map(|m| MailMessageSummary::new(m.id.clone()))
            .collect())
    }

    fn fetch_message(&self, id: &MessageId) -> Result<MailMessage> {
        if self.vanished.read().unwrap().contains(id) {
            return Err(AgendaError::NotFound { id: id.clone() }.into());
        }
        self.messages
            .read()
            .unwrap()
            .iter()
            .find(|m| &m.id == id)
            .cloned()
            .ok_or_else(|| AgendaError::NotFound { id: id.clone() }.into())
    }
}

/// In-memory implementation of CalendarWriter
///
/// Every insert is appended; nothing is deduplicated.
#[derive(Default)]
pub struct InMemoryCalendar {
    events: RwLock<Vec<CalendarEvent>>,
    unavailable: AtomicBool,
}

impl InMemoryCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of inserted events in insertion order
    pub fn events(&self) -> Vec<CalendarEvent> {
        self.events.read().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.events.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Make subsequent inserts fail with a remote error
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

impl CalendarWriter for InMemoryCalendar {
    fn insert_event(&self, event: &CalendarEvent) -> Result<EventId> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AgendaError::remote("Insert calendar event", "calendar unavailable").into());
        }
        let mut events = self.events.write().unwrap();
        events.push(event.clone());
        Ok(EventId::new(format!("event-{}", events.len())))
    }
}
