//! Domain models for mail and calendar entities

mod event;
mod message;

pub use event::{CalendarEvent, EventDateTime, EventId};
pub use message::{Header, MailMessage, MailMessageSummary, MessageId};
