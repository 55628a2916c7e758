//! Agenda crate - Business logic for turning meeting emails into calendar events
//!
//! This crate provides:
//! - OAuth2 credential acquisition per API scope
//! - Gmail API reader for inbox messages
//! - Meeting detection and event composition
//! - Calendar API writer for the primary calendar
//! - The orchestrator sequencing one scan
//! - In-memory mailbox and calendar for tests

pub mod auth;
pub mod calendar;
pub mod config;
pub mod error;
pub mod gmail;
#[cfg(test)]
mod http_stub;
pub mod meeting;
pub mod memory;
pub mod models;
pub mod scan;

pub use auth::{Credential, CredentialStore, GoogleCredentialStore, Scope, acquire_credential};
pub use calendar::{CalendarClient, CalendarWriter};
pub use crate::config::{ClientSecret, Settings};
pub use error::AgendaError;
pub use gmail::{GmailClient, MailReader};
pub use meeting::{MeetingDetector, compose, is_meeting};
pub use memory::{InMemoryCalendar, InMemoryMailbox};
pub use models::{
    CalendarEvent, EventDateTime, EventId, Header, MailMessage, MailMessageSummary, MessageId,
};
pub use scan::{Orchestrator, ScanStats, Stage};
