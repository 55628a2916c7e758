//! Orchestrator sequencing authentication, listing and event creation

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use log::{debug, info};
use std::sync::Arc;

use super::Stage;
use crate::auth::{CredentialStore, Scope, acquire_credential};
use crate::calendar::{CalendarClient, CalendarWriter};
use crate::config::Settings;
use crate::gmail::{GmailClient, MailReader};
use crate::meeting::{MeetingDetector, compose};
use crate::models::{EventId, MessageId};

/// Source of the processing time used as event start
pub type Clock = Box<dyn Fn() -> NaiveDateTime>;

/// Statistics from one scan
#[derive(Debug, Default, Clone)]
pub struct ScanStats {
    /// Number of message ids returned by the inbox listing
    pub messages_listed: usize,
    /// Number of messages fetched in full
    pub messages_fetched: usize,
    /// Number of messages whose subject matched the keyword
    pub meetings_detected: usize,
    /// Events inserted, in processing order
    pub events_created: Vec<EventId>,
    /// Duration of the scan
    pub duration_ms: u64,
}

/// Runs the inbox-to-calendar workflow with explicit settings
///
/// Any error aborts the remaining batch; nothing is retried or skipped.
pub struct Orchestrator {
    settings: Settings,
    mail: Arc<dyn MailReader>,
    calendar: Arc<dyn CalendarWriter>,
    detector: MeetingDetector,
    clock: Clock,
}

impl Orchestrator {
    /// Create an orchestrator over already-authenticated clients
    pub fn new(
        settings: Settings,
        mail: Arc<dyn MailReader>,
        calendar: Arc<dyn CalendarWriter>,
    ) -> Self {
        let detector = MeetingDetector::new(&settings.meeting_keyword);
        Self {
            settings,
            mail,
            calendar,
            detector,
            clock: Box::new(|| Local::now().naive_local()),
        }
    }

    /// Authenticate both scopes and build the Gmail and Calendar clients
    ///
    /// May block on interactive consent when a credential is missing.
    pub fn connect(settings: Settings, store: &dyn CredentialStore) -> Result<Self> {
        settings.validate()?;
        info!("Stage: {}", Stage::Authenticating);

        let mail_credential = acquire_credential(
            store,
            Scope::GmailReadonly,
            &settings.mail_token_path,
            &settings.client_secret_path,
        )
        .with_context(|| format!("Failed while {} the mail scope", Stage::Authenticating))?;

        let calendar_credential = acquire_credential(
            store,
            Scope::Calendar,
            &settings.calendar_token_path,
            &settings.client_secret_path,
        )
        .with_context(|| format!("Failed while {} the calendar scope", Stage::Authenticating))?;

        Ok(Self::new(
            settings,
            Arc::new(GmailClient::new(mail_credential)),
            Arc::new(CalendarClient::new(calendar_credential)),
        ))
    }

    /// Replace the wall clock used for event start times
    pub fn with_clock(mut self, clock: impl Fn() -> NaiveDateTime + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Process one batch of up to `inbox_cap` inbox messages, sequentially
    pub fn run(&self) -> Result<ScanStats> {
        let start = std::time::Instant::now();
        let mut stats = ScanStats::default();

        info!("Stage: {} (cap {})", Stage::Listing, self.settings.inbox_cap);
        let summaries = self
            .mail
            .list_inbox_messages(self.settings.inbox_cap)
            .with_context(|| format!("Failed while {} the inbox", Stage::Listing))?;
        stats.messages_listed = summaries.len();

        for summary in &summaries {
            let message = self
                .mail
                .fetch_message(&summary.id)
                .with_context(|| failed_at(Stage::Fetching, &summary.id))?;
            stats.messages_fetched += 1;

            let subject = message
                .subject()
                .with_context(|| failed_at(Stage::Detecting, &message.id))?;
            if !self.detector.is_meeting(subject) {
                debug!("Skipping {}: no meeting keyword in {:?}", message.id, subject);
                continue;
            }
            stats.meetings_detected += 1;

            debug!("Stage: {} for {}", Stage::Composing, message.id);
            let event = compose(
                subject,
                &message.snippet,
                (self.clock)(),
                &self.settings.time_zone_id,
            );

            let event_id = self
                .calendar
                .insert_event(&event)
                .with_context(|| failed_at(Stage::Inserting, &message.id))?;
            info!("Created event {} for \"{}\"", event_id, event.summary);
            stats.events_created.push(event_id);
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            "Stage: {} ({} listed, {} meetings, {} events in {}ms)",
            Stage::Done,
            stats.messages_listed,
            stats.meetings_detected,
            stats.events_created.len(),
            stats.duration_ms
        );
        Ok(stats)
    }
}

fn failed_at(stage: Stage, id: &MessageId) -> String {
    format!("Failed while {} message {}", stage, id)
}
