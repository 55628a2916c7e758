//! Gmail API integration
//!
//! This module provides:
//! - The [`MailReader`] contract used by the scan
//! - Gmail API client for listing and fetching inbox messages
//! - Response normalization to domain models

mod client;
mod normalize;

pub use client::GmailClient;
pub use normalize::normalize_message;

use anyhow::Result;

use crate::models::{MailMessage, MailMessageSummary, MessageId};

/// Read access to the user's inbox
pub trait MailReader {
    /// List up to `max_results` inbox messages, in provider order
    fn list_inbox_messages(&self, max_results: usize) -> Result<Vec<MailMessageSummary>>;

    /// Fetch the full message; fails with `AgendaError::NotFound` if it no longer exists
    fn fetch_message(&self, id: &MessageId) -> Result<MailMessage>;
}

/// Gmail API response types
pub mod api {
    use serde::Deserialize;

    use crate::models::Header;

    /// Response from listing messages
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ListMessagesResponse {
        pub messages: Option<Vec<MessageRef>>,
        pub result_size_estimate: Option<u32>,
    }

    /// Reference to a message (just ID and thread ID)
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MessageRef {
        pub id: String,
        pub thread_id: Option<String>,
    }

    /// Message as returned by `users.messages.get`
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GmailMessage {
        pub id: String,
        pub thread_id: Option<String>,
        #[serde(default)]
        pub snippet: String,
        pub payload: Option<MessagePayload>,
    }

    /// Message payload; only the headers are consulted
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MessagePayload {
        pub headers: Option<Vec<Header>>,
    }
}
