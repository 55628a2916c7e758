//! Gmail API response normalization
//!
//! Converts Gmail API responses to domain models.

use super::api::{GmailMessage, ListMessagesResponse};
use crate::models::{MailMessage, MailMessageSummary, MessageId};

/// Normalize a Gmail API message to a MailMessage
///
/// The snippet is kept exactly as the provider generated it.
pub fn normalize_message(gmail_msg: GmailMessage) -> MailMessage {
    let headers = gmail_msg
        .payload
        .and_then(|payload| payload.headers)
        .unwrap_or_default();

    MailMessage {
        id: MessageId::new(gmail_msg.id),
        headers,
        snippet: gmail_msg.snippet,
    }
}

/// Flatten a list response into summaries; a missing list means an empty inbox
pub(crate) fn normalize_list(list: ListMessagesResponse) -> Vec<MailMessageSummary> {
    list.messages
        .unwrap_or_default()
        .into_iter()
        .map(|msg_ref| MailMessageSummary {
            id: MessageId::new(msg_ref.id),
            thread_id: msg_ref.thread_id,
        })
        .collect()
}
