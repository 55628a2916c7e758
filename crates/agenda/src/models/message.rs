//! Mail message models

use serde::{Deserialize, Serialize};

use crate::error::AgendaError;

/// Unique identifier for a message (Gmail message ID)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for MessageId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for MessageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Entry of an inbox listing, only good for fetching the full message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessageSummary {
    pub id: MessageId,
    pub thread_id: Option<String>,
}

impl MailMessageSummary {
    pub fn new(id: impl Into<MessageId>) -> Self {
        Self {
            id: id.into(),
            thread_id: None,
        }
    }
}

/// Email header (name-value pair)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A fetched message: headers plus the provider's plain-text preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub id: MessageId,
    /// Headers in the order the provider returned them
    pub headers: Vec<Header>,
    /// Short plain-text preview generated by the provider
    pub snippet: String,
}

impl MailMessage {
    pub const SUBJECT: &'static str = "Subject";

    pub fn new(id: impl Into<MessageId>, headers: Vec<Header>, snippet: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            headers,
            snippet: snippet.into(),
        }
    }

    /// Look up a header value by its exact name; the first occurrence wins
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name == name)
            .map(|h| h.value.as_str())
    }

    /// The Subject header, which the workflow requires
    pub fn subject(&self) -> Result<&str, AgendaError> {
        self.header(Self::SUBJECT)
            .ok_or_else(|| AgendaError::MissingHeader {
                id: self.id.clone(),
                header: Self::SUBJECT,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_lookup() {
        let msg = MailMessage::new(
            "m1",
            vec![
                Header::new("From", "alice@example.com"),
                Header::new("Subject", "Weekly Meeting"),
            ],
            "Agenda attached",
        );
        assert_eq!(msg.subject().unwrap(), "Weekly Meeting");
        assert_eq!(msg.header("From"), Some("alice@example.com"));
        assert_eq!(msg.header("Cc"), None);
    }

    #[test]
    fn test_subject_name_matches_exactly() {
        let msg = MailMessage::new(
            "m7",
            vec![Header::new("subject", "lower"), Header::new("SUBJECT", "upper")],
            "",
        );
        assert_eq!(msg.header("subject"), Some("lower"));
        let err = msg.subject().unwrap_err();
        assert!(matches!(
            err,
            AgendaError::MissingHeader { ref id, header: "Subject" } if id.as_str() == "m7"
        ));
    }

    #[test]
    fn test_missing_subject() {
        let msg = MailMessage::new("m9", vec![Header::new("From", "bob@example.com")], "");
        let err = msg.subject().unwrap_err();
        assert!(matches!(
            err,
            AgendaError::MissingHeader { ref id, header: "Subject" } if id.as_str() == "m9"
        ));
    }

    #[test]
    fn test_empty_subject_is_present() {
        let msg = MailMessage::new("m1", vec![Header::new("Subject", "")], "");
        assert_eq!(msg.subject().unwrap(), "");
    }
}
