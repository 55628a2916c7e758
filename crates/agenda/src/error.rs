//! Error taxonomy for a meetsync run
//!
//! Functions return `anyhow::Result`; these typed errors travel inside it and
//! can be recovered with `downcast_ref::<AgendaError>()`, also through added
//! context.

use crate::models::MessageId;

/// Failures that abort a run
#[derive(Debug, thiserror::Error)]
pub enum AgendaError {
    /// Consent denied, invalid client secret, or refresh rejected
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Message disappeared between list and fetch
    #[error("Message {id} not found")]
    NotFound { id: MessageId },

    /// A header the workflow depends on is absent
    #[error("Message {id} has no {header} header")]
    MissingHeader { id: MessageId, header: &'static str },

    /// Any other provider-side failure
    #[error("{operation} failed: {message}")]
    Remote {
        operation: &'static str,
        message: String,
    },

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

impl AgendaError {
    pub(crate) fn remote(operation: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Remote {
            operation,
            message: err.to_string(),
        }
    }
}
