//! Gmail API HTTP client
//!
//! Provides methods for listing and fetching inbox messages from the Gmail API.
//! Uses synchronous HTTP (ureq); there is no retry.

use anyhow::Result;
use log::debug;

use super::MailReader;
use super::api::{GmailMessage, ListMessagesResponse};
use super::normalize::{normalize_list, normalize_message};
use crate::auth::Credential;
use crate::error::AgendaError;
use crate::models::{MailMessage, MailMessageSummary, MessageId};

/// Gmail API client bound to one read-only mail credential
pub struct GmailClient {
    agent: ureq::Agent,
    credential: Credential,
    base_url: String,
}

impl GmailClient {
    /// Gmail API base URL
    const BASE_URL: &'static str = "https://gmail.googleapis.com/gmail/v1";

    /// Label constraining listings to the inbox
    const INBOX_LABEL: &'static str = "INBOX";

    /// Provider limit on `maxResults`
    const MAX_RESULTS_LIMIT: usize = 500;

    /// Create a new Gmail client
    pub fn new(credential: Credential) -> Self {
        Self {
            agent: ureq::Agent::new_with_defaults(),
            credential,
            base_url: Self::BASE_URL.to_string(),
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

    fn bearer(&self) -> String {
        format!("Bearer {}", self.credential.access_token)
    }

    fn list_url(&self) -> String {
        format!("{}/users/me/messages", self.base_url)
    }

    fn message_url(&self, id: &MessageId) -> String {
        format!(
            "{}/users/me/messages/{}",
            self.base_url,
            urlencoding::encode(id.as_str())
        )
    }
}

impl MailReader for GmailClient {
    fn list_inbox_messages(&self, max_results: usize) -> Result<Vec<MailMessageSummary>> {
        if max_results == 0 {
            return Err(
                AgendaError::InvalidSettings("max_results must be positive".to_string()).into(),
            );
        }
        let max_results = max_results.min(Self::MAX_RESULTS_LIMIT).to_string();

        let mut response = self
            .agent
            .get(&self.list_url())
            .header("Authorization", &self.bearer())
            .query("labelIds", Self::INBOX_LABEL)
            .query("maxResults", &max_results)
            .call()
            .map_err(|e| AgendaError::remote("List inbox messages", e))?;

        let list: ListMessagesResponse = response
            .body_mut()
            .read_json()
            .map_err(|e| AgendaError::remote("Parse list messages response", e))?;

        let estimate = list.result_size_estimate;
        let summaries = normalize_list(list);
        debug!(
            "Listed {} inbox messages (estimate {:?})",
            summaries.len(),
            estimate
        );
        Ok(summaries)
    }

    fn fetch_message(&self, id: &MessageId) -> Result<MailMessage> {
        let response = self
            .agent
            .get(&self.message_url(id))
            .header("Authorization", &self.bearer())
            .call();

        let mut response = match response {
            Ok(resp) => resp,
            Err(ureq::Error::StatusCode(404)) => {
                return Err(AgendaError::NotFound { id: id.clone() }.into());
            }
            Err(e) => return Err(AgendaError::remote("Get message", e).into()),
        };

        let message: GmailMessage = response
            .body_mut()
            .read_json()
            .map_err(|e| AgendaError::remote("Parse message response", e))?;

        Ok(normalize_message(message))
    }
}
