//! OAuth2 credentials per API scope
//!
//! This module provides:
//! - The persisted [`Credential`] record and its validity rule
//! - The [`CredentialStore`] contract (load, refresh, consent, persist)
//! - [`acquire_credential`], the single obtain-or-refresh-or-authorize routine
//!   shared by the mail and calendar scopes

mod google;

pub use google::GoogleCredentialStore;

use anyhow::Result;
use chrono::{DateTime, TimeDelta, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Permission sets requested by meetsync
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Read-only mail access
    GmailReadonly,
    /// Read-write calendar access
    Calendar,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::GmailReadonly => "https://www.googleapis.com/auth/gmail.readonly",
            Scope::Calendar => "https://www.googleapis.com/auth/calendar",
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token material bound to one scope, in the "authorized user" file shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    #[serde(rename = "token", default)]
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expiry: Option<DateTime<Utc>>,
    #[serde(default)]
    pub token_uri: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub scopes: Vec<String>,
}

impl Credential {
    /// Tokens this close to expiry are treated as expired
    pub const EXPIRY_SKEW_SECS: i64 = 300;

    /// Credential with only an access token (no expiry, no refresh)
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
            expiry: None,
            token_uri: None,
            client_id: None,
            client_secret: None,
            scopes: Vec::new(),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiry
            .is_some_and(|expiry| expiry <= now + TimeDelta::seconds(Self::EXPIRY_SKEW_SECS))
    }

    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        !self.access_token.is_empty() && !self.is_expired(now)
    }
}

/// Persistence and token-exchange operations behind credential acquisition
pub trait CredentialStore {
    /// Load a persisted credential, `None` if nothing is stored
    fn load(&self, token_path: &Path, scope: Scope) -> Result<Option<Credential>>;

    /// Exchange the refresh token for a new access token
    fn refresh(&self, credential: &Credential) -> Result<Credential>;

    /// Run the interactive consent flow, blocking until the user finishes
    fn authorize(&self, client_secret_path: &Path, scope: Scope) -> Result<Credential>;

    /// Write the credential to storage
    fn persist(&self, credential: &Credential, token_path: &Path) -> Result<()>;
}

/// Obtain a usable credential for `scope`.
///
/// A valid stored credential is returned as is. An expired one with a refresh
/// token is refreshed; a failed refresh is fatal. Otherwise the consent flow
/// runs. Any new or refreshed credential is persisted before returning.
pub fn acquire_credential(
    store: &dyn CredentialStore,
    scope: Scope,
    token_path: &Path,
    client_secret_path: &Path,
) -> Result<Credential> {
    let now = Utc::now();
    let credential = match store.load(token_path, scope)? {
        Some(credential) if credential.is_valid(now) => {
            info!("Using stored credential for {}", scope);
            return Ok(credential);
        }
        Some(credential) if credential.is_expired(now) && credential.refresh_token.is_some() => {
            info!("Refreshing expired credential for {}", scope);
            store.refresh(&credential)?
        }
        _ => {
            info!("Authorization required for {}", scope);
            store.authorize(client_secret_path, scope)?
        }
    };

    store.persist(&credential, token_path)?;
    Ok(credential)
}
