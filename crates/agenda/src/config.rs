//! Run settings and OAuth client-secret loading
//!
//! Settings come from (in order of priority):
//! 1. `settings.json` in the meetsync config directory, if present
//! 2. Built-in defaults matching the fixed historical behavior

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::AgendaError;

/// Settings filename in the meetsync config directory
const SETTINGS_FILE: &str = "settings.json";

/// Explicit configuration for one orchestrated run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Persisted credential for the read-only mail scope
    pub mail_token_path: PathBuf,
    /// Persisted credential for the calendar scope
    pub calendar_token_path: PathBuf,
    /// Client-secret descriptor used by the consent flow
    pub client_secret_path: PathBuf,
    /// Maximum number of inbox messages inspected per run
    pub inbox_cap: usize,
    /// Subject keyword signalling a meeting
    pub meeting_keyword: String,
    /// Zone attached to every created event
    pub time_zone_id: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mail_token_path: PathBuf::from("token_gmail.json"),
            calendar_token_path: PathBuf::from("token_calendar.json"),
            client_secret_path: PathBuf::from("credentials.json"),
            inbox_cap: 25,
            meeting_keyword: "meeting".to_string(),
            time_zone_id: "America/Chicago".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the config directory, or defaults if there is no file.
    ///
    /// Relative paths are resolved against the working directory, falling
    /// back to the executable's directory.
    pub fn load() -> Result<Self> {
        let settings = if config::config_exists(SETTINGS_FILE) {
            config::load_json::<Settings>(SETTINGS_FILE)?
        } else {
            Self::default()
        };
        settings.validate()?;
        Ok(settings.resolved())
    }

    /// Load settings from a specific JSON file.
    ///
    /// Validation and path resolution match [`Settings::load`].
    pub fn from_file(path: &Path) -> Result<Self> {
        let settings: Settings = config::load_json_file(path)
            .with_context(|| format!("Invalid settings file {}", path.display()))?;
        settings.validate()?;
        Ok(settings.resolved())
    }

    /// Reject settings the workflow cannot run with
    pub fn validate(&self) -> Result<(), AgendaError> {
        if self.inbox_cap == 0 {
            return Err(AgendaError::InvalidSettings(
                "inbox_cap must be positive".to_string(),
            ));
        }
        if self.meeting_keyword.is_empty() {
            return Err(AgendaError::InvalidSettings(
                "meeting_keyword must not be empty".to_string(),
            ));
        }
        if self.time_zone_id.is_empty() {
            return Err(AgendaError::InvalidSettings(
                "time_zone_id must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    fn resolved(self) -> Self {
        Self {
            mail_token_path: config::resolve_path(&self.mail_token_path),
            calendar_token_path: config::resolve_path(&self.calendar_token_path),
            client_secret_path: config::resolve_path(&self.client_secret_path),
            ..self
        }
    }
}

/// OAuth client registration read from a Google Cloud Console JSON file
#[derive(Debug, Clone)]
pub struct ClientSecret {
    pub client_id: String,
    pub client_secret: String,
    pub auth_uri: String,
    pub token_uri: String,
}

/// Google Cloud Console credential file format (installed app)
#[derive(Deserialize)]
struct GoogleCredentialFile {
    installed: Option<InstalledCredentials>,
    web: Option<InstalledCredentials>,
}

#[derive(Deserialize)]
struct InstalledCredentials {
    client_id: String,
    client_secret: String,
    auth_uri: Option<String>,
    token_uri: Option<String>,
}

impl ClientSecret {
    pub const DEFAULT_AUTH_URI: &'static str = "https://accounts.google.com/o/oauth2/auth";
    pub const DEFAULT_TOKEN_URI: &'static str = "https://oauth2.googleapis.com/token";

    /// Load the client secret from a specific JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let creds: GoogleCredentialFile = config::load_json_file(path)?;
        Self::from_credential_file(creds)
    }

    /// Parse the client secret from a JSON string (Google Cloud Console format)
    pub fn from_json(json: &str) -> Result<Self> {
        let creds: GoogleCredentialFile =
            serde_json::from_str(json).context("Failed to parse credentials JSON")?;
        Self::from_credential_file(creds)
    }

    fn from_credential_file(creds: GoogleCredentialFile) -> Result<Self> {
        // Support both "installed" (desktop) and "web" credential types
        let installed = creds
            .installed
            .or(creds.web)
            .context("Credentials file missing 'installed' or 'web' section")?;

        Ok(Self {
            client_id: installed.client_id,
            client_secret: installed.client_secret,
            auth_uri: installed
                .auth_uri
                .unwrap_or_else(|| Self::DEFAULT_AUTH_URI.to_string()),
            token_uri: installed
                .token_uri
                .unwrap_or_else(|| Self::DEFAULT_TOKEN_URI.to_string()),
        })
    }
}
