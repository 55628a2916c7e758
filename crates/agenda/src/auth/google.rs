//! Google OAuth2 credential store
//!
//! Tokens live in JSON files, one per scope. Consent uses the installed-app
//! authorization code flow with a loopback listener on an OS-assigned port.
//! Uses synchronous HTTP (ureq).

use anyhow::{Context, Result};
use chrono::{TimeDelta, Utc};
use log::{debug, info, warn};
use serde::Deserialize;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::path::Path;

use super::{Credential, CredentialStore, Scope};
use crate::config::ClientSecret;
use crate::error::AgendaError;

/// File-backed store talking to Google's OAuth2 endpoints
#[derive(Debug, Default, Clone, Copy)]
pub struct GoogleCredentialStore;

/// Token response from Google
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
}

impl GoogleCredentialStore {
    pub fn new() -> Self {
        Self
    }

    /// Build the consent URL the user is sent to
    fn authorization_url(secret: &ClientSecret, redirect_uri: &str, scope: Scope) -> String {
        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&access_type=offline&prompt=consent",
            secret.auth_uri,
            urlencoding::encode(&secret.client_id),
            urlencoding::encode(redirect_uri),
            urlencoding::encode(scope.as_str()),
        )
    }

    /// Accept one connection on the listener and extract the authorization code
    fn wait_for_callback(listener: TcpListener) -> Result<String> {
        let (mut stream, _) = listener.accept().context("Failed to accept connection")?;

        let mut reader = BufReader::new(&stream);
        let mut request_line = String::new();
        reader
            .read_line(&mut request_line)
            .context("Failed to read request")?;

        let code = parse_callback(&request_line);

        let (status, body) = if code.is_ok() {
            ("200 OK", "Authentication successful! You can close this window.")
        } else {
            ("400 Bad Request", "Authentication failed. Please try again.")
        };
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: text/html\r\nConnection: close\r\n\r\n<html><body><h1>{}</h1></body></html>",
            status, body
        );
        stream.write_all(response.as_bytes()).ok();

        code
    }

    fn exchange(token_uri: &str, form: &[(&str, &str)], what: &str) -> Result<TokenResponse> {
        let mut response = ureq::post(token_uri)
            .send_form(form.iter().copied())
            .map_err(|e| AgendaError::Auth(format!("{} rejected: {}", what, e)))?;

        let token: TokenResponse = response
            .body_mut()
            .read_json()
            .map_err(|e| AgendaError::Auth(format!("Malformed {} response: {}", what, e)))?;
        Ok(token)
    }
}

impl CredentialStore for GoogleCredentialStore {
    fn load(&self, token_path: &Path, scope: Scope) -> Result<Option<Credential>> {
        if !token_path.exists() {
            debug!("No stored credential at {}", token_path.display());
            return Ok(None);
        }

        let mut credential: Credential = config::load_json_file(token_path)
            .map_err(|e| AgendaError::Auth(format!("{:#}", e)))?;
        if credential.scopes.is_empty() {
            credential.scopes.push(scope.as_str().to_string());
        }
        Ok(Some(credential))
    }

    fn refresh(&self, credential: &Credential) -> Result<Credential> {
        let refresh_token = credential
            .refresh_token
            .as_deref()
            .ok_or_else(|| AgendaError::Auth("No refresh token available".to_string()))?;
        let client_id = credential
            .client_id
            .as_deref()
            .ok_or_else(|| AgendaError::Auth("Stored credential has no client_id".to_string()))?;
        let client_secret = credential.client_secret.as_deref().ok_or_else(|| {
            AgendaError::Auth("Stored credential has no client_secret".to_string())
        })?;
        let token_uri = credential
            .token_uri
            .as_deref()
            .unwrap_or(ClientSecret::DEFAULT_TOKEN_URI);

        let token = Self::exchange(
            token_uri,
            &[
                ("client_id", client_id),
                ("client_secret", client_secret),
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ],
            "Token refresh",
        )?;

        Ok(Credential {
            access_token: token.access_token,
            // Preserve the refresh token if not returned
            refresh_token: token
                .refresh_token
                .or_else(|| credential.refresh_token.clone()),
            expiry: token
                .expires_in
                .map(|secs| Utc::now() + TimeDelta::seconds(secs)),
            ..credential.clone()
        })
    }

    fn authorize(&self, client_secret_path: &Path, scope: Scope) -> Result<Credential> {
        let secret = ClientSecret::from_file(client_secret_path).map_err(|e| {
            AgendaError::Auth(format!("Invalid client secret: {:#}", e))
        })?;

        let listener =
            TcpListener::bind("127.0.0.1:0").context("Could not bind OAuth callback listener")?;
        let port = listener.local_addr()?.port();
        let redirect_uri = format!("http://localhost:{}/", port);
        let auth_url = Self::authorization_url(&secret, &redirect_uri, scope);

        println!("\n=== Google Authorization Required ({}) ===", scope);
        println!("Opening browser for authorization...");
        println!("If the browser doesn't open, visit: {}", auth_url);

        if let Err(e) = open::that(&auth_url) {
            warn!("Failed to open browser: {}. Please open the URL manually.", e);
        }

        info!("Waiting for authorization callback on port {}", port);
        let code = Self::wait_for_callback(listener)?;

        let token = Self::exchange(
            &secret.token_uri,
            &[
                ("client_id", secret.client_id.as_str()),
                ("client_secret", secret.client_secret.as_str()),
                ("code", code.as_str()),
                ("grant_type", "authorization_code"),
                ("redirect_uri", redirect_uri.as_str()),
            ],
            "Authorization code exchange",
        )?;

        println!("Authorization successful!\n");
        Ok(Credential {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expiry: token
                .expires_in
                .map(|secs| Utc::now() + TimeDelta::seconds(secs)),
            token_uri: Some(secret.token_uri),
            client_id: Some(secret.client_id),
            client_secret: Some(secret.client_secret),
            scopes: vec![scope.as_str().to_string()],
        })
    }

    fn persist(&self, credential: &Credential, token_path: &Path) -> Result<()> {
        config::save_json_file(token_path, credential)?;
        debug!("Saved credential to {}", token_path.display());
        Ok(())
    }
}

/// Extract the authorization code from the callback request line.
///
/// Format: `GET /?code=AUTH_CODE&scope=... HTTP/1.1`
fn parse_callback(request_line: &str) -> Result<String> {
    let target = request_line
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| AgendaError::Auth("Malformed OAuth callback request".to_string()))?;
    let url = url::Url::parse("http://localhost")
        .and_then(|base| base.join(target))
        .map_err(|e| AgendaError::Auth(format!("Malformed OAuth callback: {}", e)))?;

    let mut code = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "error" => return Err(AgendaError::Auth(format!("OAuth error: {}", value)).into()),
            "code" => code = Some(value.into_owned()),
            _ => {}
        }
    }

    code.ok_or_else(|| AgendaError::Auth("No authorization code received".to_string()).into())
}
