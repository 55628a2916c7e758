//! meetsync - creates calendar events from meeting emails
//!
//! Runs one scan of the Gmail inbox and exits. Takes no arguments; settings
//! come from ~/.config/meetsync/settings.json or built-in defaults.

use agenda::{GoogleCredentialStore, Orchestrator, Settings};
use anyhow::Result;
use log::{info, warn};

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    // Bootstrap config directory
    if let Err(e) = config::init() {
        warn!("Failed to initialize config directory: {}", e);
    }

    let settings = Settings::load()?;
    if !settings.client_secret_path.exists() {
        warn!(
            "No OAuth client secret at {}; authorization will fail if a token is missing",
            settings.client_secret_path.display()
        );
    }

    let store = GoogleCredentialStore::new();
    let orchestrator = Orchestrator::connect(settings, &store)?;
    let stats = orchestrator.run()?;

    info!(
        "Created {} calendar event(s) from {} inbox message(s)",
        stats.events_created.len(),
        stats.messages_listed
    );
    Ok(())
}
