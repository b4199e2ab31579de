//! homeconnect-voice: voice remote control for a HomeCenter hub
//!
//! This client:
//! - Logs into the hub control panel and scrapes the switchable devices
//! - Caches the device directory as JSON between runs
//! - Listens for "<device> aan|uit" and asks for a "ja"/"nee" confirmation
//! - Sends confirmed commands over the hub's event WebSocket

mod config;
mod directory;
mod events;
mod hub;
mod lifecycle;
mod orchestrator;
mod session;
mod speech;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::directory::DeviceDirectory;
use crate::hub::{HubClient, HubSocket};
use crate::lifecycle::ShutdownSignal;
use crate::orchestrator::Orchestrator;
use crate::session::Session;
use crate::speech::{ConsoleListener, Grammar, VoiceOutput};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "homeconnect-voice starting"
    );

    let config = Config::load()?;
    info!(
        server = %config.server,
        ?config.directory_path,
        ?config.data_dir,
        "configuration loaded"
    );

    let directory = load_directory(&config).await?;
    if directory.is_empty() {
        warn!("device directory is empty, only ja/nee will be understood");
    }

    let socket = HubSocket::connect(&config.server)
        .await
        .context("failed to open hub WebSocket")?;

    let shutdown = ShutdownSignal::new();

    // Recognizer -> orchestrator
    let (speech_tx, speech_rx) = mpsc::channel(32);

    let mut listener = ConsoleListener::new(speech_tx, Grammar::from_directory(&directory));

    let session = Session::new(directory, config.min_confidence);
    let speaker = VoiceOutput::from_command_line(config.tts_command.as_deref());
    let mut orchestrator = Orchestrator::new(session, speaker, socket);

    if let Err(e) = listener.start() {
        error!(?e, "failed to start speech listener");
    }
    orchestrator.greet();

    tokio::select! {
        _ = orchestrator.run(speech_rx) => {
            info!("input closed");
        }

        _ = shutdown.wait() => {
            info!("shutdown signal received");
        }
    }

    info!("shutting down...");

    listener.stop();
    let mut socket = orchestrator.into_sink();
    socket.close().await;

    info!("homeconnect-voice stopped");

    Ok(())
}

/// Use the cached directory, or scrape the control panel when asked to or
/// when there is no cache yet
async fn load_directory(config: &Config) -> Result<DeviceDirectory> {
    let scrape = async {
        let client = HubClient::new(&config.server, &config.username, &config.password)?;
        Ok::<_, anyhow::Error>(client.fetch_control_panel().await?)
    };

    directory::load_or_scrape(&config.directory_path, config.refresh, scrape).await
}
