//! Configuration loading and management

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::session::DEFAULT_MIN_CONFIDENCE;

/// Command line, with environment fallbacks for the hub credentials
#[derive(Debug, Parser)]
#[command(name = "homeconnect-voice", version, about)]
pub struct Cli {
    /// HomeCenter server address (host or host:port)
    #[arg(long, env = "HOMECONNECT_SERVER")]
    pub server: String,

    /// Control panel username
    #[arg(long, env = "HOMECONNECT_USERNAME", default_value = "")]
    pub username: String,

    /// Control panel password
    #[arg(long, env = "HOMECONNECT_PASSWORD", default_value = "", hide_env_values = true)]
    pub password: String,

    /// Where the scraped device directory is cached
    #[arg(long, env = "HOMECONNECT_DIRECTORY")]
    pub directory: Option<PathBuf>,

    /// Scrape the control panel again even if a cached directory exists
    #[arg(long)]
    pub refresh: bool,

    /// Minimum recognizer confidence to act on a phrase
    #[arg(long, default_value_t = DEFAULT_MIN_CONFIDENCE)]
    pub min_confidence: f32,

    /// External program that speaks its last argument, e.g. "espeak-ng -v nl"
    #[arg(long, env = "HOMECONNECT_TTS_COMMAND")]
    pub tts_command: Option<String>,
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: String,
    pub username: String,
    pub password: String,

    /// Path of the JSON device directory cache
    pub directory_path: PathBuf,

    /// Directory for runtime data
    pub data_dir: PathBuf,

    pub refresh: bool,
    pub min_confidence: f32,
    pub tts_command: Option<String>,
}

impl Config {
    /// Load configuration from the command line, environment and defaults
    pub fn load() -> Result<Self> {
        Self::from_cli(Cli::parse())
    }

    pub fn from_cli(cli: Cli) -> Result<Self> {
        let data_dir = dirs::data_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".local").join("share")))
            .context("no data directory available")?
            .join("homeconnect");

        let directory_path = cli
            .directory
            .unwrap_or_else(|| data_dir.join("relays.json"));

        Ok(Self {
            server: cli.server,
            username: cli.username,
            password: cli.password,
            directory_path,
            data_dir,
            refresh: cli.refresh,
            min_confidence: cli.min_confidence,
            tts_command: cli.tts_command,
        })
    }
}
