//! JSON cache of the device directory

use std::future::Future;
use std::path::Path;

use anyhow::Context;
use tracing::{info, warn};

use super::{extract_from_str, DeviceDirectory, DirectoryError};

/// Use the cached directory at `path`, or await `scrape` for the control
/// panel markup when `refresh` is set or there is no cache yet
///
/// A freshly scraped directory is cached unless it is empty.
pub async fn load_or_scrape<F>(path: &Path, refresh: bool, scrape: F) -> anyhow::Result<DeviceDirectory>
where
    F: Future<Output = anyhow::Result<String>>,
{
    if !refresh && path.exists() {
        return load(path).with_context(|| format!("failed to read {}", path.display()));
    }

    let html = scrape.await.context("failed to fetch control panel")?;
    let directory = extract_from_str(&html);

    if directory.is_empty() {
        warn!(?path, "control panel listed no devices, login probably failed; not caching");
        return Ok(directory);
    }

    if let Err(e) = save(path, &directory) {
        warn!(%e, "failed to cache device directory");
    }

    Ok(directory)
}

/// Read a directory previously written by [`save`]
pub fn load(path: &Path) -> Result<DeviceDirectory, DirectoryError> {
    let contents = std::fs::read_to_string(path)?;
    let directory: DeviceDirectory = serde_json::from_str(&contents)?;
    info!(?path, devices = directory.len(), "directory loaded");
    Ok(directory)
}

/// Write the directory as a flat JSON object, creating parent directories
pub fn save(path: &Path, directory: &DeviceDirectory) -> Result<(), DirectoryError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string(directory)?)?;
    info!(?path, devices = directory.len(), "directory saved");
    Ok(())
}
