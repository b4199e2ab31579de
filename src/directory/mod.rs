//! Device directory: display name to hub control identifier
//!
//! Built once at startup, either scraped from the control panel or loaded
//! from the JSON cache, and read-only afterwards.

mod extract;
mod store;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use extract::extract_from_str;
pub use store::load_or_scrape;

/// Errors building or persisting the directory
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("device {name:?} is already mapped to {existing}")]
    Duplicate { name: String, existing: i16 },

    #[error("directory I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("directory file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Mapping from device name (case-sensitive) to control identifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceDirectory {
    devices: BTreeMap<String, i16>,
}

impl DeviceDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a device. The first mapping for a name wins; a later one is
    /// rejected and leaves the directory unchanged.
    pub fn insert(&mut self, name: impl Into<String>, id: i16) -> Result<(), DirectoryError> {
        let name = name.into();
        if let Some(&existing) = self.devices.get(&name) {
            return Err(DirectoryError::Duplicate { name, existing });
        }
        self.devices.insert(name, id);
        Ok(())
    }

    /// Exact-match lookup
    pub fn lookup(&self, name: &str) -> Option<i16> {
        self.devices.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.devices.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_insert_wins() {
        let mut directory = DeviceDirectory::new();
        directory.insert("Lamp", 5).unwrap();

        let err = directory.insert("Lamp", 9).unwrap_err();
        assert!(matches!(err, DirectoryError::Duplicate { existing: 5, .. }));
        assert_eq!(directory.lookup("Lamp"), Some(5));
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let mut directory = DeviceDirectory::new();
        directory.insert("Keuken", 3).unwrap();

        assert_eq!(directory.lookup("Keuken"), Some(3));
        assert_eq!(directory.lookup("keuken"), None);
    }

    #[test]
    fn test_serializes_as_flat_object() {
        let mut directory = DeviceDirectory::new();
        directory.insert("Lamp", 5).unwrap();

        let json = serde_json::to_string(&directory).unwrap();
        assert_eq!(json, r#"{"Lamp":5}"#);
    }
}
