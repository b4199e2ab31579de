//! Recognition grammar
//!
//! The recognizer only ever reports one of: a directory device name followed
//! by " aan" or " uit", or the bare words "ja" / "nee".

use std::collections::BTreeSet;

use crate::directory::DeviceDirectory;
use crate::events::Action;
use crate::session::{NO, YES};

/// Closed set of phrases the recognizer may emit
#[derive(Debug, Clone, Default)]
pub struct Grammar {
    phrases: BTreeSet<String>,
}

impl Grammar {
    /// Device commands for every directory entry plus the confirmation words
    pub fn from_directory(directory: &DeviceDirectory) -> Self {
        let mut phrases = BTreeSet::new();

        for name in directory.names() {
            for action in [Action::On, Action::Off] {
                phrases.insert(format!("{} {}", name, action.keyword()));
            }
        }
        phrases.insert(YES.to_string());
        phrases.insert(NO.to_string());

        Self { phrases }
    }

    pub fn contains(&self, phrase: &str) -> bool {
        self.phrases.contains(phrase)
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrases() {
        let mut directory = DeviceDirectory::new();
        directory.insert("Keuken", 12).unwrap();
        directory.insert("Hal", 3).unwrap();

        let grammar = Grammar::from_directory(&directory);
        assert_eq!(grammar.len(), 6);
        assert!(grammar.contains("Keuken aan"));
        assert!(grammar.contains("Hal uit"));
        assert!(grammar.contains("ja"));
        assert!(grammar.contains("nee"));
        assert!(!grammar.contains("Keuken"));
        assert!(!grammar.contains("Zolder aan"));
    }

    #[test]
    fn test_empty_directory() {
        let grammar = Grammar::from_directory(&DeviceDirectory::new());
        assert_eq!(grammar.len(), 2);
    }
}
