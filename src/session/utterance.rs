//! Structured form of a recognized phrase

use crate::events::Action;

pub const YES: &str = "ja";
pub const NO: &str = "nee";

/// What the user said, as far as the grammar is concerned
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Utterance {
    /// "ja"
    Yes,
    /// "nee"
    No,
    /// "<device> aan" or "<device> uit"
    Device { name: String, action: Action },
    /// Anything else
    Unrecognized,
}

impl Utterance {
    /// Parse recognizer output. Device commands always end in a space plus
    /// the 3-letter action keyword; the rest is the device name verbatim.
    pub fn parse(text: &str) -> Self {
        if text == YES {
            return Utterance::Yes;
        }
        if text == NO {
            return Utterance::No;
        }

        for action in [Action::On, Action::Off] {
            let suffix = format!(" {}", action.keyword());
            if let Some(name) = text.strip_suffix(suffix.as_str()) {
                return Utterance::Device {
                    name: name.to_string(),
                    action,
                };
            }
        }

        Utterance::Unrecognized
    }
}
