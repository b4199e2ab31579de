//! Events module for confirmation state transitions
//!
//! Provides structured event types for commands that were queued for
//! confirmation, confirmed, or cancelled, plus the spoken feedback for each.

use crate::hub::packet;

/// Requested relay action, as spoken by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// "aan"
    On,
    /// "uit"
    Off,
}

impl Action {
    /// Spoken keyword for this action
    pub fn keyword(&self) -> &'static str {
        match self {
            Action::On => "aan",
            Action::Off => "uit",
        }
    }

    /// Verb used in the confirmation question
    pub fn verb(&self) -> &'static str {
        match self {
            Action::On => "aandoen",
            Action::Off => "uitdoen",
        }
    }

    pub fn turns_on(&self) -> bool {
        matches!(self, Action::On)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Events emitted by the session when a recognition event is accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A device command is waiting for "ja" or "nee"
    CommandPending {
        device: String,
        id: i16,
        action: Action,
        /// Set when an earlier unconfirmed command was discarded
        replaced: Option<String>,
    },

    /// The pending command was confirmed and must go out to the hub
    CommandConfirmed {
        device: String,
        id: i16,
        action: Action,
    },

    /// The pending command was rejected with "nee"
    CommandCancelled {
        device: String,
    },
}

impl SessionEvent {
    /// Text to speak back to the user
    pub fn speech(&self) -> String {
        match self {
            SessionEvent::CommandPending { device, action, .. } => {
                format!("Wil je de lichten {} zeker {}?", device, action.verb())
            }
            SessionEvent::CommandConfirmed { device, action, .. } => {
                format!("Ik doe {} {}.", device, action.keyword())
            }
            SessionEvent::CommandCancelled { .. } => "OK".to_string(),
        }
    }

    /// Wire packet to send to the hub, if this event carries one
    pub fn packet(&self) -> Option<String> {
        match self {
            SessionEvent::CommandConfirmed { id, action, .. } => {
                Some(packet::relay_packet(*id, action.turns_on()))
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionEvent::CommandPending { device, id, action, .. } => {
                write!(f, "COMMAND_PENDING ({} #{} {})", device, id, action)
            }
            SessionEvent::CommandConfirmed { device, id, action } => {
                write!(f, "COMMAND_CONFIRMED ({} #{} {})", device, id, action)
            }
            SessionEvent::CommandCancelled { device } => {
                write!(f, "COMMAND_CANCELLED ({})", device)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let event = SessionEvent::CommandConfirmed {
            device: "Keuken".to_string(),
            id: 12,
            action: Action::On,
        };
        assert_eq!(event.to_string(), "COMMAND_CONFIRMED (Keuken #12 aan)");
    }

    #[test]
    fn test_prompt_speech() {
        let event = SessionEvent::CommandPending {
            device: "Keuken".to_string(),
            id: 12,
            action: Action::Off,
            replaced: None,
        };
        assert_eq!(event.speech(), "Wil je de lichten Keuken zeker uitdoen?");
        assert_eq!(event.packet(), None);
    }

    #[test]
    fn test_confirmed_carries_packet() {
        let event = SessionEvent::CommandConfirmed {
            device: "Keuken".to_string(),
            id: 12,
            action: Action::On,
        };
        assert_eq!(event.speech(), "Ik doe Keuken aan.");
        assert_eq!(event.packet().as_deref(), Some("2 28 12 255"));
    }

    #[test]
    fn test_cancelled_speech() {
        let event = SessionEvent::CommandCancelled {
            device: "Hal".to_string(),
        };
        assert_eq!(event.speech(), "OK");
        assert_eq!(event.packet(), None);
    }
}
