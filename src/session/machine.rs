//! Confirmation state machine
//!
//! Device commands are never sent straight away: they wait in a single
//! pending slot until the user answers "ja" or "nee". A newer command
//! replaces an unanswered one.

use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info};

use crate::directory::DeviceDirectory;
use crate::events::{Action, SessionEvent};
use crate::speech::RecognitionEvent;

use super::utterance::Utterance;

/// Minimum recognizer confidence for a phrase to be acted upon
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.60;

/// The two states of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    /// Nothing waiting for confirmation
    #[default]
    Idle,
    /// One device command waiting for "ja" or "nee"
    AwaitingConfirmation,
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            State::Idle => write!(f, "Idle"),
            State::AwaitingConfirmation => write!(f, "AwaitingConfirmation"),
        }
    }
}

/// A device command waiting for confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCommand {
    pub id: i16,
    pub device: String,
    pub action: Action,
}

/// Reasons a recognition event was ignored. None of these are fatal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("the command wasn't recognized (confidence {confidence:.2})")]
    LowConfidence { confidence: f32 },

    #[error("the command wasn't recognized: no device named {name:?}")]
    UnknownDevice { name: String },

    #[error("the command wasn't recognized: {text:?}")]
    Unrecognized { text: String },

    #[error("there was no command to confirm")]
    NoPendingConfirmation,
}

/// Session state: the directory, the pending slot and the threshold
pub struct Session {
    directory: DeviceDirectory,
    pending: Option<PendingCommand>,
    /// When the current pending command was stored
    pending_since: Option<Instant>,
    min_confidence: f32,
}

impl Session {
    /// Create an idle session over `directory`
    pub fn new(directory: DeviceDirectory, min_confidence: f32) -> Self {
        Self {
            directory,
            pending: None,
            pending_since: None,
            min_confidence,
        }
    }

    pub fn state(&self) -> State {
        if self.pending.is_some() {
            State::AwaitingConfirmation
        } else {
            State::Idle
        }
    }

    pub fn pending(&self) -> Option<&PendingCommand> {
        self.pending.as_ref()
    }

    pub fn directory(&self) -> &DeviceDirectory {
        &self.directory
    }

    /// Process one recognition event to completion
    pub fn handle(&mut self, event: &RecognitionEvent) -> Result<SessionEvent, SessionError> {
        if event.confidence.is_nan() || event.confidence < self.min_confidence {
            return Err(SessionError::LowConfidence {
                confidence: event.confidence,
            });
        }

        match Utterance::parse(&event.text) {
            Utterance::Yes => self.confirm(),
            Utterance::No => self.cancel(),
            Utterance::Device { name, action } => self.request(name, action),
            Utterance::Unrecognized => Err(SessionError::Unrecognized {
                text: event.text.clone(),
            }),
        }
    }

    /// Store a device command, replacing any unanswered one
    fn request(&mut self, name: String, action: Action) -> Result<SessionEvent, SessionError> {
        let id = self
            .directory
            .lookup(&name)
            .ok_or_else(|| SessionError::UnknownDevice { name: name.clone() })?;

        let replaced = self.take_pending().map(|(old, waited_ms)| {
            debug!(device = %old.device, id = old.id, waited_ms, "dropping unconfirmed command");
            old.device
        });

        info!(device = %name, id, %action, "awaiting confirmation");

        self.pending = Some(PendingCommand {
            id,
            device: name.clone(),
            action,
        });
        self.pending_since = Some(Instant::now());

        Ok(SessionEvent::CommandPending {
            device: name,
            id,
            action,
            replaced,
        })
    }

    fn confirm(&mut self) -> Result<SessionEvent, SessionError> {
        let (command, waited_ms) = self
            .take_pending()
            .ok_or(SessionError::NoPendingConfirmation)?;

        info!(device = %command.device, id = command.id, waited_ms, "command confirmed");

        Ok(SessionEvent::CommandConfirmed {
            device: command.device,
            id: command.id,
            action: command.action,
        })
    }

    fn cancel(&mut self) -> Result<SessionEvent, SessionError> {
        let (command, waited_ms) = self
            .take_pending()
            .ok_or(SessionError::NoPendingConfirmation)?;

        info!(device = %command.device, waited_ms, "command cancelled");

        Ok(SessionEvent::CommandCancelled {
            device: command.device,
        })
    }

    /// Empty the pending slot, returning to Idle, along with how long the
    /// command waited in milliseconds
    fn take_pending(&mut self) -> Option<(PendingCommand, u64)> {
        let waited_ms = self
            .pending_since
            .take()
            .map(|t| u64::try_from(t.elapsed().as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0);

        let command = self.pending.take()?;
        Some((command, waited_ms))
    }
}
