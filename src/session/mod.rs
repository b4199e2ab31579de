//! Confirmation session
//!
//! Provides the two-state machine that sits between the recognizer and the hub:
//! - Idle: no command waiting
//! - AwaitingConfirmation: one device command waiting for "ja" / "nee"

mod machine;
mod utterance;

pub use machine::{Session, SessionError, State, DEFAULT_MIN_CONFIDENCE};
pub use utterance::{NO, YES};
