//! Speech input and output
//!
//! Recognition events come from a grammar-constrained front-end; spoken
//! feedback goes through a [`Speaker`].

mod grammar;
mod listener;
mod voice;

pub use grammar::Grammar;
pub use listener::{ConsoleListener, RecognitionEvent};
pub use voice::{Speaker, VoiceOutput};
