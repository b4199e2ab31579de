//! HomeCenter hub access
//!
//! Login and control-panel retrieval over HTTP, the event WebSocket used
//! to push commands, and the wire packet format.

mod client;
pub mod packet;
mod socket;

use thiserror::Error;

pub use client::HubClient;
pub use socket::{HubSocket, PacketSink};

/// Errors talking to the hub
#[derive(Debug, Error)]
pub enum HubError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("hub socket is closed")]
    Closed,
}
