//! Persistent WebSocket to the hub's event endpoint
//!
//! Commands go out as text frames. Whatever the hub pushes back is drained
//! by a reader task and only logged.

use futures_util::stream::{SplitSink, StreamExt};
use futures_util::SinkExt;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

use super::HubError;

type WsWriter = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// Destination for encoded command packets
#[allow(async_fn_in_trait)]
pub trait PacketSink {
    /// Send one packet. No acknowledgement is awaited.
    async fn send_packet(&mut self, packet: &str) -> Result<(), HubError>;
}

/// Write half of the hub event socket
pub struct HubSocket {
    writer: Option<WsWriter>,
}

impl HubSocket {
    /// Connect to `ws://{server}/events`
    pub async fn connect(server: &str) -> Result<Self, HubError> {
        let url = events_url(server);
        info!(%url, "WebSocket initialization");

        let (stream, _) = connect_async(url.as_str()).await?;
        let (writer, mut reader) = stream.split();

        info!("WebSocket opened");

        tokio::spawn(async move {
            while let Some(frame) = reader.next().await {
                match frame {
                    Ok(Message::Text(text)) => {
                        debug!(%text, "hub event");
                    }
                    Ok(Message::Close(_)) => {
                        info!("WebSocket closed by hub");
                        break;
                    }
                    Err(e) => {
                        warn!(?e, "WebSocket read error");
                        break;
                    }
                    _ => {}
                }
            }
        });

        Ok(Self {
            writer: Some(writer),
        })
    }

    /// Send a close frame and drop the connection
    pub async fn close(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            if let Err(e) = writer.close().await {
                warn!(?e, "failed to close WebSocket cleanly");
            }
        }
    }
}

impl PacketSink for HubSocket {
    async fn send_packet(&mut self, packet: &str) -> Result<(), HubError> {
        let writer = self.writer.as_mut().ok_or(HubError::Closed)?;

        info!(%packet, "sending packet");
        writer.send(Message::Text(packet.to_string())).await?;
        info!("packet sent");

        Ok(())
    }
}

fn events_url(server: &str) -> String {
    format!("ws://{}/events", server)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_url() {
        assert_eq!(events_url("10.0.0.5"), "ws://10.0.0.5/events");
    }

    #[test]
    fn test_send_after_close_fails() {
        let mut socket = HubSocket { writer: None };
        let result = tokio_test::block_on(socket.send_packet("2 28 1 255"));
        assert!(matches!(result, Err(HubError::Closed)));
    }
}
