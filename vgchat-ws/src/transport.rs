//! WebSocket session: connect with an explicit websocket upgrade (no
//! fallback transport), pump inbound frames into the signal feed, and
//! write outbound frames from a queue.
//!
//! Frames are JSON text in both directions: `{"event": <name>, "data": ...}`.

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::{mpsc, Mutex};
use tokio_tungstenite::tungstenite;
use tracing::{debug, info, warn};
use vgchat_core::{ChatError, Result, Transport, TransportSignal};

/// Service path the chat server mounts the websocket on.
pub const SERVICE_PATH: &str = "/sys25d";

const SIGNAL_BUFFER: usize = 64;
const OUTBOUND_BUFFER: usize = 64;

#[derive(Debug, Serialize, Deserialize)]
struct WireFrame {
    event: String,
    #[serde(default)]
    data: Value,
}

/// WebSocket-backed [`Transport`]. Built together with the receiver half
/// of its inbound signal feed.
pub struct WsTransport {
    endpoint: String,
    signals: mpsc::Sender<TransportSignal>,
    outbound: Mutex<Option<mpsc::Sender<tungstenite::Message>>>,
}

impl WsTransport {
    /// Builds a transport for the given server URL (e.g. `ws://host:3000`)
    /// and returns the inbound signal feed alongside it.
    pub fn new(server_url: &str) -> (Self, mpsc::Receiver<TransportSignal>) {
        let (signals, receiver) = mpsc::channel(SIGNAL_BUFFER);
        let endpoint = format!("{}{}", server_url.trim_end_matches('/'), SERVICE_PATH);
        (
            Self {
                endpoint,
                signals,
                outbound: Mutex::new(None),
            },
            receiver,
        )
    }

    /// Full URL the session connects to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for WsTransport {
    async fn connect(&self) -> Result<()> {
        let (stream, _) = tokio_tungstenite::connect_async(self.endpoint.as_str())
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;
        info!(endpoint = %self.endpoint, "WebSocket connected");

        let (mut write, mut read) = stream.split();

        let (out_tx, mut out_rx) = mpsc::channel::<tungstenite::Message>(OUTBOUND_BUFFER);
        *self.outbound.lock().await = Some(out_tx);

        tokio::spawn(async move {
            while let Some(frame) = out_rx.recv().await {
                if let Err(e) = write.send(frame).await {
                    warn!(error = %e, "WebSocket send failed");
                    break;
                }
            }
            let _ = write.close().await;
        });

        let signals = self.signals.clone();
        tokio::spawn(async move {
            while let Some(frame) = read.next().await {
                match frame {
                    Ok(tungstenite::Message::Text(text)) => {
                        match serde_json::from_str::<WireFrame>(&text) {
                            Ok(frame) => {
                                let _ = signals
                                    .send(TransportSignal::Event {
                                        name: frame.event,
                                        payload: frame.data,
                                    })
                                    .await;
                            }
                            Err(e) => debug!(error = %e, "Skipping unparseable frame"),
                        }
                    }
                    Ok(tungstenite::Message::Close(_)) => break,
                    Ok(_) => {}
                    Err(e) => {
                        let _ = signals.send(TransportSignal::Fault(e.to_string())).await;
                        break;
                    }
                }
            }
            let _ = signals.send(TransportSignal::Down).await;
        });

        let _ = self.signals.send(TransportSignal::Up).await;
        Ok(())
    }

    async fn emit(&self, event: &str, payload: Value) -> Result<()> {
        let frame = WireFrame {
            event: event.to_string(),
            data: payload,
        };
        let json =
            serde_json::to_string(&frame).map_err(|e| ChatError::Transport(e.to_string()))?;

        let guard = self.outbound.lock().await;
        let sender = guard
            .as_ref()
            .ok_or_else(|| ChatError::Transport("not connected".to_string()))?;
        sender
            .send(tungstenite::Message::Text(json))
            .await
            .map_err(|_| ChatError::Transport("connection closed".to_string()))
    }

    async fn disconnect(&self) -> Result<()> {
        let mut guard = self.outbound.lock().await;
        if let Some(sender) = guard.take() {
            // Dropping the queue ends the write task, which closes the socket.
            let _ = sender.send(tungstenite::Message::Close(None)).await;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoint_appends_service_path() {
        let (transport, _signals) = WsTransport::new("ws://localhost:3000");
        assert_eq!(transport.endpoint(), "ws://localhost:3000/sys25d");

        let (transport, _signals) = WsTransport::new("ws://localhost:3000/");
        assert_eq!(transport.endpoint(), "ws://localhost:3000/sys25d");
    }

    #[tokio::test]
    async fn test_emit_before_connect_fails_fast() {
        let (transport, _signals) = WsTransport::new("ws://localhost:3000");
        let result = transport.emit("chat_message", json!({})).await;
        assert!(matches!(result, Err(ChatError::Transport(_))));
    }

    #[tokio::test]
    async fn test_disconnect_without_connect_is_harmless() {
        let (transport, _signals) = WsTransport::new("ws://localhost:3000");
        transport.disconnect().await.expect("disconnect");
        transport.disconnect().await.expect("second disconnect");
    }

    #[test]
    fn test_wire_frame_decodes_without_data() {
        let frame: WireFrame = serde_json::from_str(r#"{"event":"ping"}"#).expect("decode");
        assert_eq!(frame.event, "ping");
        assert_eq!(frame.data, Value::Null);
    }
}
