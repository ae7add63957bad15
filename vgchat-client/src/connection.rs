//! Connection lifecycle and inbound event routing.
//!
//! One [`ConnectionManager`] owns one logical session. Sends are
//! fire-and-forget: a transport failure is logged and surfaced as a
//! diagnostic, never raised, and a locally sent message always lands in
//! history whether or not transmission succeeded.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tracing::{info, warn};
use vgchat_core::{
    payload, ChatError, ChatMessage, Clock, EventSink, Result, ServerEvent, SinkEvent, Transport,
    TransportSignal,
};
use vgchat_storage::MessageHistory;

/// Session state as seen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

/// Owns the transport session: connect/disconnect, broadcast and direct
/// sends, and routing of decoded inbound events.
pub struct ConnectionManager {
    username: String,
    transport: Arc<dyn Transport>,
    history: MessageHistory,
    sink: Arc<dyn EventSink>,
    clock: Arc<dyn Clock>,
    state: Mutex<ConnectionState>,
}

impl ConnectionManager {
    /// Creates a manager for the given user. A blank username is the one
    /// construction-time error; nothing on the transport path ever raises.
    pub fn new(
        username: impl Into<String>,
        transport: Arc<dyn Transport>,
        history: MessageHistory,
        sink: Arc<dyn EventSink>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(ChatError::InvalidArgument(
                "username must not be blank".to_string(),
            ));
        }
        Ok(Self {
            username,
            transport,
            history,
            sink,
            clock,
            state: Mutex::new(ConnectionState::Disconnected),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn state(&self) -> ConnectionState {
        *self.state.lock().expect("state lock poisoned")
    }

    fn set_state(&self, next: ConnectionState) {
        *self.state.lock().expect("state lock poisoned") = next;
    }

    /// Establishes the session and announces presence once connected.
    /// A transport failure is logged and leaves the session Disconnected
    /// but usable: later sends fail fast on their own.
    pub async fn connect(&self) {
        self.set_state(ConnectionState::Connecting);
        info!(username = %self.username, "Connecting...");

        match self.transport.connect().await {
            Ok(()) => {
                self.set_state(ConnectionState::Connected);
                self.sink
                    .record(SinkEvent::Status("Connected to server.".to_string()));
                let _ = self.send("join", payload::join(&self.username)).await;
            }
            Err(e) => {
                warn!(error = %e, "Connect failed");
                self.sink
                    .record(SinkEvent::Diagnostic(format!("Connect failed: {e}")));
                self.set_state(ConnectionState::Disconnected);
            }
        }
    }

    /// Single transmission attempt; no retry, no queue. The result may be
    /// ignored — a failure has already been logged and surfaced as a
    /// diagnostic by the time this returns.
    pub async fn send(&self, event: &str, payload: serde_json::Value) -> Result<()> {
        if let Err(e) = self.transport.emit(event, payload).await {
            warn!(event, error = %e, "Send failed");
            self.sink
                .record(SinkEvent::Diagnostic(format!("Error sending {event}: {e}")));
            return Err(e);
        }
        Ok(())
    }

    /// Sends a room-wide message. Whitespace-only text is a silent no-op.
    /// The message is appended to history even when transmission failed.
    pub async fn send_broadcast(&self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }

        let wire = payload::chat_message(&self.username, text, &self.clock.wall_time());
        let message = ChatMessage::broadcast(self.username.clone(), text, self.clock.now());

        if self.send("chat_message", wire).await.is_ok() {
            self.sink.record(SinkEvent::Sent(message.clone()));
        }
        self.history.append(message).await;
    }

    /// Sends a direct message. A blank recipient or text is a silent no-op;
    /// otherwise exactly one private entry lands in history.
    pub async fn send_direct(&self, recipient: &str, text: &str) {
        let recipient = recipient.trim();
        let text = text.trim();
        if recipient.is_empty() || text.is_empty() {
            return;
        }

        let wire = payload::private_message(&self.username, recipient, text, &self.clock.wall_time());
        let message =
            ChatMessage::direct(self.username.clone(), recipient, text, self.clock.now());

        if self.send("private_message", wire).await.is_ok() {
            self.sink.record(SinkEvent::Sent(message.clone()));
        }
        self.history.append(message).await;
    }

    /// Routes one inbound signal. Malformed payloads degrade to defaults,
    /// unknown names go to the catch-all; nothing here panics or raises.
    pub async fn handle_signal(&self, signal: TransportSignal) {
        match ServerEvent::from_signal(signal, self.clock.as_ref()) {
            ServerEvent::Chat { sender, text, time } => {
                info!(sender = %sender, time = %time, "Received chat message");
                let message = ChatMessage::broadcast(sender, text, self.clock.now());
                self.sink.record(SinkEvent::Message(message.clone()));
                self.history.append(message).await;
            }
            ServerEvent::Connected => {
                info!("Transport session is up");
            }
            ServerEvent::Disconnected => {
                info!("Transport session is down");
                self.sink
                    .record(SinkEvent::Status("Disconnected from server.".to_string()));
            }
            ServerEvent::Fault(detail) => {
                warn!(detail = %detail, "Transport error signal");
                self.sink
                    .record(SinkEvent::Diagnostic(format!("Transport error: {detail}")));
            }
            ServerEvent::Unknown { name, payload } => {
                info!(event = %name, "Unhandled event");
                self.sink.record(SinkEvent::UnknownEvent { name, payload });
            }
        }
    }

    /// Consumes transport signals until the feed closes.
    pub async fn run(&self, mut signals: mpsc::Receiver<TransportSignal>) {
        while let Some(signal) = signals.recv().await {
            self.handle_signal(signal).await;
        }
        info!("Signal feed closed");
    }

    /// Tears the session down. Callable from any state and repeatable;
    /// transport errors are swallowed and the farewell is always recorded.
    pub async fn disconnect(&self) {
        if let Err(e) = self.transport.disconnect().await {
            warn!(error = %e, "Disconnect reported an error");
        }
        self.set_state(ConnectionState::Disconnected);
        self.sink
            .record(SinkEvent::Status("You have left the chat.".to_string()));
    }
}
