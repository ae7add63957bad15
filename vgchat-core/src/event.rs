//! Inbound event union: one decode step with field-level defaulting.
//!
//! The transport substrate delivers raw [`TransportSignal`]s; decoding turns
//! them into the closed [`ServerEvent`] union so routing is an exhaustive
//! match instead of string-keyed lookup. Decoding never fails: malformed
//! fields degrade to defaults and unrecognized names land in `Unknown`.

use serde_json::Value;

use crate::clock::Clock;

/// Raw signal from the transport substrate.
#[derive(Debug, Clone)]
pub enum TransportSignal {
    /// The session came up.
    Up,
    /// The session went down.
    Down,
    /// Transport-level error report; does not end the session.
    Fault(String),
    /// A named event with its structured payload.
    Event { name: String, payload: Value },
}

/// Decoded inbound server event.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvent {
    /// A room-wide chat line.
    Chat {
        sender: String,
        text: String,
        time: String,
    },
    Connected,
    Disconnected,
    Fault(String),
    /// Catch-all for event names without a dedicated handler.
    Unknown { name: String, payload: Value },
}

impl ServerEvent {
    /// Decodes one named event. Missing or wrong-shaped fields fall back to
    /// defaults: sender `"Unknown"`, empty text, and the clock's current
    /// wall time.
    pub fn decode(name: &str, payload: Value, clock: &dyn Clock) -> Self {
        match name {
            "chat_message" => {
                let sender = payload
                    .get("username")
                    .and_then(Value::as_str)
                    .unwrap_or("Unknown")
                    .to_string();
                let text = payload
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("")
                    .to_string();
                let time = payload
                    .get("time")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| clock.wall_time());
                Self::Chat { sender, text, time }
            }
            "connect" => Self::Connected,
            "disconnect" => Self::Disconnected,
            "error" => Self::Fault(
                payload
                    .as_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| payload.to_string()),
            ),
            _ => Self::Unknown {
                name: name.to_string(),
                payload,
            },
        }
    }

    /// Maps a raw transport signal onto the event union.
    pub fn from_signal(signal: TransportSignal, clock: &dyn Clock) -> Self {
        match signal {
            TransportSignal::Up => Self::Connected,
            TransportSignal::Down => Self::Disconnected,
            TransportSignal::Fault(detail) => Self::Fault(detail),
            TransportSignal::Event { name, payload } => Self::decode(&name, payload, clock),
        }
    }
}
