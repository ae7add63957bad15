//! Presentation sink: every user-visible line goes through this seam
//! instead of the console, so tests can assert on emitted output.

use serde_json::Value;

use crate::types::ChatMessage;

/// One user-visible output event.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    /// Session status line ("Connected to server.").
    Status(String),
    /// Inbound chat line to display.
    Message(ChatMessage),
    /// Echo of a message this client sent successfully.
    Sent(ChatMessage),
    /// Non-fatal failure the user should see.
    Diagnostic(String),
    /// Catch-all for inbound events with no dedicated handler.
    UnknownEvent { name: String, payload: Value },
}

/// Receives presentation events. Implementations print, render, or record.
pub trait EventSink: Send + Sync {
    fn record(&self, event: SinkEvent);
}
