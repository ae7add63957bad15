//! Core types: user identity and the chat message model.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// User identity for one session; immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub username: String,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

/// Whether a message went to the whole room or to a single recipient.
///
/// A direct message always carries its recipient, so `private implies
/// recipient present` holds by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    Broadcast,
    Direct { recipient: String },
}

/// One chat line, locally sent or remotely received. Immutable after
/// construction; the timestamp is set when the line enters history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub kind: MessageKind,
}

impl ChatMessage {
    /// Creates a room-wide message.
    pub fn broadcast(
        sender: impl Into<String>,
        text: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
            timestamp,
            kind: MessageKind::Broadcast,
        }
    }

    /// Creates a direct message addressed to one recipient.
    pub fn direct(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        text: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
            timestamp,
            kind: MessageKind::Direct {
                recipient: recipient.into(),
            },
        }
    }

    pub fn is_private(&self) -> bool {
        matches!(self.kind, MessageKind::Direct { .. })
    }

    pub fn recipient(&self) -> Option<&str> {
        match &self.kind {
            MessageKind::Direct { recipient } => Some(recipient),
            MessageKind::Broadcast => None,
        }
    }
}

impl fmt::Display for ChatMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let time = self.timestamp.with_timezone(&Local).format("%H:%M");
        match &self.kind {
            MessageKind::Direct { recipient } => {
                write!(f, "[{}] (DM to {}) {}: {}", time, recipient, self.sender, self.text)
            }
            MessageKind::Broadcast => write!(f, "[{}] {}: {}", time, self.sender, self.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn fixed_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 4, 12, 34, 56).unwrap()
    }

    #[test]
    fn test_broadcast_has_no_recipient() {
        let msg = ChatMessage::broadcast("alice", "hi", fixed_instant());
        assert!(!msg.is_private());
        assert_eq!(msg.recipient(), None);
    }

    #[test]
    fn test_direct_carries_recipient() {
        let msg = ChatMessage::direct("alice", "bob", "psst", fixed_instant());
        assert!(msg.is_private());
        assert_eq!(msg.recipient(), Some("bob"));
    }

    #[test]
    fn test_display_broadcast() {
        let msg = ChatMessage::broadcast("alice", "hi", fixed_instant());
        let time = fixed_instant().with_timezone(&Local).format("%H:%M");
        assert_eq!(msg.to_string(), format!("[{}] alice: hi", time));
    }

    #[test]
    fn test_display_direct() {
        let msg = ChatMessage::direct("alice", "bob", "psst", fixed_instant());
        let time = fixed_instant().with_timezone(&Local).format("%H:%M");
        assert_eq!(msg.to_string(), format!("[{}] (DM to bob) alice: psst", time));
    }
}
