//! Persisted row model for the message log.
//!
//! Maps to the `messages` table and converts to and from the core
//! [`ChatMessage`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vgchat_core::ChatMessage;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MessageRow {
    pub id: String,
    pub sender: String,
    pub recipient: Option<String>,
    pub content: String,
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
}

impl MessageRow {
    /// Builds a row with a generated UUID from a history entry.
    pub fn from_message(message: &ChatMessage) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sender: message.sender.clone(),
            recipient: message.recipient().map(str::to_string),
            content: message.text.clone(),
            is_private: message.is_private(),
            created_at: message.timestamp,
        }
    }

    /// Restores the history entry. A private row without a recipient is a
    /// corrupt combination; it degrades to a broadcast rather than failing
    /// the whole load.
    pub fn into_message(self) -> ChatMessage {
        match (self.is_private, self.recipient) {
            (true, Some(recipient)) => {
                ChatMessage::direct(self.sender, recipient, self.content, self.created_at)
            }
            _ => ChatMessage::broadcast(self.sender, self.content, self.created_at),
        }
    }
}
