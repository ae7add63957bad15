//! Outbound payload builders for the wire contract.

use serde_json::{json, Value};

/// Presence announcement sent once after connecting.
pub fn join(username: &str) -> Value {
    json!({ "username": username })
}

/// Room-wide chat message. `time` is the local `HH:mm` label.
pub fn chat_message(username: &str, message: &str, time: &str) -> Value {
    json!({ "username": username, "message": message, "time": time })
}

/// Direct message addressed to one recipient.
pub fn private_message(from: &str, to: &str, message: &str, time: &str) -> Value {
    json!({ "from": from, "to": to, "message": message, "time": time })
}
