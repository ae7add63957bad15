//! Transport abstraction over the real-time messaging substrate.
//!
//! The trait is substrate-agnostic; vgchat-ws implements it over WebSocket
//! and tests substitute in-memory mocks. Inbound traffic arrives separately
//! as a feed of [`TransportSignal`](crate::event::TransportSignal)s.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// One logical session to the chat server: connect, send named events,
/// tear down. Every operation is a single attempt with no retry.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Establishes the session. Resolves once the substrate is usable.
    async fn connect(&self) -> Result<()>;

    /// Sends one named event with a structured payload.
    async fn emit(&self, event: &str, payload: Value) -> Result<()>;

    /// Tears the session down. Safe to call when not connected.
    async fn disconnect(&self) -> Result<()>;
}
