//! # vgchat-ws
//!
//! WebSocket implementation of the core [`Transport`](vgchat_core::Transport)
//! trait: fixed service path, explicit websocket upgrade, JSON text frames.

mod transport;

pub use transport::{WsTransport, SERVICE_PATH};
