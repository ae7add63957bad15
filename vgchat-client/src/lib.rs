//! # vgchat-client
//!
//! Session core of the chat client: [`ConnectionManager`] owns the
//! transport session and routes inbound events into history and the
//! presentation sink; [`CommandHandler`] dispatches slash-commands for the
//! interactive input loop.

mod commands;
mod config;
mod connection;
mod console;

pub use commands::{CommandHandler, CommandOutcome};
pub use config::ChatConfig;
pub use connection::{ConnectionManager, ConnectionState};
pub use console::ConsoleSink;
