//! Slash-command routing for the interactive input loop.
//!
//! The input loop hands every `/`-prefixed line here; plain lines go to
//! [`ConnectionManager::send_broadcast`] directly. Unrecognized commands
//! are reported through the sink and never fatal.

use std::sync::Arc;

use tracing::info;
use vgchat_core::{EventSink, SinkEvent};
use vgchat_storage::MessageHistory;

use crate::connection::ConnectionManager;

const USAGE: &str = "Commands:\n  \
    /help              show this message\n  \
    /quit              leave the chat and exit\n  \
    /dm <user> <text>  send a direct message\n  \
    /history           replay stored messages";

/// What the input loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Continue,
    Quit,
}

/// Dispatches command lines to the connection and history.
pub struct CommandHandler {
    connection: Arc<ConnectionManager>,
    history: MessageHistory,
    sink: Arc<dyn EventSink>,
}

impl CommandHandler {
    pub fn new(
        connection: Arc<ConnectionManager>,
        history: MessageHistory,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            connection,
            history,
            sink,
        }
    }

    /// Handles one command line and reports whether the loop should keep
    /// running.
    pub async fn handle(&self, input: &str) -> CommandOutcome {
        let input = input.trim();
        let (command, rest) = match input.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (input, ""),
        };

        match command {
            "/help" => self.sink.record(SinkEvent::Status(USAGE.to_string())),
            "/quit" => {
                self.connection.disconnect().await;
                return CommandOutcome::Quit;
            }
            "/dm" => match rest.split_once(char::is_whitespace) {
                Some((recipient, text)) => self.connection.send_direct(recipient, text).await,
                None => self
                    .sink
                    .record(SinkEvent::Diagnostic("Usage: /dm <user> <text>".to_string())),
            },
            "/history" => {
                for message in self.history.iterate() {
                    self.sink.record(SinkEvent::Message(message));
                }
            }
            other => {
                info!(command = other, "Unrecognized command");
                self.sink.record(SinkEvent::Diagnostic(format!(
                    "Unknown command: {other}. Type /help for commands."
                )));
            }
        }

        CommandOutcome::Continue
    }
}
