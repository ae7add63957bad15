//! Integration tests for [`vgchat_client::CommandHandler`].
//!
//! Exercises the slash-command contract the input loop relies on: help,
//! quit, direct messages, history replay, and unrecognized commands.

mod mock_transport;

use std::sync::Arc;

use mock_transport::{FixedClock, MockTransport, RecordingSink};
use vgchat_client::{CommandHandler, CommandOutcome, ConnectionManager, ConnectionState};
use vgchat_core::SinkEvent;
use vgchat_storage::MessageHistory;

fn handler_for(
    username: &str,
) -> (
    CommandHandler,
    Arc<ConnectionManager>,
    Arc<MockTransport>,
    Arc<RecordingSink>,
    MessageHistory,
) {
    let transport = MockTransport::new();
    let sink = RecordingSink::new();
    let history = MessageHistory::in_memory();
    let manager = Arc::new(
        ConnectionManager::new(
            username,
            transport.clone(),
            history.clone(),
            sink.clone(),
            FixedClock::new(),
        )
        .expect("valid username"),
    );
    let handler = CommandHandler::new(manager.clone(), history.clone(), sink.clone());
    (handler, manager, transport, sink, history)
}

/// **Test: /help prints usage.**
///
/// **Expected:** Continue outcome; a status line mentioning /dm.
#[tokio::test]
async fn test_help_prints_usage() {
    let (handler, _manager, _transport, sink, _history) = handler_for("alice");

    let outcome = handler.handle("/help").await;

    assert_eq!(outcome, CommandOutcome::Continue);
    assert!(sink.statuses().iter().any(|line| line.contains("/dm")));
}

/// **Test: /quit disconnects and asks the loop to stop.**
///
/// **Expected:** Quit outcome, transport disconnected, terminal state.
#[tokio::test]
async fn test_quit_disconnects() {
    let (handler, manager, transport, _sink, _history) = handler_for("alice");

    let outcome = handler.handle("/quit").await;

    assert_eq!(outcome, CommandOutcome::Quit);
    assert_eq!(transport.disconnect_calls(), 1);
    assert_eq!(manager.state(), ConnectionState::Disconnected);
}

/// **Test: /dm routes recipient and text to send_direct.**
///
/// **Expected:** One private_message emit; a private history entry.
#[tokio::test]
async fn test_dm_routes_to_send_direct() {
    let (handler, _manager, transport, _sink, history) = handler_for("alice");

    let outcome = handler.handle("/dm bob hello there").await;

    assert_eq!(outcome, CommandOutcome::Continue);
    let emitted = transport.emitted();
    assert_eq!(emitted.len(), 1);
    assert_eq!(emitted[0].0, "private_message");

    let messages: Vec<_> = history.iterate().collect();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].recipient(), Some("bob"));
    assert_eq!(messages[0].text, "hello there");
}

/// **Test: /dm without text reports usage instead of sending.**
///
/// **Expected:** Diagnostic recorded; nothing emitted or appended.
#[tokio::test]
async fn test_dm_missing_text_reports_usage() {
    let (handler, _manager, transport, sink, history) = handler_for("alice");

    handler.handle("/dm bob").await;

    assert!(transport.emitted().is_empty());
    assert!(history.is_empty());
    assert!(sink
        .diagnostics()
        .iter()
        .any(|line| line.contains("/dm <user> <text>")));
}

/// **Test: /history replays every stored message in order.**
///
/// **Setup:** Two broadcasts already in history.
/// **Expected:** The sink receives both as Message events, oldest first.
#[tokio::test]
async fn test_history_replays_in_order() {
    let (handler, manager, _transport, sink, _history) = handler_for("alice");
    manager.send_broadcast("first").await;
    manager.send_broadcast("second").await;

    handler.handle("/history").await;

    let replayed: Vec<String> = sink
        .events()
        .into_iter()
        .filter_map(|event| match event {
            SinkEvent::Message(message) => Some(message.text),
            _ => None,
        })
        .collect();
    assert_eq!(replayed, vec!["first", "second"]);
}

/// **Test: Unrecognized commands are reported and non-fatal.**
///
/// **Expected:** Continue outcome with a user-visible diagnostic.
#[tokio::test]
async fn test_unknown_command_is_nonfatal() {
    let (handler, _manager, transport, sink, _history) = handler_for("alice");

    let outcome = handler.handle("/frobnicate now").await;

    assert_eq!(outcome, CommandOutcome::Continue);
    assert!(transport.emitted().is_empty());
    assert!(sink
        .diagnostics()
        .iter()
        .any(|line| line.contains("/frobnicate")));
}
