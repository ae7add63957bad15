//! Console presentation of sink events.

use vgchat_core::{EventSink, SinkEvent};

/// Prints sink events to the terminal the way the interactive client
/// shows them; diagnostics go to stderr.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl EventSink for ConsoleSink {
    fn record(&self, event: SinkEvent) {
        match event {
            SinkEvent::Status(line) => println!("{line}"),
            SinkEvent::Message(message) => println!("{message}"),
            SinkEvent::Sent(message) => match message.recipient() {
                Some(recipient) => println!("(DM to {recipient}) {}", message.text),
                None => println!("You: {}", message.text),
            },
            SinkEvent::Diagnostic(line) => eprintln!("{line}"),
            SinkEvent::UnknownEvent { name, payload } => println!("[{name}] {payload}"),
        }
    }
}
