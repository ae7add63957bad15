//! # vgchat-core
//!
//! Core types and seams for the chat client: the message model, the inbound
//! event union, the [`Transport`] abstraction over the messaging substrate,
//! [`Clock`] and [`EventSink`] capabilities, the error taxonomy, and tracing
//! initialization. Transport-agnostic; used by vgchat-ws and vgchat-client.

pub mod clock;
pub mod error;
pub mod event;
pub mod logger;
pub mod payload;
pub mod sink;
pub mod transport;
pub mod types;

pub use clock::{Clock, SystemClock};
pub use error::{ChatError, Result};
pub use event::{ServerEvent, TransportSignal};
pub use logger::init_tracing;
pub use sink::{EventSink, SinkEvent};
pub use transport::Transport;
pub use types::{ChatMessage, MessageKind, User};
