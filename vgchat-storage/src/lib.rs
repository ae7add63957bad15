//! # vgchat-storage
//!
//! Append-only message history: an ordered in-memory log with an optional
//! SQLite backing store loaded once at startup and appended to incrementally.

mod history;
mod models;
mod store;

pub use history::MessageHistory;
pub use models::MessageRow;
pub use store::HistoryStore;
