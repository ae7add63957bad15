//! In-memory ordered message log with optional persistent backing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{info, warn};
use vgchat_core::{ChatError, ChatMessage, Result};

use crate::models::MessageRow;
use crate::store::HistoryStore;

/// Append-only history of every sent and received message.
///
/// All mutations are serialized behind one lock; `iterate` works on a
/// snapshot so display never blocks appends. Cloning is cheap and shares
/// the same log.
#[derive(Clone)]
pub struct MessageHistory {
    entries: Arc<Mutex<Vec<ChatMessage>>>,
    store: Option<HistoryStore>,
    loaded: Arc<AtomicBool>,
}

impl MessageHistory {
    /// History with no backing store; `load` becomes a marker-only call.
    pub fn in_memory() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            store: None,
            loaded: Arc::new(AtomicBool::new(false)),
        }
    }

    /// History backed by a SQLite store at the given path.
    pub async fn with_store(database_url: &str) -> Result<Self> {
        let store = HistoryStore::new(database_url)
            .await
            .map_err(|e| ChatError::Storage(e.to_string()))?;
        Ok(Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            store: Some(store),
            loaded: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Populates the log from the backing store. A second call is rejected;
    /// the stored prefix must stay ahead of everything appended afterwards.
    pub async fn load(&self) -> Result<()> {
        if self.loaded.swap(true, Ordering::SeqCst) {
            return Err(ChatError::History("history already loaded".to_string()));
        }

        let Some(store) = &self.store else {
            return Ok(());
        };

        let rows = match store.load_all().await {
            Ok(rows) => rows,
            Err(e) => {
                // A failed load must stay retryable.
                self.loaded.store(false, Ordering::SeqCst);
                return Err(ChatError::Storage(e.to_string()));
            }
        };

        let mut restored: Vec<ChatMessage> =
            rows.into_iter().map(MessageRow::into_message).collect();
        info!(count = restored.len(), "Restored message history");

        let mut entries = self.entries.lock().expect("history lock poisoned");
        // Anything appended before load stays, behind the stored prefix.
        restored.append(&mut entries);
        *entries = restored;
        Ok(())
    }

    /// Appends one message at the tail. Never fails outward: a store write
    /// error is logged and the in-memory log still grows.
    pub async fn append(&self, message: ChatMessage) {
        if let Some(store) = &self.store {
            let row = MessageRow::from_message(&message);
            if let Err(e) = store.save(&row).await {
                warn!(error = %e, "Failed to persist message; kept in memory only");
            }
        }
        self.entries
            .lock()
            .expect("history lock poisoned")
            .push(message);
    }

    /// Restartable iterator over a snapshot of the log in insertion order.
    pub fn iterate(&self) -> impl Iterator<Item = ChatMessage> {
        self.entries
            .lock()
            .expect("history lock poisoned")
            .clone()
            .into_iter()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("history lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
