//! SQLite-backed message log: pool setup, schema, append and load-all.
//!
//! Insertion order is the contract: rows carry a monotonically increasing
//! `seq` and are always read back `ORDER BY seq`.

use sqlx::{sqlite::SqliteConnectOptions, SqlitePool};
use tracing::info;

use crate::models::MessageRow;

/// Append-only store over a single SQLite pool; creates the database file
/// if missing. No eviction and no size bound.
#[derive(Clone)]
pub struct HistoryStore {
    pool: SqlitePool,
}

impl HistoryStore {
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        info!("Initializing SQLite history store: {}", database_url);

        let options = SqliteConnectOptions::new()
            .create_if_missing(true)
            .filename(database_url);

        let pool = SqlitePool::connect_with(options).await?;
        let store = Self { pool };
        store.init().await?;
        Ok(store)
    }

    async fn init(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS messages (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL,
                sender TEXT NOT NULL,
                recipient TEXT,
                content TEXT NOT NULL,
                is_private INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Appends one row at the tail.
    pub async fn save(&self, row: &MessageRow) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO messages (id, sender, recipient, content, is_private, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&row.id)
        .bind(&row.sender)
        .bind(&row.recipient)
        .bind(&row.content)
        .bind(row.is_private)
        .bind(row.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// All rows in insertion order.
    pub async fn load_all(&self) -> Result<Vec<MessageRow>, sqlx::Error> {
        let rows = sqlx::query_as::<_, MessageRow>(
            "SELECT id, sender, recipient, content, is_private, created_at \
             FROM messages ORDER BY seq ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        info!("Loaded {} stored messages", rows.len());
        Ok(rows)
    }
}
