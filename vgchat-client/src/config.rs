//! Client configuration from environment variables: server URL, optional
//! history database, and log file path.

use anyhow::Result;
use std::env;

pub struct ChatConfig {
    pub server_url: String,
    pub history_db: Option<String>,
    pub log_file: String,
}

impl ChatConfig {
    /// Loads from the environment: CHAT_SERVER_URL required (unless
    /// overridden), CHAT_HISTORY_DB and LOG_FILE optional.
    pub fn from_env(server_override: Option<String>) -> Result<Self> {
        let server_url = match server_override {
            Some(url) => url,
            None => env::var("CHAT_SERVER_URL")
                .map_err(|_| anyhow::anyhow!("CHAT_SERVER_URL not set"))?,
        };
        let history_db = env::var("CHAT_HISTORY_DB").ok();
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/vgchat.log".to_string());
        Ok(Self {
            server_url,
            history_db,
            log_file,
        })
    }

    /// Constructs with the given server URL and defaults for the rest.
    pub fn with_server(server_url: String) -> Self {
        Self {
            server_url,
            history_db: None,
            log_file: "logs/vgchat.log".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_server() {
        let config = ChatConfig::with_server("ws://localhost:3000".to_string());
        assert_eq!(config.server_url, "ws://localhost:3000");
        assert!(config.history_db.is_none());
        assert_eq!(config.log_file, "logs/vgchat.log");
    }

    #[test]
    fn test_override_beats_env() {
        let config = ChatConfig::from_env(Some("ws://example:9000".to_string()))
            .expect("override provided");
        assert_eq!(config.server_url, "ws://example:9000");
    }
}
