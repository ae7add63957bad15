//! Clock capability so time defaulting is deterministic under test.

use chrono::{DateTime, Local, Utc};

/// Source of the current instant and the wall-clock label used on the wire.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Local wall-clock time as `HH:mm`, the format carried in payloads.
    fn wall_time(&self) -> String {
        self.now().with_timezone(&Local).format("%H:%M").to_string()
    }
}

/// Production clock reading system time.
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
