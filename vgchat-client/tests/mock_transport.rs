//! Test doubles for the connection seams: transport, sink, and clock.
//!
//! - `MockTransport` records emitted events and can be forced to fail
//!   connect or send, so tests cover both transmission outcomes.
//! - `RecordingSink` stores every presentation event for assertions.
//! - `FixedClock` pins the instant and the wall-time label.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use vgchat_core::{ChatError, Clock, EventSink, Result, SinkEvent, Transport};

/// In-memory transport that records every emit.
#[derive(Default)]
pub struct MockTransport {
    emitted: Mutex<Vec<(String, Value)>>,
    fail_connect: AtomicBool,
    fail_send: AtomicBool,
    disconnect_calls: AtomicUsize,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn emitted(&self) -> Vec<(String, Value)> {
        self.emitted.lock().unwrap().clone()
    }

    pub fn set_fail_connect(&self, fail: bool) {
        self.fail_connect.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_send(&self, fail: bool) {
        self.fail_send.store(fail, Ordering::SeqCst);
    }

    pub fn disconnect_calls(&self) -> usize {
        self.disconnect_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn connect(&self) -> Result<()> {
        if self.fail_connect.load(Ordering::SeqCst) {
            return Err(ChatError::Transport("connect refused".to_string()));
        }
        Ok(())
    }

    async fn emit(&self, event: &str, payload: Value) -> Result<()> {
        if self.fail_send.load(Ordering::SeqCst) {
            return Err(ChatError::Transport("send refused".to_string()));
        }
        self.emitted
            .lock()
            .unwrap()
            .push((event.to_string(), payload));
        Ok(())
    }

    async fn disconnect(&self) -> Result<()> {
        self.disconnect_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Sink that keeps every recorded event.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<SinkEvent>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn diagnostics(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                SinkEvent::Diagnostic(line) => Some(line),
                _ => None,
            })
            .collect()
    }

    pub fn statuses(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                SinkEvent::Status(line) => Some(line),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn record(&self, event: SinkEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Clock pinned to 2024-05-04 12:34 UTC with wall time "12:34".
pub struct FixedClock;

impl FixedClock {
    pub fn new() -> Arc<Self> {
        Arc::new(Self)
    }

    pub fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 4, 12, 34, 0).unwrap()
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        Self::instant()
    }

    fn wall_time(&self) -> String {
        "12:34".to_string()
    }
}
