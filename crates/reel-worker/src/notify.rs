//! Advisory notifications for pipeline callers.
//!
//! The extractor and the reel loop report skipped segments, adjusted
//! end times, and per-reel failures here. The sink carries
//! human-readable text only; callers must not parse it for control
//! decisions.

use std::sync::Mutex;

use tracing::{error, info, warn};

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A single emitted notification.
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Caller-supplied destination for advisory messages.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, level: NoticeLevel, message: &str);

    fn info(&self, message: &str) {
        self.notify(NoticeLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.notify(NoticeLevel::Warning, message);
    }

    fn error(&self, message: &str) {
        self.notify(NoticeLevel::Error, message);
    }
}

/// Sink that forwards notifications to the tracing subscriber.
#[derive(Debug, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Info => info!("{}", message),
            NoticeLevel::Warning => warn!("{}", message),
            NoticeLevel::Error => error!("{}", message),
        }
    }
}

/// Sink that records notifications in memory, for tests and for callers
/// that render them after the run.
#[derive(Debug, Default)]
pub struct MemorySink {
    notices: Mutex<Vec<Notice>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notices emitted so far, in order.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().expect("sink lock poisoned").clone()
    }

    /// Warning messages only, in order.
    pub fn warnings(&self) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter(|n| n.level == NoticeLevel::Warning)
            .map(|n| n.message)
            .collect()
    }
}

impl NotificationSink for MemorySink {
    fn notify(&self, level: NoticeLevel, message: &str) {
        self.notices.lock().expect("sink lock poisoned").push(Notice {
            level,
            message: message.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_records_in_order() {
        let sink = MemorySink::new();
        sink.info("one");
        sink.warn("two");
        sink.error("three");

        let notices = sink.notices();
        assert_eq!(notices.len(), 3);
        assert_eq!(notices[0].level, NoticeLevel::Info);
        assert_eq!(notices[1].message, "two");
        assert_eq!(sink.warnings(), vec!["two".to_string()]);
    }
}
