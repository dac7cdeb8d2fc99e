//! Message log for transformation runs.

use serde::Serialize;

/// Kind of a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub kind: MessageKind,
    pub message: String,
    pub details: Option<String>,
    /// Local wall-clock time, `HH:MM:SS`
    pub timestamp: String,
}

/// Append-only list of user-facing messages. Entries are mirrored to `log`.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    entries: Vec<LogEntry>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: MessageKind, message: impl Into<String>, details: Option<String>) {
        let message = message.into();
        match kind {
            MessageKind::Error => log::error!("{}", message),
            MessageKind::Info | MessageKind::Success => log::info!("{}", message),
        }

        self.entries.push(LogEntry {
            kind,
            message,
            details,
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
        });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(MessageKind::Info, message, None);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(MessageKind::Success, message, None);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(MessageKind::Error, message, None);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn error_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.kind == MessageKind::Error)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
