use chrono::{DateTime, Utc};

use crate::event::events::{ConsoleKind, SandboxMessage};

#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleEntry {
    pub kind: ConsoleKind,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Append-only log of a preview session's document errors.
#[derive(Debug, Clone, Default)]
pub struct ConsoleLog {
    entries: Vec<ConsoleEntry>,
}

impl ConsoleLog {
    pub fn push(&mut self, message: SandboxMessage) {
        self.entries.push(ConsoleEntry {
            kind: message.kind,
            message: message.message,
            timestamp: Utc::now(),
        });
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[ConsoleEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
