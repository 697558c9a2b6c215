use std::collections::VecDeque;
use std::fmt;

use chrono::{DateTime, Local};

const DEFAULT_CAPACITY: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MessageLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for MessageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Debug => "DEBU",
            Self::Info => "INFO",
            Self::Warning => "WARN",
            Self::Error => "ERRO",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone)]
pub struct ActivityEntry {
    pub level: MessageLevel,
    pub message: String,
    pub at: DateTime<Local>,
}

/// Bounded list of operator-facing messages, oldest first.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    entries: VecDeque<ActivityEntry>,
    capacity: usize,
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl ActivityLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, level: MessageLevel, message: impl Into<String>) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(ActivityEntry {
            level,
            message: message.into(),
            at: Local::now(),
        });
    }

    pub fn debug(&mut self, message: impl Into<String>) {
        self.push(MessageLevel::Debug, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(MessageLevel::Info, message);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(MessageLevel::Warning, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(MessageLevel::Error, message);
    }

    /// Entries at or above `min`, oldest first.
    pub fn visible(&self, min: MessageLevel) -> impl Iterator<Item = &ActivityEntry> {
        self.entries.iter().filter(move |e| e.level >= min)
    }

    pub fn last(&self) -> Option<&ActivityEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
