use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

use crate::shared::error::ClientError;

/// How long a toast stays on screen.
pub const DEFAULT_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoticeLevel::Success => write!(f, "OK"),
            NoticeLevel::Info => write!(f, "INFO"),
            NoticeLevel::Error => write!(f, "ERROR"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub created_at: Instant,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}

/// Toast queue. Oldest notices drop off once `capacity` is reached and
/// every notice expires after `ttl`.
#[derive(Debug)]
pub struct Notifications {
    entries: VecDeque<Notice>,
    capacity: usize,
    ttl: Duration,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(5, DEFAULT_TTL)
    }
}

impl Notifications {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            ttl,
        }
    }

    pub fn push(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.push_at(level, message, Instant::now());
    }

    fn push_at(&mut self, level: NoticeLevel, message: impl Into<String>, now: Instant) {
        let notice = Notice {
            level,
            message: message.into(),
            created_at: now,
        };
        tracing::debug!("notice {}", notice);

        self.entries.push_back(notice);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Success, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Info, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Error, message);
    }

    /// Toast an error with its user-facing text, or `fallback` when the
    /// error carries nothing worth showing.
    pub fn client_error(&mut self, error: &ClientError, fallback: &str) {
        let message = match error {
            ClientError::Network { .. } | ClientError::Decode { .. } => fallback.to_string(),
            other => {
                let text = other.user_message();
                if text.is_empty() {
                    fallback.to_string()
                } else {
                    text
                }
            }
        };
        self.error(message);
    }

    /// Drop everything older than the TTL.
    pub fn expire(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.entries
            .retain(|notice| now.saturating_duration_since(notice.created_at) < ttl);
    }

    pub fn visible(&self) -> impl Iterator<Item = &Notice> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
