use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Warning,
}

/// Transient, advisory message attached to a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NoticeKind,
    pub message: String,
    raised_at: Instant,
}

impl Notification {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            raised_at: Instant::now(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Warning, message)
    }

    pub fn raised_at(&self) -> Instant {
        self.raised_at
    }

    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.duration_since(self.raised_at) >= ttl
    }
}

/// Slot holding at most one notification, cleared after `ttl`.
#[derive(Debug, Clone)]
pub struct NoticeSlot {
    current: Option<Notification>,
    ttl: Duration,
}

impl NoticeSlot {
    pub fn new(ttl: Duration) -> Self {
        Self { current: None, ttl }
    }

    pub fn set(&mut self, n: Notification) {
        self.current = Some(n);
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Current notification, dropping it first if it has expired.
    pub fn active(&mut self, now: Instant) -> Option<&Notification> {
        if self
            .current
            .as_ref()
            .is_some_and(|n| n.is_expired(now, self.ttl))
        {
            self.current = None;
        }
        self.current.as_ref()
    }

    /// Regardless of age.
    pub fn peek(&self) -> Option<&Notification> {
        self.current.as_ref()
    }
}
