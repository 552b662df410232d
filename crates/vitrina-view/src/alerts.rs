//! Transient alerts raised by view operations.

use std::time::{Duration, Instant};

use serde::Serialize;

// ---------------------------------------------------------------------------
// AlertLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Success,
    Warning,
    Error,
}

impl AlertLevel {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Alert
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
    #[serde(skip)]
    raised_at: Instant,
}

impl Alert {
    #[must_use]
    pub fn expired(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.raised_at) >= ttl
    }
}

/// Alerts that dismiss themselves once `ttl` has elapsed.
#[derive(Debug, Clone)]
pub struct Alerts {
    items: Vec<Alert>,
    ttl: Duration,
}

impl Default for Alerts {
    fn default() -> Self {
        Self::new(Duration::from_millis(3_000))
    }
}

impl Alerts {
    #[must_use]
    pub const fn new(ttl: Duration) -> Self {
        Self {
            items: Vec::new(),
            ttl,
        }
    }

    pub fn push(&mut self, level: AlertLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            AlertLevel::Error => tracing::debug!(%message, "alert raised"),
            AlertLevel::Success | AlertLevel::Warning => tracing::trace!(%message, "alert raised"),
        }
        self.items.push(Alert {
            level,
            message,
            raised_at: Instant::now(),
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(AlertLevel::Success, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(AlertLevel::Warning, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(AlertLevel::Error, message);
    }

    /// Alerts still visible at `now`; expired ones are dropped.
    pub fn active_at(&mut self, now: Instant) -> &[Alert] {
        let ttl = self.ttl;
        self.items.retain(|alert| !alert.expired(ttl, now));
        &self.items
    }

    pub fn active(&mut self) -> &[Alert] {
        self.active_at(Instant::now())
    }

    /// Take every pending alert, expired or not, leaving none behind.
    ///
    /// Callers that print once per command use this so an alert raised before
    /// a slow request is still shown.
    pub fn drain(&mut self) -> Vec<Alert> {
        std::mem::take(&mut self.items)
    }
}
