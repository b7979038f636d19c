//! Transient user notifications

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

/// How long a toast stays visible
pub const TOAST_TTL: Duration = Duration::from_secs(4);

/// Toast category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Operation completed
    Success,
    /// Operation failed
    Error,
    /// Neutral notice
    #[default]
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Info => "info",
        })
    }
}

/// A single notification; at most one is shown at a time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Monotonic id; expiry only clears the toast it was scheduled for
    pub id: u64,
    /// Text shown to the user
    pub message: String,
    /// Category
    pub severity: Severity,
    /// When it was shown
    pub issued_at: Instant,
}

impl Toast {
    /// Whether the toast has outlived [`TOAST_TTL`] at `now`
    #[inline]
    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.issued_at) >= TOAST_TTL
    }
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}
