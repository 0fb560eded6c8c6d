//! Explicit primary/fallback results for decision policies.

use serde::Serialize;

/// Result of running a decision policy.
///
/// Policies never hide a degraded computation: when the primary inputs are
/// unusable they return `Fallback` carrying the simplified value and the reason,
/// and the caller decides whether (and how loudly) to log it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "path", rename_all = "snake_case")]
pub enum PolicyOutcome<T> {
    Primary(T),
    Fallback { value: T, reason: String },
}

impl<T> PolicyOutcome<T> {
    pub fn fallback(value: T, reason: impl Into<String>) -> Self {
        Self::Fallback {
            value,
            reason: reason.into(),
        }
    }

    pub fn value(&self) -> &T {
        match self {
            PolicyOutcome::Primary(v) => v,
            PolicyOutcome::Fallback { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            PolicyOutcome::Primary(v) => v,
            PolicyOutcome::Fallback { value, .. } => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, PolicyOutcome::Fallback { .. })
    }

    /// Why the fallback path was taken, if it was.
    pub fn fallback_reason(&self) -> Option<&str> {
        match self {
            PolicyOutcome::Primary(_) => None,
            PolicyOutcome::Fallback { reason, .. } => Some(reason),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> PolicyOutcome<U> {
        match self {
            PolicyOutcome::Primary(v) => PolicyOutcome::Primary(f(v)),
            PolicyOutcome::Fallback { value, reason } => PolicyOutcome::Fallback {
                value: f(value),
                reason,
            },
        }
    }
}
