//! Reservation failure model.

use thiserror::Error;

/// Why a reservation did not complete.
///
/// The first three variants are client-correctable validation outcomes; the
/// last two describe infrastructure problems. Each variant renders the
/// human-readable problem text that is both logged and returned to the caller.
///
/// Marked `#[non_exhaustive]` so that wire-level classifiers outside this crate
/// must keep a default arm for kinds they do not map explicitly.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FailureKind {
    #[error(
        "The reservation of {requested} items of {item} fails because it's less than the minimum delta of {minimum}"
    )]
    BelowMinimumChange {
        item: String,
        requested: i64,
        minimum: i64,
    },

    #[error("The reservation of {requested} items of {item} fails because the item is not known")]
    UnknownItem { item: String, requested: i64 },

    #[error(
        "The reservation of {requested} items of {item} fails because there are only {available} items available"
    )]
    InsufficientStock {
        item: String,
        requested: i64,
        available: i64,
    },

    /// A stock manager call timed out, could not connect, or was refused upstream.
    ///
    /// When raised by the mutating call the write may or may not have applied.
    #[error("Unable to complete {call} against {dependency}: {reason}")]
    UpstreamUnavailable {
        dependency: String,
        call: String,
        reason: String,
    },

    #[error("{0}")]
    Unclassified(FailureContext),
}

impl FailureKind {
    /// Stable machine-readable code for the failure kind.
    pub fn code(&self) -> &'static str {
        match self {
            FailureKind::BelowMinimumChange { .. } => "below_minimum_change",
            FailureKind::UnknownItem { .. } => "unknown_item",
            FailureKind::InsufficientStock { .. } => "insufficient_stock",
            FailureKind::UpstreamUnavailable { .. } => "failed_dependency",
            FailureKind::Unclassified(_) => "unclassified",
        }
    }
}

/// Best-effort diagnostics attached to an unclassified failure.
///
/// Never carries credentials: only the operation signature, the rendered
/// argument values, and the name/message of the underlying cause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureContext {
    /// Operation signature, e.g. `StorefrontResource.reserveStock(ReservationRequest)`.
    pub operation: String,
    pub arguments: Vec<String>,
    /// Name of the innermost cause, `NULL` when none was available.
    pub cause: String,
    pub message: Option<String>,
}

impl FailureContext {
    pub fn new(operation: impl Into<String>, arguments: Vec<String>) -> Self {
        Self {
            operation: operation.into(),
            arguments,
            cause: "NULL".to_string(),
            message: None,
        }
    }

    pub fn with_cause(mut self, cause: impl Into<String>, message: impl Into<String>) -> Self {
        self.cause = cause.into();
        self.message = Some(message.into());
        self
    }
}

impl core::fmt::Display for FailureContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Problem processing request in {}", self.operation)?;
        match &self.message {
            Some(msg) => write!(f, " ({}: {msg})", self.cause),
            None => write!(f, " ({})", self.cause),
        }
    }
}

/// Rejected update of a runtime setting. The previous value is left untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettingError {
    #[error("Minimum change ({0}) must be > 0 and an integer")]
    InvalidArgument(i64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_values() {
        let below = FailureKind::BelowMinimumChange {
            item: "Pencil".into(),
            requested: 2,
            minimum: 3,
        };
        assert_eq!(
            below.to_string(),
            "The reservation of 2 items of Pencil fails because it's less than the minimum delta of 3"
        );

        let short = FailureKind::InsufficientStock {
            item: "Pencil".into(),
            requested: 5,
            available: 5,
        };
        assert!(short.to_string().ends_with("there are only 5 items available"));
    }

    #[test]
    fn unclassified_context_defaults_cause_to_null() {
        let ctx = FailureContext::new("reserveStock(ReservationRequest)", vec!["x".into()]);
        assert_eq!(ctx.cause, "NULL");
        assert_eq!(
            FailureKind::Unclassified(ctx).to_string(),
            "Problem processing request in reserveStock(ReservationRequest) (NULL)"
        );
    }

    #[test]
    fn codes_are_stable() {
        let unknown = FailureKind::UnknownItem {
            item: "Stapler".into(),
            requested: 5,
        };
        assert_eq!(unknown.code(), "unknown_item");
    }
}
