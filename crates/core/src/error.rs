//! Error types for post indexing and querying
//!
//! Every error here is a local, synchronous failure detected before any
//! mutation happens. None of them are retryable.
//!
//! ## Error Codes
//!
//! | Code | Description |
//! |------|-------------|
//! | InvalidInput | Malformed or missing request field |
//! | InvalidRange | Query start time after end time |
//! | Internal | Bug or invariant violation |

use crate::types::Timestamp;
use thiserror::Error;

/// Result type for core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the index and its boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed, missing or wrongly typed input
    #[error("invalid input: {message}")]
    InvalidInput {
        /// What was wrong
        message: String,
    },

    /// Query range with start after end
    #[error("start_time cannot be greater than end_time ({start} > {end})")]
    InvalidRange {
        /// Requested start
        start: Timestamp,
        /// Requested end
        end: Timestamp,
    },

    /// Invariant violation inside the engine
    #[error("internal error: {message}")]
    Internal {
        /// Description of the broken invariant
        message: String,
    },
}

impl Error {
    /// Build an `InvalidInput` error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Error::InvalidInput {
            message: message.into(),
        }
    }

    /// Build an `Internal` error
    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal {
            message: message.into(),
        }
    }

    /// Canonical error code used on the wire
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidInput { .. } => "InvalidInput",
            Error::InvalidRange { .. } => "InvalidRange",
            Error::Internal { .. } => "Internal",
        }
    }

    /// Check if this is an `InvalidInput` error
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::InvalidInput { .. })
    }

    /// Check if this is an `InvalidRange` error
    pub fn is_invalid_range(&self) -> bool {
        matches!(self, Error::InvalidRange { .. })
    }

    /// Check if this is an invariant violation
    pub fn is_internal(&self) -> bool {
        matches!(self, Error::Internal { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(Error::invalid_input("x").code(), "InvalidInput");
        assert_eq!(Error::InvalidRange { start: 10, end: 5 }.code(), "InvalidRange");
        assert_eq!(Error::internal("x").code(), "Internal");
    }

    #[test]
    fn test_range_message_names_both_bounds() {
        let msg = Error::InvalidRange { start: 10, end: 5 }.to_string();
        assert!(msg.contains("10"));
        assert!(msg.contains("5"));
    }

    #[test]
    fn test_predicates() {
        assert!(Error::invalid_input("x").is_invalid_input());
        assert!(!Error::invalid_input("x").is_invalid_range());
        assert!(Error::internal("x").is_internal());
    }
}
