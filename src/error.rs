//! Unified error types for PostIndex.
//!
//! This module flattens the engine's error types into one stable enum.

use postindex_core::request::WireError;
use thiserror::Error;

/// All PostIndex errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed, missing or wrongly typed input
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Query start time after end time
    #[error("start_time cannot be greater than end_time ({start} > {end})")]
    InvalidRange {
        /// Requested start
        start: i64,
        /// Requested end
        end: i64,
    },

    /// Configuration could not be loaded or is inconsistent
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal error (bug or invariant violation)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for PostIndex operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Canonical error code, as used on the wire.
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidInput(_) => "InvalidInput",
            Error::InvalidRange { .. } => "InvalidRange",
            Error::Config(_) => "Config",
            Error::Internal(_) => "Internal",
        }
    }

    /// Check if this is an invalid-input error.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::InvalidInput(_))
    }

    /// Check if this is an invalid-range error.
    pub fn is_invalid_range(&self) -> bool {
        matches!(self, Error::InvalidRange { .. })
    }

    /// Check if this is a serious/unrecoverable error.
    pub fn is_serious(&self) -> bool {
        matches!(self, Error::Internal(_))
    }
}

impl From<&Error> for WireError {
    fn from(e: &Error) -> Self {
        WireError {
            code: e.code(),
            error: e.to_string(),
        }
    }
}

// Convert from core errors
impl From<postindex_core::Error> for Error {
    fn from(e: postindex_core::Error) -> Self {
        use postindex_core::Error as CoreError;
        match e {
            CoreError::InvalidInput { message } => Error::InvalidInput(message),
            CoreError::InvalidRange { start, end } => Error::InvalidRange { start, end },
            CoreError::Internal { message } => Error::Internal(message),
        }
    }
}

impl From<postindex_engine::ConfigError> for Error {
    fn from(e: postindex_engine::ConfigError) -> Self {
        Error::Config(e.to_string())
    }
}

// Convert from serde_json errors
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::InvalidInput(e.to_string())
    }
}
