//! Shared error type across metlog crates.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Caller-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// The log sink could not be opened for appending.
    ConstructionFailure,
    /// Another emit is in flight (or the caller re-entered emit).
    ConcurrencyViolation,
    /// Writing or flushing the sink failed.
    Io,
    /// Malformed metric name or value.
    Precondition,
    /// Invalid configuration document.
    BadConfig,
    /// Unsupported configuration version.
    UnsupportedVersion,
}

impl ErrorCode {
    /// String representation used in logs and tests.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::ConstructionFailure => "CONSTRUCTION_FAILURE",
            ErrorCode::ConcurrencyViolation => "CONCURRENCY_VIOLATION",
            ErrorCode::Io => "IO",
            ErrorCode::Precondition => "PRECONDITION",
            ErrorCode::BadConfig => "BAD_CONFIG",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MetlogError>;

/// Unified error type used by core and recorder.
#[derive(Debug, Error)]
pub enum MetlogError {
    #[error("cannot open log sink {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("emit can only run in one context at a time")]
    ConcurrencyViolation,
    #[error("sink write failed: {0}")]
    Io(#[from] io::Error),
    #[error("invalid metric name: {0:?}")]
    InvalidName(String),
    #[error("invalid metric value: {0}")]
    InvalidValue(String),
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
}

impl MetlogError {
    /// Map an error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            MetlogError::Open { .. } => ErrorCode::ConstructionFailure,
            MetlogError::ConcurrencyViolation => ErrorCode::ConcurrencyViolation,
            MetlogError::Io(_) => ErrorCode::Io,
            MetlogError::InvalidName(_) | MetlogError::InvalidValue(_) => ErrorCode::Precondition,
            MetlogError::BadConfig(_) => ErrorCode::BadConfig,
            MetlogError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
        }
    }

    /// True when the losing side of an emit race should simply skip this interval.
    pub fn is_contended(&self) -> bool {
        matches!(self, MetlogError::ConcurrencyViolation)
    }
}
