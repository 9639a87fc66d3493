//! Error types for catalog search.
//!
//! Query errors (bad query, malformed filter, unknown specifier) are user
//! errors and carry messages meant to be shown as-is. Datastore errors are
//! infrastructure failures that abort the whole request.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for search operations.
#[derive(Error, Debug)]
pub enum SearchError {
    /// A `key=value` filter whose value does not parse as the key requires.
    #[error("malformed value {value:?} for {key}: {reason}")]
    MalformedFilterValue {
        key: String,
        value: String,
        reason: String,
    },

    /// A `key=value` filter with a key nobody understands.
    #[error("could not understand specifier {key:?}")]
    UnrecognizedSpecifier { key: String },

    /// Structurally valid query that cannot be run (no keywords).
    #[error("{message}")]
    BadQuery { message: String },

    /// Candidate search or source lookup failed in the datastore.
    #[error("datastore error: {message}")]
    Datastore { message: String },

    /// The request was cancelled or ran past its deadline.
    #[error("search cancelled: {reason}")]
    Cancelled { reason: String },

    /// I/O errors from catalog or config files.
    #[error("storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// JSON decoding errors.
    #[error("serialization error: {message}")]
    Serde { message: String },

    /// Configuration loading errors.
    #[error("config error: {message}")]
    Config { message: String },
}

/// A specialized Result type for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

impl SearchError {
    /// Create a malformed filter value error.
    pub fn malformed(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedFilterValue {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an unrecognized specifier error.
    pub fn unrecognized(key: impl Into<String>) -> Self {
        Self::UnrecognizedSpecifier { key: key.into() }
    }

    /// Create a bad query error.
    pub fn bad_query(message: impl Into<String>) -> Self {
        Self::BadQuery {
            message: message.into(),
        }
    }

    /// Create a datastore error.
    pub fn datastore(message: impl Into<String>) -> Self {
        Self::Datastore {
            message: message.into(),
        }
    }

    /// Create a cancellation error.
    pub fn cancelled(reason: impl Into<String>) -> Self {
        Self::Cancelled {
            reason: reason.into(),
        }
    }

    /// Create a storage error from an I/O error.
    pub fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Create a serialization error.
    pub fn serde(message: impl Into<String>) -> Self {
        Self::Serde {
            message: message.into(),
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Stable machine-readable category for presentation layers.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedFilterValue { .. } => "malformed_filter",
            Self::UnrecognizedSpecifier { .. } => "unrecognized_specifier",
            Self::BadQuery { .. } => "bad_query",
            Self::Datastore { .. } => "datastore",
            Self::Cancelled { .. } => "cancelled",
            Self::Storage { .. } => "storage",
            Self::Serde { .. } => "serialization",
            Self::Config { .. } => "config",
        }
    }

    /// Whether the query itself was at fault (as opposed to the backend).
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedFilterValue { .. }
                | Self::UnrecognizedSpecifier { .. }
                | Self::BadQuery { .. }
        )
    }
}

impl From<io::Error> for SearchError {
    fn from(err: io::Error) -> Self {
        Self::Storage {
            path: PathBuf::new(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde {
            message: err.to_string(),
        }
    }
}

/// Outcome of a failed source lookup.
///
/// `NotFound` is recoverable: the ranker substitutes a sentinel rank.
/// Everything else aborts ranking.
#[derive(Error, Debug)]
pub enum LookupError {
    /// No source exists for the referenced id.
    #[error("source not found: {source_id}")]
    NotFound { source_id: String },

    /// Any other lookup failure.
    #[error(transparent)]
    Failed(#[from] SearchError),
}

impl LookupError {
    /// Create a not-found outcome.
    pub fn not_found(source_id: impl Into<String>) -> Self {
        Self::NotFound {
            source_id: source_id.into(),
        }
    }
}

/// Exit codes for the CLI.
pub mod exit_codes {
    /// Search ran and produced output.
    pub const SUCCESS: i32 = 0;

    /// The query was rejected (bad query, malformed or unknown filter).
    pub const USER_ERROR: i32 = 1;

    /// Datastore, config or I/O failure.
    pub const FAILURE: i32 = 2;
}
