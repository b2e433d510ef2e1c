/// Structured error types for stockctl-core.
///
/// Library consumers get `StoreError`; the binaries wrap it with `anyhow`.
/// A statement that matches no rows is not an error: repository operations
/// report it as a zero count or an empty sequence.
use thiserror::Error;

use crate::models::ValidationError;

/// Main error type for repository operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Could not reach or authenticate against the store
    #[error("storage unavailable: {source}")]
    StorageUnavailable {
        #[source]
        source: sqlx::Error,
    },

    /// The statement reached the store and failed there
    #[error("query failed: {source}")]
    Query {
        #[source]
        source: sqlx::Error,
    },

    /// Input rejected before reaching the store
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Configuration could not be assembled
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

/// Result type alias for stockctl-core operations
pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    /// Wrap an error raised while opening a connection.
    ///
    /// Every connect failure, credentials included, counts as unavailable.
    pub fn unavailable(source: sqlx::Error) -> Self {
        Self::StorageUnavailable { source }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Whether the store could not be reached at all
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::StorageUnavailable { .. })
    }
}

impl From<sqlx::Error> for StoreError {
    /// Classify an error raised by a statement on an open connection.
    fn from(source: sqlx::Error) -> Self {
        match source {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Configuration(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => Self::StorageUnavailable { source },
            _ => Self::Query { source },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn io_failure_is_unavailable() {
        let err: StoreError =
            sqlx::Error::Io(io::Error::new(io::ErrorKind::ConnectionRefused, "refused")).into();
        assert!(err.is_unavailable());
        assert!(err.to_string().starts_with("storage unavailable"));
    }

    #[test]
    fn missing_row_is_query_error() {
        let err: StoreError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, StoreError::Query { .. }));
        assert!(!err.is_unavailable());
    }

    #[test]
    fn validation_passes_message_through() {
        let err: StoreError = ValidationError::Empty { field: "item" }.into();
        assert_eq!(err.to_string(), "item cannot be empty");
    }
}
