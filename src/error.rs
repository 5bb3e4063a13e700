//! Error types for distload
//!
//! This module defines the error hierarchy for the dispatcher:
//! - Storage metadata errors (stat/list against the cluster gateway)
//! - Job service errors (session, submission, status polling)
//! - Configuration and CLI errors
//!
//! Design philosophy:
//! - Use thiserror for structured error types in library code
//! - Failures local to one job attempt are absorbed into retry accounting
//!   and never surface here; everything in this module is either structural
//!   (abort the whole dispatch) or a leak signal that must reach the caller

use thiserror::Error;

/// Top-level error type for the distload application
#[derive(Error, Debug)]
pub enum LoadError {
    /// Storage metadata errors
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Job service errors
    #[error("job service error: {0}")]
    Job(#[from] JobError),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the storage system's metadata provider
///
/// These are structural: a path that cannot be stat'ed or listed aborts the
/// traversal, propagated verbatim to the caller.
#[derive(Error, Debug, Clone)]
pub enum StorageError {
    /// Path does not exist
    #[error("path not found: '{path}'")]
    NotFound { path: String },

    /// Permission denied
    #[error("permission denied: '{path}'")]
    PermissionDenied { path: String },

    /// Stat operation failed
    #[error("failed to stat '{path}': {reason}")]
    StatFailed { path: String, reason: String },

    /// Listing operation failed
    #[error("failed to list '{path}': {reason}")]
    ListFailed { path: String, reason: String },

    /// Transport-level failure talking to the gateway
    #[error("storage transport error: {0}")]
    Transport(String),
}

/// Errors from the job-execution service
#[derive(Error, Debug, Clone)]
pub enum JobError {
    /// Transport-level failure on submit or status poll. Transient: counted
    /// against the attempt's retry budget, never propagated past the pool.
    #[error("job transport error: {0}")]
    Transport(String),

    /// Could not open a session with the job service
    #[error("failed to open job session: {0}")]
    SessionFailed(String),

    /// Releasing a session failed. Propagated: can indicate a leaked
    /// resource on the remote side.
    #[error("failed to close job session: {0}")]
    CloseFailed(String),

    /// The service reported a status name this client does not know
    #[error("unexpected job status from service: '{value}'")]
    UnexpectedStatus { value: String },
}

impl JobError {
    /// Check if this error is transient (absorbed by retry accounting)
    pub fn is_transient(&self) -> bool {
        matches!(self, JobError::Transport(_))
    }
}

/// Configuration and CLI errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid replication factor
    #[error("invalid replication factor {value}: must be at least 1")]
    InvalidReplication { value: u64 },

    /// Invalid active job ceiling
    #[error("invalid active job limit {value}: must be at least 1")]
    InvalidActiveJobs { value: u64 },

    /// Invalid retry budget
    #[error("invalid retry budget {value}: must be at least 1")]
    InvalidRetries { value: u64 },

    /// Endpoint URL did not parse
    #[error("invalid endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
}

/// Result type alias for LoadError
pub type Result<T> = std::result::Result<T, LoadError>;

/// Result type alias for StorageError
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Result type alias for JobError
pub type JobResult<T> = std::result::Result<T, JobError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_error_transient() {
        assert!(JobError::Transport("connection reset".into()).is_transient());
        assert!(!JobError::SessionFailed("refused".into()).is_transient());
        assert!(!JobError::UnexpectedStatus { value: "PAUSED".into() }.is_transient());
    }

    #[test]
    fn test_error_conversion() {
        let storage_err = StorageError::NotFound { path: "/missing".into() };
        let load_err: LoadError = storage_err.into();
        assert!(matches!(load_err, LoadError::Storage(_)));
    }
}
