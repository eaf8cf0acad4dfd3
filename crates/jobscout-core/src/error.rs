//! Jobscout error taxonomy.
//!
//! One enum for the whole workspace. The variants encode the failure classes
//! the system distinguishes for callers: extraction problems are the caller's
//! input, store unavailability is fatal at startup, dimension mismatches are
//! configuration bugs, and upstream auth/format failures name the collaborator
//! that misbehaved. "No results" is never an error anywhere in the workspace.

use thiserror::Error;

/// Result alias used across all Jobscout crates.
pub type Result<T> = std::result::Result<T, JobscoutError>;

#[derive(Error, Debug)]
pub enum JobscoutError {
    /// Invalid configuration (bad chunk parameters, unparseable config file).
    #[error("Config error: {0}")]
    Config(String),

    /// Unsupported or corrupt document input.
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Vector store unreachable or misbehaving.
    #[error("Vector store unavailable: {0}")]
    StoreUnavailable(String),

    /// Collection dimensionality does not match the embedding provider.
    #[error("Dimension mismatch: collection expects {expected}, embedder produces {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Missing or rejected credentials for an upstream API. Never retried.
    #[error("Upstream auth error: {0}")]
    UpstreamAuth(String),

    /// Upstream returned an unparseable body with no fallback left to try.
    #[error("Upstream format error: {0}")]
    UpstreamFormat(String),

    /// Generic HTTP transport failure.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Embedding or generation provider failure.
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_message() {
        let err = JobscoutError::DimensionMismatch {
            expected: 384,
            actual: 768,
        };
        let msg = err.to_string();
        assert!(msg.contains("384"));
        assert!(msg.contains("768"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: JobscoutError = io.into();
        assert!(matches!(err, JobscoutError::Io(_)));
    }
}
