//! Engine error handling
//!
//! Sample source failures pass through unchanged so the caller can pick the
//! right recovery: ask for permission again, or let the user retry.

use fitness_tracker_shared::SourceError;
use thiserror::Error;

/// Engine error type
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Failed to fetch samples: {0}")]
    Fetch(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error")]
    Store(#[from] anyhow::Error),
}

/// What the caller should do about an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Request the missing permission, then refresh
    RequestPermission,
    /// Leave state as is and let the user retry
    Retry,
    /// Correct the input
    FixInput,
    /// Nothing to retry; look at the logs
    Inspect,
}

impl EngineError {
    pub fn recovery(&self) -> Recovery {
        match self {
            EngineError::PermissionDenied(_) => Recovery::RequestPermission,
            EngineError::Fetch(_) => Recovery::Retry,
            EngineError::Validation(_) => Recovery::FixInput,
            EngineError::Store(_) => Recovery::Inspect,
        }
    }
}

impl From<SourceError> for EngineError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::PermissionDenied(msg) => EngineError::PermissionDenied(msg),
            SourceError::Fetch(msg) => EngineError::Fetch(msg),
        }
    }
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_denied_recovery() {
        let error: EngineError = SourceError::PermissionDenied("fitness scope".to_string()).into();
        assert_eq!(error.recovery(), Recovery::RequestPermission);
        assert_eq!(error.to_string(), "Permission denied: fitness scope");
    }

    #[test]
    fn test_fetch_recovery() {
        let error: EngineError = SourceError::Fetch("network unreachable".to_string()).into();
        assert_eq!(error.recovery(), Recovery::Retry);
    }

    #[test]
    fn test_store_recovery() {
        let error = EngineError::from(anyhow::anyhow!("disk full"));
        assert_eq!(error.recovery(), Recovery::Inspect);
    }

    #[test]
    fn test_validation_recovery() {
        let error = EngineError::Validation("Step goal must be greater than 0".to_string());
        assert_eq!(error.recovery(), Recovery::FixInput);
    }
}
