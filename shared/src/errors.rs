//! Error types for the Fitness Tracker core

use thiserror::Error;

/// Failure reported by a sample source when reading fitness buckets
///
/// The two variants call for different recovery: a missing permission has
/// to be requested again, a failed fetch can simply be retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Fetch failed: {0}")]
    Fetch(String),
}
