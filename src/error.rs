//! Crate-level error type.
//!
//! Tracker operations can fail three ways: caller misuse (a relative
//! path), an environment failure while hashing (file vanished,
//! permissions), or a failure in the durable store. Each module defines
//! its own error; this type sums them so tracker methods return one
//! thing and `?` composes.

use thiserror::Error;

use crate::cache::CacheError;
use crate::hasher::HashError;
use crate::paths::InvalidPathError;

/// Any error a tracker operation can surface.
///
/// None of these are retried or swallowed internally; the embedding
/// tool decides whether to retry, skip the file, or abort.
#[derive(Error, Debug)]
pub enum TrackerError {
    /// A path argument was not absolute.
    #[error(transparent)]
    InvalidPath(#[from] InvalidPathError),

    /// The target file could not be hashed.
    #[error(transparent)]
    Hash(#[from] HashError),

    /// The persistent cache store failed.
    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Convenience result type for tracker operations.
pub type TrackerResult<T> = Result<T, TrackerError>;
