//! lintcache - persistent change detection for incremental tooling
//!
//! Lets a lint/format tool skip files whose content has not changed
//! since the last run. File content hashes (BLAKE3) are recorded in a
//! durable, tagged SQLite cache; a change to the tool's configuration
//! file invalidates every recorded entry at once, since new rules can
//! change the verdict on unchanged bytes.
//!
//! The entry point is [`ChangeTracker`]; see the [`tracker`] module for
//! a usage example.

pub mod cache;
pub mod config;
pub mod error;
pub mod hasher;
pub mod logging;
pub mod paths;
pub mod tracker;

pub use cache::{CacheError, CacheStore};
pub use config::ConfigLocator;
pub use error::{TrackerError, TrackerResult};
pub use hasher::{FileHasher, HashError};
pub use paths::InvalidPathError;
pub use tracker::{ChangeTracker, TRACKED_FILES_TAG};
