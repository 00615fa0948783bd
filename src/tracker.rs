//! File change tracking with configuration-dependent invalidation.
//!
//! [`ChangeTracker`] is the reason this crate exists: it lets a
//! lint/format tool skip files whose content has not changed since the
//! last run. Recorded hashes live in a tagged, persistent cache; a
//! change to the tool's configuration file invalidates every recorded
//! entry at once, because new rules can change the verdict on files
//! whose bytes never moved.
//!
//! # Example
//!
//! ```no_run
//! use lintcache::{CacheStore, ChangeTracker, ConfigLocator, FileHasher};
//! use std::path::Path;
//!
//! let store = CacheStore::open(Path::new("/project/.cache/lint/cache.db"))?;
//! let locator = ConfigLocator::new("mytool").with_search_root("/project");
//! let mut tracker = ChangeTracker::open(store, FileHasher::new(), &locator)?;
//!
//! let file = Path::new("/project/src/lib.rs");
//! if tracker.has_changed(file)? {
//!     // process the file, then remember its current content
//!     tracker.record_file(file)?;
//! }
//! # Ok::<(), lintcache::TrackerError>(())
//! ```

use std::path::Path;

use crate::cache::CacheStore;
use crate::config::ConfigLocator;
use crate::error::TrackerResult;
use crate::hasher::FileHasher;
use crate::paths::{ensure_absolute, path_key};

/// Tag carried by every cache entry this tracker writes.
///
/// Cleaning by this tag removes exactly the tracker's state, leaving
/// entries from other consumers of a shared store untouched.
pub const TRACKED_FILES_TAG: &str = "tracked-files";

/// Well-known key holding the hash of the active configuration file.
const CONFIG_HASH_KEY: &str = "configuration-hash";

/// Detects whether tracked files changed since they were last recorded.
///
/// All state lives in the injected [`CacheStore`], so detection works
/// across process invocations. Every mutating operation takes
/// `&mut self`; [`ChangeTracker::has_changed`] takes `&self` and is
/// guaranteed not to write.
pub struct ChangeTracker {
    cache: CacheStore,
    hasher: FileHasher,
}

impl ChangeTracker {
    /// Set up a tracker, discovering the active configuration file.
    ///
    /// If the locator finds a configuration file, its hash is computed
    /// and compared against the stored one; on mismatch every tracked
    /// entry is cleared before the new hash is recorded. Finding no
    /// configuration file is a no-op, but a discovered file that cannot
    /// be read is a reported error, not a silent skip.
    pub fn open(
        cache: CacheStore,
        hasher: FileHasher,
        locator: &ConfigLocator,
    ) -> TrackerResult<Self> {
        let mut tracker = Self { cache, hasher };
        match locator.find() {
            Some(config) => {
                let hash = tracker.hasher.compute(&config)?;
                tracker.apply_config_hash(&hash)?;
            }
            None => {
                log::debug!(
                    "no configuration file for '{}'; skipping invalidation check",
                    locator.tool()
                );
            }
        }
        Ok(tracker)
    }

    /// Declare `path` the governing configuration file.
    ///
    /// Hashes it and, if the hash differs from the stored one, clears
    /// every tracked entry before recording the new value. Fails when
    /// the file cannot be read.
    pub fn set_config_file(&mut self, path: &Path) -> TrackerResult<()> {
        let hash = self.hasher.compute(path)?;
        self.apply_config_hash(&hash)
    }

    /// Record the current content hash of an absolute `path`,
    /// overwriting any previous record.
    pub fn record_file(&mut self, path: &Path) -> TrackerResult<()> {
        ensure_absolute(path, "record_file")?;
        let hash = self.hasher.compute(path)?;
        self.cache.save(&path_key(path), &hash, &[TRACKED_FILES_TAG])?;
        Ok(())
    }

    /// Drop the record for an absolute `path`. Forgetting a file that
    /// was never recorded succeeds silently.
    pub fn forget_file(&mut self, path: &Path) -> TrackerResult<()> {
        ensure_absolute(path, "forget_file")?;
        self.cache.remove(&path_key(path))?;
        Ok(())
    }

    /// Report whether `path`'s content differs from its recorded hash.
    ///
    /// Files that were never recorded (or were forgotten) always report
    /// changed. Read-only: the fresh hash is computed but never stored,
    /// so two identical queries in a row both re-hash.
    pub fn has_changed(&self, path: &Path) -> TrackerResult<bool> {
        ensure_absolute(path, "has_changed")?;
        let current = self.hasher.compute(path)?;
        let recorded = self.cache.load(&path_key(path))?;
        Ok(recorded.as_deref() != Some(current.as_str()))
    }

    /// Remove every entry this tracker wrote, including the stored
    /// configuration hash. Idempotent.
    pub fn clear_all(&mut self) -> TrackerResult<()> {
        self.cache.clean(&[TRACKED_FILES_TAG])?;
        Ok(())
    }

    /// Compare `hash` against the stored configuration hash, clearing
    /// everything on mismatch, then store `hash` unconditionally.
    fn apply_config_hash(&mut self, hash: &str) -> TrackerResult<()> {
        let previous = self.cache.load(CONFIG_HASH_KEY)?;
        if previous.as_deref() != Some(hash) {
            log::debug!("configuration hash changed; clearing tracked entries");
            self.clear_all()?;
        }
        // Stored after the clear so the fresh value survives the wipe.
        self.cache.save(CONFIG_HASH_KEY, hash, &[TRACKED_FILES_TAG])?;
        Ok(())
    }
}
