//! SQLite-backed tagged key-value store.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use thiserror::Error;

/// Errors that can occur in the cache store.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The cache directory could not be created.
    #[error("failed to create cache directory {path}: {source}")]
    CreateDir {
        /// Directory that could not be created
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The underlying database operation failed.
    #[error("cache database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Convenience result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Durable key-value store with per-entry tags.
///
/// Values are opaque strings. Every entry may carry any number of tags;
/// [`CacheStore::clean`] removes all entries matching any given tag
/// without touching entries that carry none of them, which is what lets
/// multiple consumers share one store safely.
///
/// Cross-process safety is delegated to SQLite: the database runs in
/// WAL mode with a busy timeout, so concurrent tool invocations block
/// briefly instead of failing. No additional locking is layered on top.
pub struct CacheStore {
    conn: Connection,
}

impl CacheStore {
    /// Open (or create) a store at the given database path.
    ///
    /// Parent directories are created as needed. The schema is applied
    /// idempotently, so opening an existing database is a no-op upgrade.
    pub fn open(path: &Path) -> CacheResult<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| CacheError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        log::debug!("opening cache store at {}", path.display());
        Self::init(Connection::open(path)?)
    }

    /// Open an in-memory store. Nothing persists; intended for tests.
    pub fn open_in_memory() -> CacheResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    /// Default database path for a tool: `<platform cache dir>/<tool>/cache.db`.
    ///
    /// Returns `None` when no home directory can be determined.
    #[must_use]
    pub fn default_path(tool: &str) -> Option<PathBuf> {
        ProjectDirs::from("", "", tool).map(|dirs| dirs.cache_dir().join("cache.db"))
    }

    fn init(conn: Connection) -> CacheResult<Self> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA busy_timeout = 5000;
             PRAGMA foreign_keys = ON;

             CREATE TABLE IF NOT EXISTS entries (
                 key   TEXT PRIMARY KEY,
                 value TEXT NOT NULL
             );

             CREATE TABLE IF NOT EXISTS entry_tags (
                 key TEXT NOT NULL REFERENCES entries(key) ON DELETE CASCADE,
                 tag TEXT NOT NULL,
                 PRIMARY KEY (key, tag)
             );

             CREATE INDEX IF NOT EXISTS idx_entry_tags_tag ON entry_tags (tag);",
        )?;
        Ok(Self { conn })
    }

    /// Insert or overwrite an entry, replacing its tag set.
    ///
    /// The entry upsert and the tag replacement commit as one
    /// transaction, so a failed save never leaves an entry with a
    /// half-updated tag set.
    pub fn save(&mut self, key: &str, value: &str, tags: &[&str]) -> CacheResult<()> {
        log::trace!("cache save: {key}");
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO entries (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        tx.execute("DELETE FROM entry_tags WHERE key = ?1", params![key])?;
        {
            let mut stmt = tx.prepare_cached("INSERT INTO entry_tags (key, tag) VALUES (?1, ?2)")?;
            for tag in tags {
                stmt.execute(params![key, tag])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Load an entry's value. A key that was never stored (or was
    /// removed) yields `Ok(None)`.
    pub fn load(&self, key: &str) -> CacheResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM entries WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Remove an entry and its tags. Removing a missing key is a silent
    /// no-op.
    pub fn remove(&mut self, key: &str) -> CacheResult<()> {
        log::trace!("cache remove: {key}");
        self.conn
            .execute("DELETE FROM entries WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// Remove every entry carrying any of the given tags.
    ///
    /// Entries tagged only with other labels are untouched. Cleaning
    /// with no matching entries (or an empty tag list) succeeds
    /// silently.
    pub fn clean(&mut self, tags: &[&str]) -> CacheResult<()> {
        if tags.is_empty() {
            return Ok(());
        }
        let placeholders = vec!["?"; tags.len()].join(", ");
        let sql = format!(
            "DELETE FROM entries WHERE key IN \
             (SELECT key FROM entry_tags WHERE tag IN ({placeholders}))"
        );
        let removed = self.conn.execute(&sql, params_from_iter(tags.iter()))?;
        log::debug!("cache clean: removed {removed} entries for tags {tags:?}");
        Ok(())
    }
}
