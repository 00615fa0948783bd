//! Tagged persistent cache storage.
//!
//! This module provides the durable key-value store backing the change
//! tracker. Entries persist across process invocations (the whole point
//! is cross-run memoization) and carry tags, so one consumer can bulk
//! remove its own entries from a store shared with others.
//!
//! # Invalidation
//!
//! The store itself never expires entries. Staleness is decided by the
//! tracker at query time through hash comparison; the store only offers
//! the primitives: `save`, `load`, `remove`, and tag-scoped `clean`.

pub mod store;

pub use store::{CacheError, CacheResult, CacheStore};
