//! Configuration file discovery.
//!
//! Locates the active configuration file for a tool so the tracker can
//! hash it and detect rule changes between runs. A missing configuration
//! is not an error: plenty of projects run on defaults, and the tracker
//! treats that as "nothing to invalidate on".

use std::env;
use std::path::PathBuf;

use directories::ProjectDirs;

/// Finds the active configuration file for a named tool.
///
/// The search checks `<tool>.toml` and `.<tool>.toml` in the search
/// root and each of its ancestors (nearest wins, so a nested project
/// shadows its parent), then falls back to the platform configuration
/// directory (`~/.config/<tool>/<tool>.toml` on Linux).
#[derive(Debug, Clone)]
pub struct ConfigLocator {
    tool: String,
    search_root: Option<PathBuf>,
}

impl ConfigLocator {
    /// Create a locator for the given tool name.
    ///
    /// Without an explicit search root, discovery starts from the
    /// current working directory.
    #[must_use]
    pub fn new(tool: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            search_root: None,
        }
    }

    /// Start the ancestor search from `dir` instead of the current
    /// working directory.
    #[must_use]
    pub fn with_search_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_root = Some(dir.into());
        self
    }

    /// The tool name this locator searches for.
    #[must_use]
    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// Locate the active configuration file, if any.
    pub fn find(&self) -> Option<PathBuf> {
        let root = self
            .search_root
            .clone()
            .or_else(|| env::current_dir().ok())?;

        let names = [format!("{}.toml", self.tool), format!(".{}.toml", self.tool)];
        for dir in root.ancestors() {
            for name in &names {
                let candidate = dir.join(name);
                if candidate.is_file() {
                    log::debug!("found configuration file: {}", candidate.display());
                    return Some(candidate);
                }
            }
        }

        let dirs = ProjectDirs::from("", "", &self.tool)?;
        let fallback = dirs.config_dir().join(format!("{}.toml", self.tool));
        if fallback.is_file() {
            log::debug!("found configuration file: {}", fallback.display());
            return Some(fallback);
        }

        log::debug!("no configuration file found for tool '{}'", self.tool);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_finds_config_in_search_root() {
        let dir = TempDir::new().unwrap();
        let cfg = dir.path().join("mytool.toml");
        fs::write(&cfg, "max_width = 100\n").unwrap();

        let found = ConfigLocator::new("mytool")
            .with_search_root(dir.path())
            .find();
        assert_eq!(found, Some(cfg));
    }

    #[test]
    fn test_finds_hidden_variant() {
        let dir = TempDir::new().unwrap();
        let cfg = dir.path().join(".mytool.toml");
        fs::write(&cfg, "").unwrap();

        let found = ConfigLocator::new("mytool")
            .with_search_root(dir.path())
            .find();
        assert_eq!(found, Some(cfg));
    }

    #[test]
    fn test_plain_name_wins_over_hidden() {
        let dir = TempDir::new().unwrap();
        let plain = dir.path().join("mytool.toml");
        fs::write(&plain, "").unwrap();
        fs::write(dir.path().join(".mytool.toml"), "").unwrap();

        let found = ConfigLocator::new("mytool")
            .with_search_root(dir.path())
            .find();
        assert_eq!(found, Some(plain));
    }

    #[test]
    fn test_walks_ancestors() {
        let dir = TempDir::new().unwrap();
        let cfg = dir.path().join("mytool.toml");
        fs::write(&cfg, "").unwrap();
        let nested = dir.path().join("a/b/c");
        fs::create_dir_all(&nested).unwrap();

        let found = ConfigLocator::new("mytool").with_search_root(&nested).find();
        assert_eq!(found, Some(cfg));
    }

    #[test]
    fn test_nearest_ancestor_wins() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("mytool.toml"), "outer").unwrap();
        let nested = dir.path().join("sub");
        fs::create_dir_all(&nested).unwrap();
        let inner = nested.join("mytool.toml");
        fs::write(&inner, "inner").unwrap();

        let found = ConfigLocator::new("mytool").with_search_root(&nested).find();
        assert_eq!(found, Some(inner));
    }

    #[test]
    fn test_absent_config_is_none() {
        let dir = TempDir::new().unwrap();
        // Unlikely tool name keeps the platform-dir fallback from firing.
        let found = ConfigLocator::new("lintcache-test-no-such-tool")
            .with_search_root(dir.path())
            .find();
        assert_eq!(found, None);
    }

    #[test]
    fn test_directory_named_like_config_is_ignored() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("mytool.toml")).unwrap();

        let found = ConfigLocator::new("mytool")
            .with_search_root(dir.path())
            .find();
        assert_eq!(found, None);
    }
}
