//! BLAKE3 file content hashing.
//!
//! Produces the opaque fingerprint strings stored by the change tracker.
//! Small files are streamed through a fixed buffer; files at or above a
//! configurable threshold are memory-mapped to avoid double-buffering.
//! Both strategies hash the same bytes, so the resulting digest is
//! independent of how the file was read.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use memmap2::Mmap;
use thiserror::Error;

/// Read buffer size for streamed hashing.
const STREAM_BUF_SIZE: usize = 64 * 1024;

/// Default file size at which hashing switches to memory mapping.
const DEFAULT_MMAP_THRESHOLD: u64 = 16 * 1024 * 1024;

/// Errors that can occur while hashing a file.
#[derive(Error, Debug)]
pub enum HashError {
    /// The specified file was not found.
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl HashError {
    fn from_io(path: &Path, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}

/// Computes BLAKE3 content digests of files.
///
/// The digest is deterministic for unchanged content and differs for
/// changed content, which is the whole contract the change tracker
/// relies on. Construction is builder-style:
///
/// ```no_run
/// use lintcache::hasher::FileHasher;
/// use std::path::Path;
///
/// let hasher = FileHasher::new().with_mmap(true).with_mmap_threshold(1024 * 1024);
/// let digest = hasher.compute(Path::new("/project/src/lib.rs")).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct FileHasher {
    use_mmap: bool,
    mmap_threshold: u64,
}

impl Default for FileHasher {
    fn default() -> Self {
        Self {
            use_mmap: true,
            mmap_threshold: DEFAULT_MMAP_THRESHOLD,
        }
    }
}

impl FileHasher {
    /// Create a hasher with default settings (mmap enabled for large files).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable memory-mapped hashing.
    #[must_use]
    pub fn with_mmap(mut self, use_mmap: bool) -> Self {
        self.use_mmap = use_mmap;
        self
    }

    /// Set the file size at which hashing switches to memory mapping.
    #[must_use]
    pub fn with_mmap_threshold(mut self, threshold: u64) -> Self {
        self.mmap_threshold = threshold;
        self
    }

    /// Compute the BLAKE3 digest of the file content as a hex string.
    ///
    /// Fails with [`HashError::NotFound`] or
    /// [`HashError::PermissionDenied`] when the file cannot be opened,
    /// and [`HashError::Io`] for other read failures (including `path`
    /// naming a directory).
    pub fn compute(&self, path: &Path) -> Result<String, HashError> {
        let file = File::open(path).map_err(|e| HashError::from_io(path, e))?;
        let metadata = file.metadata().map_err(|e| HashError::from_io(path, e))?;

        let mut hasher = blake3::Hasher::new();
        if self.use_mmap && metadata.len() >= self.mmap_threshold && metadata.len() > 0 {
            // Mapping an empty file is rejected by the OS, hence the
            // len() > 0 guard above.
            let mmap = unsafe { Mmap::map(&file) }.map_err(|e| HashError::from_io(path, e))?;
            hasher.update(&mmap);
        } else {
            let mut reader = BufReader::with_capacity(STREAM_BUF_SIZE, file);
            let mut buf = [0u8; STREAM_BUF_SIZE];
            loop {
                let n = reader.read(&mut buf).map_err(|e| HashError::from_io(path, e))?;
                if n == 0 {
                    break;
                }
                hasher.update(&buf[..n]);
            }
        }

        Ok(hasher.finalize().to_hex().to_string())
    }
}
