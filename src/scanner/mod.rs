//! Scanner module for directory traversal and path filtering.
//!
//! This module provides functionality for:
//! - Depth-first directory walking, one directory listing at a time
//! - Regex-based path exclusion
//! - Name-stem and extension extraction for discovered files
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`filter`]: Exclusion patterns applied to every listed entry
//! - [`walker`]: Directory traversal yielding one batch of files per directory
//!
//! # Example
//!
//! ```no_run
//! use namedupe::scanner::{PathFilter, Walker};
//! use std::path::Path;
//!
//! let filter = PathFilter::new(["eaDir"]).unwrap();
//! let walker = Walker::new(Path::new("/Music"), filter).unwrap();
//! for batch in walker {
//!     println!("{}: {} files", batch.dir.display(), batch.files.len());
//! }
//! ```

pub mod filter;
pub mod walker;

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

// Re-export main types
pub use filter::{PathFilter, PatternError};
pub use walker::{DirectoryBatch, WalkStats, Walker};

/// A regular file discovered during a directory listing.
///
/// Carries the pieces of the path that grouping and deletion decisions
/// depend on. Entries live only as long as their directory is processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathEntry {
    /// Path to the file, as produced by the listing
    pub path: PathBuf,
    /// File name with its final extension removed
    stem: OsString,
    /// Final extension including the leading `.`, or empty
    extension: String,
}

impl PathEntry {
    /// Create a new entry for the given file path.
    ///
    /// # Example
    ///
    /// ```
    /// use namedupe::scanner::PathEntry;
    /// use std::path::PathBuf;
    ///
    /// let entry = PathEntry::new(PathBuf::from("/music/track.mp3"));
    /// assert_eq!(entry.stem_lossy(), "track");
    /// assert_eq!(entry.extension(), ".mp3");
    /// ```
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        let stem = path
            .file_stem()
            .map(OsStr::to_os_string)
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        Self {
            path,
            stem,
            extension,
        }
    }

    /// Name-stem used as the grouping key.
    #[must_use]
    pub fn stem(&self) -> &OsStr {
        &self.stem
    }

    /// Name-stem for display purposes.
    #[must_use]
    pub fn stem_lossy(&self) -> String {
        self.stem.to_string_lossy().into_owned()
    }

    /// Final extension including the leading `.`; empty when there is none.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Directory containing this file.
    #[must_use]
    pub fn parent(&self) -> Option<&Path> {
        self.path.parent()
    }

    /// Base name of the file.
    #[must_use]
    pub fn file_name(&self) -> Option<&OsStr> {
        self.path.file_name()
    }
}

/// Errors that can occur during directory scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The specified path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// An I/O error occurred while listing a directory.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}
