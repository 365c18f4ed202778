//! Directory walker implementation using walkdir for sorted listings.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct, which traverses a directory
//! tree and yields one [`DirectoryBatch`] per directory: the directory path
//! plus the regular files it directly contains. Files are never merged
//! across directories.
//!
//! # Ordering
//!
//! Every retained subdirectory of a directory is yielded (recursively, in
//! file-name order) before the directory's own batch. The traversal keeps an
//! explicit stack of open listings instead of recursing, so deep trees cannot
//! exhaust the call stack.
//!
//! # Features
//!
//! - Exclusion patterns applied to every entry before it is classified
//! - Excluded directories are never listed, pruning their whole subtree
//! - Unreadable entries and directories are skipped with a warning
//! - Each physical directory is listed once, so symlink loops terminate
//!
//! # Example
//!
//! ```no_run
//! use namedupe::scanner::{PathFilter, Walker};
//! use std::path::Path;
//!
//! let mut walker = Walker::new(Path::new("/Music"), PathFilter::default()).unwrap();
//! for batch in walker.by_ref() {
//!     for file in &batch.files {
//!         println!("{}", file.path.display());
//!     }
//! }
//! println!("{:?}", walker.stats());
//! ```

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{PathEntry, PathFilter, ScanError};

/// Regular files found directly inside one directory.
#[derive(Debug, Clone)]
pub struct DirectoryBatch {
    /// The directory that was listed
    pub dir: PathBuf,
    /// Retained regular files, sorted by file name
    pub files: Vec<PathEntry>,
}

/// Counters collected while walking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Directories successfully listed, including the root
    pub directories: usize,
    /// Regular files retained across all directories
    pub files: usize,
    /// Entries dropped by the exclusion patterns
    pub excluded: usize,
    /// Entries or directories skipped because they could not be read
    pub skipped: usize,
}

/// A listed directory whose subdirectories are still being visited.
#[derive(Debug)]
struct Frame {
    dir: PathBuf,
    files: Vec<PathEntry>,
    subdirs: std::vec::IntoIter<PathBuf>,
}

/// Depth-first directory walker.
///
/// Construct with [`Walker::new`], then iterate to receive
/// [`DirectoryBatch`] values.
#[derive(Debug)]
pub struct Walker {
    /// Exclusion patterns
    filter: PathFilter,
    /// Open listings, innermost last
    stack: Vec<Frame>,
    /// Canonical paths of directories already listed
    visited: HashSet<PathBuf>,
    /// Running counters
    stats: WalkStats,
}

impl Walker {
    /// Create a walker rooted at `root` and list the root directory.
    ///
    /// The root itself is not checked against the filter.
    ///
    /// # Errors
    ///
    /// - [`ScanError::NotFound`] if the root does not exist
    /// - [`ScanError::NotADirectory`] if the root is not a directory
    /// - [`ScanError::Io`] if the root cannot be listed
    pub fn new(root: &Path, filter: PathFilter) -> Result<Self, ScanError> {
        let metadata = fs::metadata(root).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ScanError::NotFound(root.to_path_buf()),
            _ => ScanError::Io {
                path: root.to_path_buf(),
                source: e,
            },
        })?;

        if !metadata.is_dir() {
            return Err(ScanError::NotADirectory(root.to_path_buf()));
        }

        let mut walker = Self {
            filter,
            stack: Vec::new(),
            visited: HashSet::new(),
            stats: WalkStats::default(),
        };
        walker.first_visit(root)?;
        let frame = walker.list(root)?;
        walker.stack.push(frame);

        Ok(walker)
    }

    /// Counters collected so far.
    #[must_use]
    pub fn stats(&self) -> WalkStats {
        self.stats
    }

    /// Record `dir` as visited. Returns `false` if the same physical
    /// directory was already listed under another path.
    fn first_visit(&mut self, dir: &Path) -> Result<bool, ScanError> {
        let canonical = dir.canonicalize().map_err(|e| ScanError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;
        Ok(self.visited.insert(canonical))
    }

    /// List the immediate children of `dir`, filter them, and split them
    /// into subdirectories and regular files.
    fn list(&mut self, dir: &Path) -> Result<Frame, ScanError> {
        log::debug!("Listing {}", dir.display());

        let mut subdirs = Vec::new();
        let mut files = Vec::new();

        let listing = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        for entry in listing {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(ScanError::Io {
                        path: dir.to_path_buf(),
                        source: e
                            .into_io_error()
                            .unwrap_or_else(|| io::Error::other("directory listing failed")),
                    });
                }
                Err(e) => {
                    let path = e.path().unwrap_or(dir);
                    log::warn!("Skipping {}: {}", path.display(), e);
                    self.stats.skipped += 1;
                    continue;
                }
            };

            if !self.filter.keep(entry.path()) {
                log::trace!("Ignoring {}", entry.path().display());
                self.stats.excluded += 1;
                continue;
            }

            let file_type = entry.file_type();
            if file_type.is_dir() {
                subdirs.push(entry.into_path());
            } else if file_type.is_file() {
                files.push(PathEntry::new(entry.into_path()));
            } else {
                log::trace!("Skipping special file: {}", entry.path().display());
            }
        }

        self.stats.directories += 1;
        self.stats.files += files.len();

        Ok(Frame {
            dir: dir.to_path_buf(),
            files,
            subdirs: subdirs.into_iter(),
        })
    }
}

impl Iterator for Walker {
    type Item = DirectoryBatch;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;

            if let Some(subdir) = frame.subdirs.next() {
                match self.first_visit(&subdir) {
                    Ok(true) => {}
                    Ok(false) => {
                        log::warn!(
                            "Skipping directory {}: already visited (symlink loop?)",
                            subdir.display()
                        );
                        self.stats.skipped += 1;
                        continue;
                    }
                    Err(e) => {
                        log::warn!("Skipping directory {}: {}", subdir.display(), e);
                        self.stats.skipped += 1;
                        continue;
                    }
                }
                match self.list(&subdir) {
                    Ok(child) => self.stack.push(child),
                    Err(e) => {
                        log::warn!("Skipping directory {}: {}", subdir.display(), e);
                        self.stats.skipped += 1;
                    }
                }
                continue;
            }

            let frame = self.stack.pop()?;
            return Some(DirectoryBatch {
                dir: frame.dir,
                files: frame.files,
            });
        }
    }
}
