//! Duplicate grouping by name-stem.
//!
//! # Overview
//!
//! Files in one directory are duplicates when they share a name once the
//! final extension is removed (`track.mp3` and `track.m4p`). Only groups
//! with two or more members are kept.
//!
//! # Example
//!
//! ```
//! use namedupe::scanner::PathEntry;
//! use namedupe::duplicates::group_by_stem;
//! use std::path::PathBuf;
//!
//! let files = vec![
//!     PathEntry::new(PathBuf::from("/music/a.mp3")),
//!     PathEntry::new(PathBuf::from("/music/a.m4p")),
//!     PathEntry::new(PathBuf::from("/music/b.mp3")),
//! ];
//!
//! let (groups, stats) = group_by_stem(files);
//!
//! assert_eq!(stats.total_files, 3);
//! assert_eq!(stats.duplicate_files, 2);
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].display_name(), "a");
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::ffi::{OsStr, OsString};

use crate::scanner::PathEntry;

/// Files within one directory that share a name-stem.
///
/// Members are kept sorted by path; that order decides both the name shown
/// in reports and the order in which deletions are considered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    /// Shared name-stem
    pub stem: OsString,
    /// Members, sorted by path
    pub files: Vec<PathEntry>,
}

impl DuplicateGroup {
    /// Create a group, sorting its members.
    #[must_use]
    pub fn new(stem: OsString, mut files: Vec<PathEntry>) -> Self {
        files.sort_by(|a, b| a.path.cmp(&b.path));
        Self { stem, files }
    }

    /// Name shown in the "Found duplicate" line: the stem of the first member.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.files
            .first()
            .map_or_else(|| self.stem.to_string_lossy().into_owned(), PathEntry::stem_lossy)
    }

    /// Members whose extension is in `extensions`, in group order.
    pub fn eligible<'a>(
        &'a self,
        extensions: &'a BTreeSet<String>,
    ) -> impl Iterator<Item = &'a PathEntry> + 'a {
        self.files
            .iter()
            .filter(move |f| extensions.contains(f.extension()))
    }

    /// Shared name-stem.
    #[must_use]
    pub fn stem(&self) -> &OsStr {
        &self.stem
    }

    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Statistics from a grouping pass over one directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupingStats {
    /// Files considered
    pub total_files: usize,
    /// Distinct name-stems among them
    pub unique_stems: usize,
    /// Files that ended up in a duplicate group
    pub duplicate_files: usize,
}

/// Group files by name-stem and keep the groups with 2+ members.
///
/// Groups come back ordered by stem, each with its members sorted by path.
#[must_use]
pub fn group_by_stem(files: Vec<PathEntry>) -> (Vec<DuplicateGroup>, GroupingStats) {
    let total_files = files.len();

    let mut by_stem: BTreeMap<OsString, Vec<PathEntry>> = BTreeMap::new();
    for file in files {
        by_stem.entry(file.stem().to_os_string()).or_default().push(file);
    }

    let unique_stems = by_stem.len();

    let groups: Vec<DuplicateGroup> = by_stem
        .into_iter()
        .filter(|(_, members)| members.len() > 1)
        .map(|(stem, members)| DuplicateGroup::new(stem, members))
        .collect();

    let duplicate_files = groups.iter().map(DuplicateGroup::len).sum();

    log::trace!(
        "Grouped {} files into {} stems, {} duplicate groups",
        total_files,
        unique_stems,
        groups.len()
    );

    (
        groups,
        GroupingStats {
            total_files,
            unique_stems,
            duplicate_files,
        },
    )
}
