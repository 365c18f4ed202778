//! The scan pipeline: walk, group, report and resolve.
//!
//! # Overview
//!
//! [`DuplicateFinder`] drives one complete run:
//!
//! 1. Walk the tree from the configured root (subdirectories first)
//! 2. Group each directory's files by name-stem
//! 3. For directories with duplicate groups, print the directory heading,
//!    hand every group to the [`DeletionPolicy`], then print a blank line
//!
//! Directories without duplicates produce no output at all.
//!
//! # Example
//!
//! ```no_run
//! use namedupe::config::RunConfig;
//! use namedupe::duplicates::DuplicateFinder;
//! use namedupe::output::Terminal;
//!
//! let config = RunConfig::new("/Music")
//!     .with_delete_extensions([".mp3", ".m4p"])
//!     .with_pretend(true);
//! let mut terminal = Terminal::stdio(config.quiet);
//!
//! let summary = DuplicateFinder::new(config).run(&mut terminal).unwrap();
//! println!("{}", summary.summary());
//! ```

use std::io;
use std::path::PathBuf;

use super::groups::group_by_stem;
use crate::actions::{DeletionPolicy, FileOutcome, Outcome};
use crate::config::RunConfig;
use crate::output::{Prompt, Reporter, SEPARATOR};
use crate::scanner::{DirectoryBatch, ScanError, Walker};

/// Errors that abort a run.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The root could not be walked.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// Console input or output failed.
    #[error("console I/O failed: {0}")]
    Console(#[from] io::Error),
}

/// Totals for a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Directories listed
    pub directories_scanned: usize,
    /// Regular files considered
    pub files_seen: usize,
    /// Entries dropped by exclusion patterns
    pub entries_excluded: usize,
    /// Entries that could not be read
    pub entries_skipped: usize,
    /// Duplicate groups found
    pub duplicate_groups: usize,
    /// Delete-eligible files considered
    pub eligible_files: usize,
    /// Files removed
    pub deleted: usize,
    /// Files the operator chose to keep
    pub declined: usize,
    /// Files that would have been removed in pretend mode
    pub pretended: usize,
    /// Files that could not be removed, with the reason
    pub failures: Vec<(PathBuf, String)>,
    /// Bytes reclaimed by removed files
    pub bytes_freed: u64,
}

impl RunSummary {
    /// Fold one file outcome into the totals.
    pub fn record(&mut self, outcome: &FileOutcome) {
        self.eligible_files += 1;
        match &outcome.outcome {
            Outcome::Deleted(result) => {
                self.deleted += 1;
                self.bytes_freed += result.size;
            }
            Outcome::Pretended => self.pretended += 1,
            Outcome::Declined => self.declined += 1,
            Outcome::Failed(e) => self.failures.push((outcome.path.clone(), e.to_string())),
        }
    }

    /// Check if any deletion failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Human-readable summary of the run.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut text = format!(
            "Scanned {} directories ({} files), found {} duplicate groups; \
             deleted {} file(s), freed {} bytes",
            self.directories_scanned,
            self.files_seen,
            self.duplicate_groups,
            self.deleted,
            self.bytes_freed
        );
        if self.pretended > 0 {
            text.push_str(&format!(", {} pretended", self.pretended));
        }
        if self.declined > 0 {
            text.push_str(&format!(", {} kept", self.declined));
        }
        if self.has_failures() {
            text.push_str(&format!(", {} failed", self.failures.len()));
        }
        text
    }
}

/// Runs the walk-group-resolve pipeline for one configuration.
#[derive(Debug)]
pub struct DuplicateFinder {
    config: RunConfig,
}

impl DuplicateFinder {
    /// Create a finder for the given run configuration.
    #[must_use]
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// The run configuration.
    #[must_use]
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Walk the tree and resolve every duplicate group.
    ///
    /// # Errors
    ///
    /// - [`FinderError::Scan`] if the root is missing, not a directory, or
    ///   cannot be listed
    /// - [`FinderError::Console`] if writing output or reading an answer fails
    pub fn run<C>(&self, console: &mut C) -> Result<RunSummary, FinderError>
    where
        C: Reporter + Prompt,
    {
        log::info!("Scanning {}", self.config.root.display());

        let mut walker = Walker::new(&self.config.root, self.config.filter.clone())?;
        let policy = DeletionPolicy::new(&self.config);
        let mut summary = RunSummary::default();

        for batch in walker.by_ref() {
            self.process_directory(batch, &policy, console, &mut summary)?;
        }

        let stats = walker.stats();
        summary.directories_scanned = stats.directories;
        summary.files_seen = stats.files;
        summary.entries_excluded = stats.excluded;
        summary.entries_skipped = stats.skipped;

        log::info!("{}", summary.summary());
        for (path, reason) in &summary.failures {
            log::warn!("Not deleted: {} ({})", path.display(), reason);
        }

        Ok(summary)
    }

    fn process_directory<C>(
        &self,
        batch: DirectoryBatch,
        policy: &DeletionPolicy<'_>,
        console: &mut C,
        summary: &mut RunSummary,
    ) -> io::Result<()>
    where
        C: Reporter + Prompt,
    {
        let (groups, _stats) = group_by_stem(batch.files);
        if groups.is_empty() {
            return Ok(());
        }

        console.say(&batch.dir.display().to_string())?;
        console.say(SEPARATOR)?;

        for group in &groups {
            summary.duplicate_groups += 1;
            for outcome in policy.resolve_group(group, console)? {
                summary.record(&outcome);
            }
        }

        console.say("")
    }
}
