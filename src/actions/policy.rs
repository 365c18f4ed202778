//! Deciding what happens to each member of a duplicate group.
//!
//! Only members whose extension is on the delete-list are ever considered.
//! Each of them is decided on its own: the operator is asked (unless force
//! mode is on), the decision is announced, and the file is removed unless
//! pretend mode is on. A failed removal is logged and recorded; the
//! remaining members are still processed.

use std::io;
use std::path::{Path, PathBuf};

use super::delete::{delete_file, DeleteError, DeleteResult};
use crate::config::RunConfig;
use crate::duplicates::DuplicateGroup;
use crate::output::{Prompt, Reporter};

/// What happened to one delete-eligible file.
#[derive(Debug)]
pub enum Outcome {
    /// The file was removed.
    Deleted(DeleteResult),
    /// Removal was announced but skipped because of pretend mode.
    Pretended,
    /// The operator declined.
    Declined,
    /// Removal was attempted and failed.
    Failed(DeleteError),
}

/// Outcome for a specific path.
#[derive(Debug)]
pub struct FileOutcome {
    /// The eligible file
    pub path: PathBuf,
    /// What happened to it
    pub outcome: Outcome,
}

/// Applies the run's force/pretend/delete-list settings to duplicate groups.
#[derive(Debug, Clone, Copy)]
pub struct DeletionPolicy<'a> {
    config: &'a RunConfig,
}

impl<'a> DeletionPolicy<'a> {
    /// Create a policy reading from the given run configuration.
    #[must_use]
    pub fn new(config: &'a RunConfig) -> Self {
        Self { config }
    }

    /// Report a group and resolve each of its delete-eligible members in order.
    ///
    /// # Errors
    ///
    /// Returns an error only if console I/O fails. Deletion failures are
    /// reported through [`Outcome::Failed`].
    pub fn resolve_group<C>(
        &self,
        group: &DuplicateGroup,
        console: &mut C,
    ) -> io::Result<Vec<FileOutcome>>
    where
        C: Reporter + Prompt,
    {
        console.say(&format!("Found duplicate {}", group.display_name()))?;

        group
            .eligible(&self.config.delete_extensions)
            .map(|file| self.resolve_one(&file.path, console))
            .collect()
    }

    /// Decide and act on a single delete-eligible file.
    ///
    /// # Errors
    ///
    /// Returns an error only if console I/O fails.
    pub fn resolve_one<C>(&self, path: &Path, console: &mut C) -> io::Result<FileOutcome>
    where
        C: Reporter + Prompt,
    {
        let outcome = self.decide(path, console)?;
        Ok(FileOutcome {
            path: path.to_path_buf(),
            outcome,
        })
    }

    fn decide<C>(&self, path: &Path, console: &mut C) -> io::Result<Outcome>
    where
        C: Reporter + Prompt,
    {
        if !self.config.force && !console.confirm(&format!("Delete {}?", path.display()))? {
            log::debug!("Kept {}", path.display());
            return Ok(Outcome::Declined);
        }

        console.say(&format!("Deleting file: {}", path.display()))?;

        if self.config.pretend {
            log::debug!("Pretend mode, not deleting {}", path.display());
            return Ok(Outcome::Pretended);
        }

        match delete_file(path, self.config.delete_method) {
            Ok(result) => Ok(Outcome::Deleted(result)),
            Err(e) => {
                log::error!("Failed to delete {}: {}", path.display(), e);
                Ok(Outcome::Failed(e))
            }
        }
    }
}
