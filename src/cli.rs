//! Command-line interface definitions for NameDupe.
//!
//! There are no subcommands: every run scans one directory tree and walks
//! through the duplicate groups it finds.
//!
//! # Example
//!
//! ```bash
//! # Ask before deleting each .mp3/.m4p that has a same-name sibling
//! namedupe ~/Music
//!
//! # Show what would be deleted without touching anything
//! namedupe ~/Music --force --pretend
//!
//! # Custom delete-list and exclusions
//! namedupe ~/Music -e .wav -e .aiff -i '@eaDir' -i '\.sync'
//! ```

use clap::Parser;
use std::path::PathBuf;

use crate::config::Overrides;

/// Find files that share a name but differ in extension, and delete the
/// unwanted copies.
///
/// Within each directory, files whose names match once the extension is
/// removed (track.mp3, track.m4p, track.flac) form a duplicate group.
/// Members whose extension is on the delete-list are offered for deletion.
#[derive(Debug, Parser)]
#[command(name = "namedupe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to scan (overrides `root` from the config file)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Extension eligible for deletion (repeatable; replaces the configured list)
    #[arg(short = 'e', long = "delete-ext", value_name = "EXT")]
    pub delete_extensions: Vec<String>,

    /// Regex for paths to skip entirely (repeatable; replaces the configured list)
    #[arg(short, long = "ignore", value_name = "PATTERN")]
    pub ignore_patterns: Vec<String>,

    /// Delete eligible files without asking
    #[arg(short, long, overrides_with = "no_force")]
    pub force: bool,

    /// Ask before each deletion even if the config enables force
    #[arg(long, overrides_with = "force")]
    pub no_force: bool,

    /// Report what would be deleted, but never delete
    #[arg(short = 'n', long, visible_alias = "dry-run", overrides_with = "no_pretend")]
    pub pretend: bool,

    /// Really delete even if the config enables pretend
    #[arg(long, overrides_with = "pretend")]
    pub no_pretend: bool,

    /// Suppress progress output (prompts are still shown)
    #[arg(short, long, conflicts_with = "verbose", overrides_with = "no_quiet")]
    pub quiet: bool,

    /// Show progress output even if the config enables quiet
    #[arg(long, overrides_with = "quiet")]
    pub no_quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Move files to the system trash instead of deleting them
    #[arg(long, overrides_with = "no_trash")]
    pub trash: bool,

    /// Delete permanently even if the config enables trash
    #[arg(long, overrides_with = "trash")]
    pub no_trash: bool,

    /// Config file to read instead of the platform default
    #[arg(short, long, value_name = "FILE", conflicts_with = "no_config")]
    pub config: Option<PathBuf>,

    /// Do not read any config file
    #[arg(long)]
    pub no_config: bool,

    /// Print the merged configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Cli {
    /// Config file to read, if any.
    #[must_use]
    pub fn config_file(&self) -> Option<PathBuf> {
        if self.no_config {
            None
        } else {
            self.config.clone().or_else(crate::config::Config::default_path)
        }
    }

    /// Values given on the command line, for the top config layer.
    #[must_use]
    pub fn overrides(&self) -> Overrides {
        Overrides {
            root: self.path.clone(),
            delete_extensions: non_empty(&self.delete_extensions),
            ignore_patterns: non_empty(&self.ignore_patterns),
            force: switch(self.force, self.no_force),
            pretend: switch(self.pretend, self.no_pretend),
            quiet: switch(self.quiet, self.no_quiet),
            trash: switch(self.trash, self.no_trash),
        }
    }
}

/// `--flag` / `--no-flag` pair; `None` when neither was given.
fn switch(on: bool, off: bool) -> Option<bool> {
    if on {
        Some(true)
    } else if off {
        Some(false)
    } else {
        None
    }
}

fn non_empty(values: &[String]) -> Option<Vec<String>> {
    (!values.is_empty()).then(|| values.to_vec())
}
