//! NameDupe - Same-name duplicate finder
//!
//! Walks a directory tree and, within each directory, groups files that share
//! a name once the extension is removed (`track.mp3`, `track.m4p`). Members of
//! a group whose extension is on the delete-list are offered for deletion,
//! interactively, forcibly, or as a dry run.

pub mod actions;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod scanner;

use std::io::Write;

use anyhow::{Context, Result};

use crate::cli::Cli;
use crate::config::{Config, RunConfig};
use crate::duplicates::DuplicateFinder;
use crate::error::ExitCode;
use crate::output::Terminal;

/// Run the application for parsed command-line arguments.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or validated (for
/// example when the root is not a directory), or if console I/O fails.
/// Failed deletions do not abort the run; they yield
/// [`ExitCode::PartialSuccess`].
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    let config_file = cli.config_file();
    let config = Config::load(config_file.as_deref(), &cli.overrides())?;

    if cli.print_config {
        let text = config
            .to_toml()
            .context("failed to render configuration")?;
        print!("{text}");
        return Ok(ExitCode::Success);
    }

    crate::logging::apply_config_quiet(cli.verbose, config.quiet);

    let run_config = RunConfig::from_config(&config)?;
    log::debug!("Run configuration: {:?}", run_config);

    let mut terminal = Terminal::stdio(run_config.quiet);
    let summary = DuplicateFinder::new(run_config).run(&mut terminal)?;
    terminal
        .into_output()
        .flush()
        .context("failed to flush stdout")?;

    if summary.has_failures() {
        Ok(ExitCode::PartialSuccess)
    } else {
        Ok(ExitCode::Success)
    }
}
