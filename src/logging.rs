//! Logging infrastructure for NameDupe.
//!
//! Diagnostics use the `log` facade with the `env_logger` backend and go to
//! stderr, so they never interleave with the progress lines on stdout.
//! Log levels are determined by (in priority order):
//!
//! 1. `RUST_LOG` environment variable (if set)
//! 2. CLI flags: `--quiet` (error only) or `-v`/`-vv`/`-vvv`
//! 3. `quiet` from the config file or environment (error only, see
//!    [`apply_config_quiet`])
//! 4. Default: warn level
//!
//! # Example
//!
//! ```rust,no_run
//! use namedupe::logging::init_logging;
//!
//! // Warnings and errors only
//! init_logging(0, false);
//! ```

use env_logger::Builder;
use log::LevelFilter;
use std::env;
use std::io::Write;

/// Initialize the logging subsystem based on CLI verbosity flags.
///
/// # Panics
///
/// Panics if called more than once, as `env_logger` can only be
/// initialized once per process.
pub fn init_logging(verbose: u8, quiet: bool) {
    let use_env = env::var("RUST_LOG").is_ok();

    let mut builder = Builder::new();

    if use_env {
        builder.parse_default_env();
    } else {
        builder.filter_level(determine_level(verbose, quiet));
    }

    configure_format(&mut builder, verbose);
    builder.init();

    log::debug!("Logging initialized at level: {:?}", log::max_level());
}

/// Lower logging to errors when `quiet` came from the config layers.
///
/// Logging is initialized before the configuration is loaded, so a
/// `quiet = true` from the config file or `NAMEDUPE_QUIET` is applied here.
/// `RUST_LOG` and `-v` flags still win.
pub fn apply_config_quiet(verbose: u8, quiet: bool) {
    let use_env = env::var("RUST_LOG").is_ok();
    if let Some(level) = config_quiet_level(verbose, quiet, use_env) {
        log::set_max_level(level);
    }
}

fn config_quiet_level(verbose: u8, quiet: bool, use_env: bool) -> Option<LevelFilter> {
    (quiet && verbose == 0 && !use_env).then_some(LevelFilter::Error)
}

/// Determine the log level from CLI flags.
fn determine_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Compact `LEVEL message` lines; module path added from `-vv` up.
fn configure_format(builder: &mut Builder, verbose: u8) {
    builder.format(move |buf, record| {
        let level = record.level();
        let level_style = buf.default_level_style(level);

        if verbose >= 2 {
            writeln!(
                buf,
                "{} {level_style}{:<5}{level_style:#} [{}] {}",
                buf.timestamp_seconds(),
                level,
                record.module_path().unwrap_or("unknown"),
                record.args()
            )
        } else {
            writeln!(
                buf,
                "{level_style}{:<5}{level_style:#} {}",
                level,
                record.args()
            )
        }
    });
}
