//! Operator-facing console output and confirmation prompts.
//!
//! The pipeline talks to the operator through two small traits:
//! - [`Reporter`] for progress lines (suppressed in quiet mode)
//! - [`Prompt`] for blocking yes/no confirmation of a single deletion
//!
//! [`Terminal`] implements both over any reader/writer pair, which is how
//! the binary binds them to stdin/stdout and how tests script the operator.
//!
//! # Example
//!
//! ```
//! use namedupe::output::{Prompt, Reporter, Terminal};
//!
//! let mut term = Terminal::new(&b"y\n"[..], Vec::new(), false);
//! term.say("Found duplicate track").unwrap();
//! assert!(term.confirm("Delete track.mp3?").unwrap());
//! ```

pub mod terminal;

use std::io;

pub use terminal::Terminal;

/// Separator printed under a directory heading.
pub const SEPARATOR: &str = "==========";

/// Sink for human-readable progress lines.
pub trait Reporter {
    /// Write one literal line.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    fn say(&mut self, line: &str) -> io::Result<()>;
}

/// Source of operator confirmation.
pub trait Prompt {
    /// Ask the operator whether to proceed; blocks until an answer arrives.
    ///
    /// Returns `true` only for answers starting with `y` or `Y`.
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt cannot be written or the answer read.
    fn confirm(&mut self, message: &str) -> io::Result<bool>;
}

/// Interpret an operator answer: trimmed, non-empty, first char `y`/`Y`.
#[must_use]
pub fn is_affirmative(answer: &str) -> bool {
    answer
        .trim()
        .chars()
        .next()
        .is_some_and(|c| c.eq_ignore_ascii_case(&'y'))
}
