//! Line-oriented terminal backed by a reader and a writer.

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use super::{is_affirmative, Prompt, Reporter};

/// Console for progress lines and confirmation prompts.
///
/// Progress lines are dropped when `quiet` is set. Prompts are always
/// written.
#[derive(Debug)]
pub struct Terminal<R, W> {
    input: R,
    output: W,
    quiet: bool,
}

impl Terminal<StdinLock<'static>, Stdout> {
    /// Terminal bound to the process's stdin and stdout.
    #[must_use]
    pub fn stdio(quiet: bool) -> Self {
        Self::new(io::stdin().lock(), io::stdout(), quiet)
    }
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    /// Create a terminal over the given reader and writer.
    #[must_use]
    pub fn new(input: R, output: W, quiet: bool) -> Self {
        Self {
            input,
            output,
            quiet,
        }
    }

    /// Whether progress lines are suppressed.
    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Consume the terminal, returning the writer.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Reporter for Terminal<R, W> {
    fn say(&mut self, line: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(self.output, "{line}")
    }
}

impl<R: BufRead, W: Write> Prompt for Terminal<R, W> {
    fn confirm(&mut self, message: &str) -> io::Result<bool> {
        write!(self.output, "{message} [y|N] ")?;
        self.output.flush()?;

        // Raw bytes: an answer that is not UTF-8 is just another "no".
        let mut answer = Vec::new();
        if self.input.read_until(b'\n', &mut answer)? == 0 {
            // End of input: nobody is left to say yes.
            writeln!(self.output)?;
            log::debug!("No answer on input, treating as decline");
            return Ok(false);
        }

        Ok(is_affirmative(&String::from_utf8_lossy(&answer)))
    }
}
