//! Path exclusion by regular expression.
//!
//! Patterns are matched against the whole path string, not just the file
//! name, so a pattern naming a directory excludes that directory (and with
//! it, every descendant, since excluded directories are never listed).

use std::path::Path;

use regex::Regex;

/// An exclusion pattern that is not a valid regular expression.
#[derive(Debug, thiserror::Error)]
#[error("invalid ignore pattern '{pattern}': {source}")]
pub struct PatternError {
    /// The offending pattern text
    pub pattern: String,
    /// The underlying regex error
    #[source]
    pub source: regex::Error,
}

/// Ordered set of exclusion patterns.
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    patterns: Vec<Regex>,
}

impl PathFilter {
    /// Compile the given patterns.
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] for the first pattern that fails to compile.
    ///
    /// # Example
    ///
    /// ```
    /// use namedupe::scanner::PathFilter;
    /// use std::path::Path;
    ///
    /// let filter = PathFilter::new(["Syno", "eaDir"]).unwrap();
    /// assert!(!filter.keep(Path::new("/Music/@eaDir/thumb.jpg")));
    /// assert!(filter.keep(Path::new("/Music/song.mp3")));
    /// ```
    pub fn new<I, S>(patterns: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| {
                let p = p.as_ref();
                Regex::new(p).map_err(|source| PatternError {
                    pattern: p.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// Returns `false` if any pattern matches the path's string form.
    #[must_use]
    pub fn keep(&self, path: &Path) -> bool {
        if self.patterns.is_empty() {
            return true;
        }

        let path_str = path.to_string_lossy();
        !self.patterns.iter().any(|re| re.is_match(&path_str))
    }

    /// Number of configured patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Check if no patterns are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
