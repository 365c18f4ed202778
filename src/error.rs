//! Exit codes.

/// Exit codes for the NameDupe application.
///
/// - 0: Success (completed normally)
/// - 1: General error (bad configuration, invalid root, console failure)
/// - 3: Partial success (completed, but some deletions failed)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success: Run completed normally.
    Success = 0,
    /// General error: The run could not start or was aborted.
    GeneralError = 1,
    /// Partial success: Run completed but some files could not be deleted.
    PartialSuccess = 3,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "ND000",
            Self::GeneralError => "ND001",
            Self::PartialSuccess => "ND003",
        }
    }
}
