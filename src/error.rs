//! Process exit codes.

/// Exit codes for the dupescan application.
///
/// - 0: Success (scan completed, report printed, even when empty)
/// - 1: General error (unexpected failure)
/// - 2: Usage error (root path missing or not a directory)
/// - 130: Interrupted by user (Ctrl+C)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success: the scan completed and the report was printed.
    Success = 0,
    /// General error: an unexpected error occurred.
    GeneralError = 1,
    /// Usage error: the root path is invalid.
    UsageError = 2,
    /// Interrupted: the scan was interrupted by the user (Ctrl+C).
    Interrupted = 130,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}
