//! dupescan - Duplicate File Finder
//!
//! A cross-platform Rust CLI tool that identifies groups of byte-identical
//! files within a directory tree using two-phase grouping: by file size,
//! then by content hash (BLAKE3). The result is printed as a JSON array of
//! arrays of absolute paths; the tree itself is never modified.

pub mod cli;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod scanner;
pub mod signal;

use crate::cli::Cli;
use crate::duplicates::{DuplicateFinder, FinderConfig, FinderError};
use crate::error::ExitCode;
use crate::output::JsonOutput;

/// Run the application logic for the parsed CLI arguments.
///
/// Initializes logging and signal handling, runs the duplicate scan, and
/// prints the JSON report to stdout (also when it is empty). Invalid-root
/// and interruption failures are returned as errors for `main` to map to
/// exit codes.
///
/// # Errors
///
/// Returns an error if the root is invalid, the scan is interrupted, or
/// the report cannot be written.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    let handler = signal::install_handler()?;

    let config = FinderConfig::default()
        .with_io_threads(cli.threads)
        .with_shutdown_flag(handler.get_flag());
    let finder = DuplicateFinder::new(config);

    let (groups, summary) = finder.find_duplicates(&cli.root())?;

    log::info!(
        "{} duplicate groups, {} reclaimable, scanned in {:?}",
        summary.duplicate_groups,
        summary.reclaimable_display(),
        summary.scan_duration
    );

    let output = JsonOutput::new(&groups);
    output.write_to(&mut std::io::stdout().lock(), !cli.compact)?;

    Ok(ExitCode::Success)
}

/// Map an application error to the exit code it should terminate with.
#[must_use]
pub fn exit_code_for_error(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<FinderError>() {
        Some(FinderError::Interrupted) => ExitCode::Interrupted,
        Some(FinderError::RootNotFound(_) | FinderError::RootNotADirectory(_)) => {
            ExitCode::UsageError
        }
        None => ExitCode::GeneralError,
    }
}
