//! Command-line interface definitions for dupescan.
//!
//! This module defines all CLI arguments using the clap derive API.
//!
//! # Example
//!
//! ```bash
//! # Scan the current directory
//! dupescan
//!
//! # Scan a specific directory
//! dupescan ~/Downloads
//!
//! # Compact single-line JSON for piping
//! dupescan ~/Downloads --compact
//!
//! # Verbose mode for debugging
//! dupescan -v ~/Downloads
//! ```

use clap::Parser;
use std::path::PathBuf;

/// Find groups of byte-identical files in a directory tree.
///
/// dupescan walks the given root, groups files by size and then by content
/// hash (BLAKE3), and prints every group of two or more exact duplicates as
/// a JSON array of arrays of absolute paths. It never modifies the tree.
#[derive(Debug, Parser)]
#[command(name = "dupescan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to scan for duplicates (defaults to the current directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors and the JSON report
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Number of I/O threads for hashing
    ///
    /// Lower values reduce disk thrashing on HDDs.
    #[arg(long, value_name = "N", default_value = "4")]
    pub threads: usize,

    /// Print compact single-line JSON instead of the indented report
    #[arg(long)]
    pub compact: bool,
}

impl Cli {
    /// The root to scan: the PATH argument, or the current directory when
    /// it was not supplied.
    #[must_use]
    pub fn root(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["dupescan"]);
        assert!(cli.path.is_none());
        assert_eq!(cli.root(), PathBuf::from("."));
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
        assert_eq!(cli.threads, 4);
        assert!(!cli.compact);
    }

    #[test]
    fn test_cli_path_argument() {
        let cli = Cli::parse_from(["dupescan", "/some/dir"]);
        assert_eq!(cli.root(), PathBuf::from("/some/dir"));
    }

    #[test]
    fn test_cli_verbosity_count() {
        let cli = Cli::parse_from(["dupescan", "-vv"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["dupescan", "-q", "-v"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_threads_flag() {
        let cli = Cli::parse_from(["dupescan", "--threads", "8", "."]);
        assert_eq!(cli.threads, 8);
    }
}
