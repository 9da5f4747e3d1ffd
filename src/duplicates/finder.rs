//! Duplicate finder implementation with two-phase detection.
//!
//! # Overview
//!
//! This module orchestrates the duplicate detection pipeline:
//! 1. **Walk**: collect every regular file under the root (see [`crate::scanner::walker`])
//! 2. **Phase 1 - Size grouping**: group files by size (see [`crate::duplicates::groups`])
//! 3. **Phase 2 - Digest grouping**: hash the full content of same-size files
//!    and keep only groups where two or more digests match
//!
//! The pipeline is linear with no retries. It has exactly one fatal failure
//! (an invalid root), one cancellation exit, and one success terminal (a
//! possibly empty set of duplicate groups). Per-file errors anywhere in the
//! middle are absorbed: the offending file is dropped and its size-siblings
//! are still processed.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::duplicates::{DuplicateFinder, FinderConfig};
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::new(FinderConfig::default().with_io_threads(4));
//! let (groups, summary) = finder.find_duplicates(Path::new("/some/path")).unwrap();
//!
//! println!("Found {} duplicate groups", summary.duplicate_groups);
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;

use crate::scanner::{hash_to_hex, FileEntry, Hash, HashError, Hasher, ScanError, Walker};

use super::groups::{group_by_size, DuplicateGroup};

/// Configuration for the duplicate finder.
#[derive(Debug, Clone)]
pub struct FinderConfig {
    /// Number of I/O threads for parallel hashing.
    /// Default is 4 to prevent disk thrashing.
    pub io_threads: usize,
    /// Optional shutdown flag for graceful termination.
    pub shutdown_flag: Option<Arc<AtomicBool>>,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            io_threads: 4,
            shutdown_flag: None,
        }
    }
}

impl FinderConfig {
    /// Create a new configuration with custom I/O thread count.
    #[must_use]
    pub fn with_io_threads(mut self, threads: usize) -> Self {
        self.io_threads = threads.max(1);
        self
    }

    /// Set the shutdown flag for graceful termination.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Check if shutdown has been requested.
    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }
}

/// Statistics from the digest grouping phase.
#[derive(Debug, Default)]
pub struct DigestStats {
    /// Total files that entered the digest phase
    pub input_files: usize,
    /// Number of files successfully hashed
    pub hashed_files: usize,
    /// Number of files that failed to hash (I/O errors)
    pub failed_files: usize,
    /// Errors encountered while hashing
    pub errors: Vec<HashError>,
    /// Total bytes hashed across all files
    pub bytes_hashed: u64,
    /// Number of confirmed duplicate groups
    pub duplicate_groups: usize,
    /// Number of confirmed duplicate files (excluding originals)
    pub duplicate_files: usize,
    /// Total space wasted by duplicates
    pub wasted_space: u64,
    /// Whether the phase was interrupted by shutdown
    pub interrupted: bool,
}

/// Group same-size files by content digest (phase 2 of duplicate detection).
///
/// For each size group, computes the full-content digest of every file and
/// partitions by digest equality. Only groups of two or more files survive.
/// A file whose digest cannot be computed is dropped silently; the rest of
/// its size group is still processed.
///
/// Hashing is parallelized across files with a bounded rayon pool. The
/// grouping result is identical to the sequential result: parallelism
/// affects wall-clock time only, and the returned groups are sorted.
///
/// # Returns
///
/// A tuple of:
/// - `Vec<DuplicateGroup>` - Confirmed duplicate groups, paths sorted within
///   each group, groups sorted by their first path
/// - [`DigestStats`] - Statistics about the digest phase
#[must_use]
pub fn group_by_digest(
    size_groups: HashMap<u64, Vec<FileEntry>>,
    hasher: Arc<Hasher>,
    config: &FinderConfig,
) -> (Vec<DuplicateGroup>, DigestStats) {
    let input_files: usize = size_groups.values().map(Vec::len).sum();
    let mut stats = DigestStats {
        input_files,
        ..Default::default()
    };

    let all_files: Vec<FileEntry> = size_groups.into_values().flatten().collect();

    if all_files.is_empty() {
        log::debug!("Digest phase: no files to process");
        return (Vec::new(), stats);
    }

    log::info!("Digest phase: hashing {} files", all_files.len());

    // Bounded pool keeps disk seeks under control on spinning media
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.io_threads)
        .build()
        .unwrap_or_else(|_| {
            log::warn!(
                "Failed to create custom thread pool, using global pool with {} threads",
                rayon::current_num_threads()
            );
            rayon::ThreadPoolBuilder::new().build().unwrap()
        });

    // None marks a file skipped because shutdown was requested mid-phase
    let digest_results: Vec<Option<(FileEntry, Result<Hash, HashError>)>> = pool.install(|| {
        all_files
            .into_par_iter()
            .map(|file| {
                if config.is_shutdown_requested() {
                    log::debug!("Digest phase: shutdown requested, skipping remaining files");
                    return None;
                }

                let result = hasher.full_hash(&file.path);
                if let Err(ref e) = result {
                    log::debug!("Skipping unreadable file {}: {}", file.path.display(), e);
                }
                Some((file, result))
            })
            .collect()
    });

    if config.is_shutdown_requested() {
        stats.interrupted = true;
        log::info!("Digest phase: interrupted by shutdown signal");
    }

    let mut digest_groups: HashMap<Hash, Vec<FileEntry>> = HashMap::new();

    for entry in digest_results.into_iter().flatten() {
        let (file, result) = entry;
        match result {
            Ok(digest) => {
                stats.hashed_files += 1;
                stats.bytes_hashed += file.size;
                digest_groups.entry(digest).or_default().push(file);
            }
            Err(e) => {
                stats.failed_files += 1;
                stats.errors.push(e);
            }
        }
    }

    let mut duplicate_groups: Vec<DuplicateGroup> = digest_groups
        .into_iter()
        .filter(|(_, files)| files.len() > 1)
        .map(|(hash, files)| {
            let size = files.first().map_or(0, |f| f.size);
            log::debug!(
                "Duplicate group {}: {} files, {} bytes each",
                hash_to_hex(&hash),
                files.len(),
                size
            );
            DuplicateGroup::new(hash, size, files)
        })
        .collect();

    // HashMap iteration order is arbitrary; sort for a deterministic result
    duplicate_groups.sort_by(|a, b| a.files[0].path.cmp(&b.files[0].path));

    stats.duplicate_groups = duplicate_groups.len();
    stats.duplicate_files = duplicate_groups.iter().map(DuplicateGroup::duplicate_count).sum();
    stats.wasted_space = duplicate_groups.iter().map(DuplicateGroup::wasted_space).sum();

    log::info!(
        "Digest phase complete: {} groups, {} duplicates, {} reclaimable",
        stats.duplicate_groups,
        stats.duplicate_files,
        format_size(stats.wasted_space)
    );

    (duplicate_groups, stats)
}

/// Summary statistics from a duplicate scan.
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Total number of files discovered by the walk
    pub total_files: usize,
    /// Total size of all discovered files in bytes
    pub total_size: u64,
    /// Number of files eliminated by size grouping (unique sizes)
    pub eliminated_by_size: usize,
    /// Number of zero-byte files dropped
    pub empty_files: usize,
    /// Number of confirmed duplicate groups
    pub duplicate_groups: usize,
    /// Total number of duplicate files (excluding originals)
    pub duplicate_files: usize,
    /// Total space that can be reclaimed by removing duplicates
    pub reclaimable_space: u64,
    /// Duration of the entire scan
    pub scan_duration: std::time::Duration,
    /// Entries skipped during the walk (unreadable directory, vanished file)
    pub scan_errors: Vec<ScanError>,
    /// Files skipped during digesting (could not be opened or read)
    pub hash_errors: Vec<HashError>,
}

impl ScanSummary {
    /// Total number of paths that were skipped rather than processed.
    #[must_use]
    pub fn skipped_paths(&self) -> usize {
        self.scan_errors.len() + self.hash_errors.len()
    }

    /// Format reclaimable space as a human-readable string.
    #[must_use]
    pub fn reclaimable_display(&self) -> String {
        format_size(self.reclaimable_space)
    }
}

/// Format a byte size as a human-readable string.
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.2} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Errors that abort a duplicate scan.
///
/// Only an invalid root and cancellation propagate to the caller; every
/// per-file error is absorbed inside the pipeline.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The root path does not exist.
    #[error("Root path not found: {0}")]
    RootNotFound(PathBuf),

    /// The root path exists but is not a directory.
    #[error("Root path is not a directory: {0}")]
    RootNotADirectory(PathBuf),

    /// The scan was interrupted (Ctrl+C or shutdown signal).
    #[error("Scan interrupted by user")]
    Interrupted,
}

/// Duplicate finder that orchestrates the detection pipeline.
///
/// # Example
///
/// ```no_run
/// use dupescan::duplicates::DuplicateFinder;
/// use std::path::Path;
///
/// let finder = DuplicateFinder::with_defaults();
/// match finder.find_duplicates(Path::new(".")) {
///     Ok((groups, summary)) => {
///         println!("Found {} duplicate groups", groups.len());
///         println!("Can reclaim {}", summary.reclaimable_display());
///     }
///     Err(e) => eprintln!("Scan failed: {}", e),
/// }
/// ```
pub struct DuplicateFinder {
    config: FinderConfig,
    hasher: Arc<Hasher>,
}

impl DuplicateFinder {
    /// Create a new duplicate finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        Self {
            config,
            hasher: Arc::new(Hasher::new()),
        }
    }

    /// Create a new duplicate finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// Find all duplicate files starting from the given root.
    ///
    /// Runs the complete pipeline (walk, size grouping, digest grouping)
    /// and returns confirmed duplicate groups along with summary
    /// statistics. The result is deterministic for an unmodified tree:
    /// paths within a group and groups themselves are sorted.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError`] if:
    /// - The root does not exist or is not a directory
    /// - The scan is interrupted by the shutdown signal
    ///
    /// Per-file errors never abort the scan; the affected files are
    /// excluded from the result and recorded in the summary.
    pub fn find_duplicates(
        &self,
        root: &Path,
    ) -> Result<(Vec<DuplicateGroup>, ScanSummary), FinderError> {
        let start_time = std::time::Instant::now();
        let mut summary = ScanSummary::default();

        // The only fatal validation, surfaced before any work is done
        if !root.exists() {
            return Err(FinderError::RootNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(FinderError::RootNotADirectory(root.to_path_buf()));
        }

        // Emitted paths are absolute regardless of how the root was given
        let root = std::fs::canonicalize(root)
            .map_err(|_| FinderError::RootNotFound(root.to_path_buf()))?;

        log::info!("Starting duplicate scan of {}", root.display());

        if self.config.is_shutdown_requested() {
            return Err(FinderError::Interrupted);
        }

        let mut walker = Walker::new(&root);
        if let Some(ref flag) = self.config.shutdown_flag {
            walker = walker.with_shutdown_flag(flag.clone());
        }

        let mut files = Vec::new();
        for result in walker.walk() {
            match result {
                Ok(file) => files.push(file),
                Err(e) => summary.scan_errors.push(e),
            }
        }

        if self.config.is_shutdown_requested() {
            return Err(FinderError::Interrupted);
        }

        summary.total_files = files.len();
        summary.total_size = files.iter().map(|f| f.size).sum();

        log::info!(
            "Found {} files ({})",
            summary.total_files,
            format_size(summary.total_size)
        );

        let (size_groups, size_stats) = group_by_size(files);
        summary.eliminated_by_size = size_stats.eliminated_unique;
        summary.empty_files = size_stats.empty_files;

        if self.config.is_shutdown_requested() {
            return Err(FinderError::Interrupted);
        }

        let (duplicate_groups, digest_stats) =
            group_by_digest(size_groups, self.hasher.clone(), &self.config);

        summary.hash_errors = digest_stats.errors;

        if digest_stats.interrupted || self.config.is_shutdown_requested() {
            return Err(FinderError::Interrupted);
        }

        summary.duplicate_groups = digest_stats.duplicate_groups;
        summary.duplicate_files = digest_stats.duplicate_files;
        summary.reclaimable_space = digest_stats.wasted_space;
        summary.scan_duration = start_time.elapsed();

        log::info!(
            "Scan complete: {} duplicate groups, {} duplicate files, {} reclaimable, {} skipped",
            summary.duplicate_groups,
            summary.duplicate_files,
            summary.reclaimable_display(),
            summary.skipped_paths()
        );

        Ok((duplicate_groups, summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
        let path = dir.join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(contents).unwrap();
        path
    }

    #[test]
    fn test_finder_root_not_found() {
        let finder = DuplicateFinder::with_defaults();
        let err = finder
            .find_duplicates(Path::new("/nonexistent/path/12345"))
            .unwrap_err();
        assert!(matches!(err, FinderError::RootNotFound(_)));
    }

    #[test]
    fn test_finder_root_not_a_directory() {
        let dir = TempDir::new().unwrap();
        let file = write_file(dir.path(), "plain.txt", b"contents");

        let finder = DuplicateFinder::with_defaults();
        let err = finder.find_duplicates(&file).unwrap_err();
        assert!(matches!(err, FinderError::RootNotADirectory(_)));
    }

    #[test]
    fn test_finder_interrupted_before_work() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "a.txt", b"data");

        let flag = Arc::new(AtomicBool::new(true));
        let finder =
            DuplicateFinder::new(FinderConfig::default().with_shutdown_flag(flag));

        let err = finder.find_duplicates(dir.path()).unwrap_err();
        assert!(matches!(err, FinderError::Interrupted));
    }

    #[test]
    fn test_finder_detects_duplicates() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "a.txt", b"same contents");
        write_file(dir.path(), "b.txt", b"same contents");
        write_file(dir.path(), "c.txt", b"other contents!");

        let finder = DuplicateFinder::with_defaults();
        let (groups, summary) = finder.find_duplicates(dir.path()).unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 2);
        assert_eq!(summary.total_files, 3);
        assert_eq!(summary.duplicate_groups, 1);
        assert_eq!(summary.duplicate_files, 1);
        assert_eq!(summary.reclaimable_space, 13);
    }

    #[test]
    fn test_finder_same_size_different_content() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "a.txt", b"aaaa");
        write_file(dir.path(), "b.txt", b"bbbb");

        let finder = DuplicateFinder::with_defaults();
        let (groups, summary) = finder.find_duplicates(dir.path()).unwrap();

        assert!(groups.is_empty());
        assert_eq!(summary.eliminated_by_size, 0);
        assert_eq!(summary.duplicate_groups, 0);
    }

    #[test]
    fn test_finder_emits_absolute_sorted_paths() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "zz.txt", b"pair");
        write_file(dir.path(), "aa.txt", b"pair");

        let finder = DuplicateFinder::with_defaults();
        let (groups, _) = finder.find_duplicates(dir.path()).unwrap();

        assert_eq!(groups.len(), 1);
        let paths = groups[0].paths();
        assert!(paths.iter().all(|p| p.is_absolute()));
        assert!(paths[0] < paths[1]);
        assert!(paths[0].ends_with("aa.txt"));
    }

    #[test]
    fn test_group_by_digest_empty_input() {
        let (groups, stats) = group_by_digest(
            HashMap::new(),
            Arc::new(Hasher::new()),
            &FinderConfig::default(),
        );
        assert!(groups.is_empty());
        assert_eq!(stats.input_files, 0);
    }

    #[test]
    fn test_group_by_digest_skips_missing_file() {
        let dir = TempDir::new().unwrap();
        let a = write_file(dir.path(), "a.txt", b"pair");
        let b = write_file(dir.path(), "b.txt", b"pair");

        let mut size_groups: HashMap<u64, Vec<FileEntry>> = HashMap::new();
        size_groups.insert(
            4,
            vec![
                FileEntry::new(a, 4),
                FileEntry::new(b, 4),
                FileEntry::new(dir.path().join("vanished.txt"), 4),
            ],
        );

        let (groups, stats) = group_by_digest(
            size_groups,
            Arc::new(Hasher::new()),
            &FinderConfig::default(),
        );

        // The vanished file is dropped; its siblings still pair up
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 2);
        assert_eq!(stats.failed_files, 1);
        assert_eq!(stats.hashed_files, 2);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.00 MB");
    }
}
