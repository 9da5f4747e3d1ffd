//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Size-based file grouping (phase 1)
//! - Content digest grouping (phase 2)
//! - Pipeline orchestration via [`DuplicateFinder`]

pub mod finder;
pub mod groups;

// Re-export main types
pub use finder::{
    group_by_digest, DigestStats, DuplicateFinder, FinderConfig, FinderError, ScanSummary,
};
pub use groups::{group_by_size, DuplicateGroup, GroupingStats};
