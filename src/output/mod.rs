//! Output formatters for duplicate scan results.
//!
//! The report format is JSON: an array of arrays of absolute file path
//! strings, each inner array one duplicate group. See [`json`].

pub mod json;

// Re-export main types
pub use json::JsonOutput;
