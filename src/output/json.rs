//! JSON output formatter for duplicate scan results.
//!
//! Provides machine-readable JSON output for scripting and automation.
//! The rendered shape is a plain array of arrays of absolute path strings,
//! one inner array per duplicate group:
//!
//! ```json
//! [
//!     [
//!         "/data/a/copy1.bin",
//!         "/data/b/copy2.bin"
//!     ]
//! ]
//! ```
//!
//! Paths within a group and groups themselves are sorted, and the pretty
//! form is indented with four spaces, so the output is byte-compatible
//! with prior tooling that consumed this report format.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::duplicates::DuplicateFinder;
//! use dupescan::output::JsonOutput;
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::with_defaults();
//! let (groups, _summary) = finder.find_duplicates(Path::new(".")).unwrap();
//!
//! let output = JsonOutput::new(&groups);
//! println!("{}", output.to_json_pretty().unwrap());
//! ```

use std::io::Write;

use serde::Serialize;

use crate::duplicates::DuplicateGroup;

/// JSON renderer for a set of duplicate groups.
#[derive(Debug)]
pub struct JsonOutput {
    groups: Vec<Vec<String>>,
}

impl JsonOutput {
    /// Create a JSON renderer from duplicate groups.
    ///
    /// Groups are re-sorted defensively (by path within a group, by first
    /// path across groups) so the rendering does not depend on the order
    /// the finder produced them in.
    #[must_use]
    pub fn new(groups: &[DuplicateGroup]) -> Self {
        let mut rendered: Vec<Vec<String>> = groups
            .iter()
            .map(|group| {
                let mut paths: Vec<String> = group
                    .files
                    .iter()
                    .map(|f| f.path.to_string_lossy().into_owned())
                    .collect();
                paths.sort();
                paths
            })
            .collect();
        rendered.sort();
        Self { groups: rendered }
    }

    /// Render as compact JSON on a single line.
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.groups)
    }

    /// Render as pretty-printed JSON, indented with four spaces.
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.groups.serialize(&mut serializer)?;
        // Serialization only ever emits valid UTF-8
        Ok(String::from_utf8(buf).expect("serde_json produced invalid UTF-8"))
    }

    /// Write the report to the given writer, pretty or compact, with a
    /// trailing newline.
    ///
    /// # Errors
    ///
    /// Returns an `std::io::Error` if serialization or the write fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> std::io::Result<()> {
        let body = if pretty {
            self.to_json_pretty()
        } else {
            self.to_json()
        }
        .map_err(std::io::Error::other)?;
        writeln!(writer, "{body}")
    }
}
