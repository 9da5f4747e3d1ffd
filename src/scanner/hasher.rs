//! BLAKE3 file hasher with streaming support.
//!
//! # Overview
//!
//! This module provides the [`Hasher`] struct for computing BLAKE3 digests
//! of file contents. Files are read in fixed-size chunks so memory use stays
//! constant regardless of file size.
//!
//! The digest value is an implementation detail of duplicate detection:
//! callers must not rely on it being stable across algorithm changes. Any
//! collision-resistant content hash would serve; BLAKE3 is used because it
//! is cryptographically secure and considerably faster than SHA-256.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::HashError;

/// A BLAKE3 digest (32 bytes).
pub type Hash = [u8; 32];

/// Read buffer size for streaming hashing.
const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Computes content digests of files.
///
/// Stateless; a single instance can be shared across threads.
///
/// # Example
///
/// ```no_run
/// use dupescan::scanner::Hasher;
/// use std::path::Path;
///
/// let hasher = Hasher::new();
/// let digest = hasher.full_hash(Path::new("/some/file")).unwrap();
/// ```
#[derive(Debug, Default)]
pub struct Hasher;

impl Hasher {
    /// Create a new hasher.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Compute the digest of a file's entire contents.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or a read fails
    /// partway through. Callers treat this as "skip the file", never as a
    /// fatal condition.
    pub fn full_hash(&self, path: &Path) -> Result<Hash, HashError> {
        let mut file =
            File::open(path).map_err(|e| HashError::from_io(path.to_path_buf(), e))?;

        let mut hasher = blake3::Hasher::new();
        let mut buffer = [0u8; READ_BUFFER_SIZE];

        loop {
            let n = file
                .read(&mut buffer)
                .map_err(|e| HashError::from_io(path.to_path_buf(), e))?;
            if n == 0 {
                break;
            }
            hasher.update(&buffer[..n]);
        }

        Ok(*hasher.finalize().as_bytes())
    }
}

/// Encode a digest as a lowercase hexadecimal string.
#[must_use]
pub fn hash_to_hex(hash: &Hash) -> String {
    let mut hex = String::with_capacity(64);
    for byte in hash {
        use std::fmt::Write;
        let _ = write!(hex, "{byte:02x}");
    }
    hex
}
