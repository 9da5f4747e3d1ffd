//! Signal handling for graceful shutdown.
//!
//! This module provides centralized Ctrl+C handling. It uses an
//! `AtomicBool` flag that can be shared across threads to signal when
//! shutdown has been requested. The walker and the digest phase check the
//! flag between entries, so an interrupted scan reports `Interrupted`
//! rather than returning a fabricated partial duplicate set.
//!
//! # Usage
//!
//! ```rust,no_run
//! use dupescan::signal::install_handler;
//!
//! let handler = install_handler().expect("Failed to install signal handler");
//!
//! if handler.is_shutdown_requested() {
//!     // Clean up and exit with code 130
//! }
//!
//! // Pass handler.get_flag() to DuplicateFinder, Walker, etc.
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Centralized shutdown handler for graceful application termination.
///
/// Wraps an `AtomicBool` flag that is set when a Ctrl+C signal is
/// received. The flag can be shared with worker threads to enable
/// coordinated shutdown.
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandler {
    /// The shared atomic flag indicating shutdown was requested.
    flag: Arc<AtomicBool>,
}

impl ShutdownHandler {
    /// Create a new shutdown handler with the flag initially unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if shutdown has been requested.
    #[must_use]
    pub fn is_shutdown_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Manually request a shutdown.
    pub fn request_shutdown(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Get a clone of the shutdown flag for passing to worker threads.
    #[must_use]
    pub fn get_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }
}

/// Install a Ctrl+C handler and return the associated [`ShutdownHandler`].
///
/// # Errors
///
/// Returns `ctrlc::Error` if a handler is already installed for this
/// process.
pub fn install_handler() -> Result<ShutdownHandler, ctrlc::Error> {
    let handler = ShutdownHandler::new();
    let flag = handler.get_flag();

    ctrlc::set_handler(move || {
        // Only the first signal gets the message; a second Ctrl+C while
        // cleanup is in flight stays quiet.
        if !flag.swap(true, Ordering::SeqCst) {
            eprintln!("Interrupted. Cleaning up...");
        }
    })?;

    Ok(handler)
}
