//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! `svn2gitignore` application. It uses the `thiserror` library to create a
//! single `Error` enum whose variants map onto the phases of a conversion
//! run:
//!
//! - Configuration validation (bad root path, detected before any work runs).
//! - The bulk property collection pass (unusable working copy, missing `svn`
//!   client). Fatal: nothing is written.
//! - A single per-directory fallback retrieval. Recoverable: the directory is
//!   skipped with a recorded warning and the run continues.
//! - Writing the output file. Fatal: no partial file is left at the target.
//!
//! The `Result<T>` alias is used throughout the crate to keep signatures
//! short and error propagation uniform.

use thiserror::Error;

/// Main error type for svn2gitignore operations
#[derive(Error, Debug)]
pub enum Error {
    /// The scan configuration is invalid (e.g. the root path does not exist).
    ///
    /// Detected once, up front, before any external call or worker thread is
    /// started.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The bulk property retrieval pass could not run at all.
    ///
    /// Includes an optional hint about how to resolve the problem (e.g. when
    /// the `svn` client is not installed).
    #[error("Collection error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    Collection {
        message: String,
        /// Optional hint for how to resolve the collection failure
        hint: Option<String>,
    },

    /// A per-directory fallback retrieval failed for a single directory.
    ///
    /// Recovered locally: the directory is dropped from the result set and
    /// recorded as a warning.
    #[error("Property retrieval failed for {directory}: {message}")]
    Retrieval { directory: String, message: String },

    /// The output file could not be created or moved into place.
    #[error("Write error for {path}: {message}")]
    Write { path: String, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
