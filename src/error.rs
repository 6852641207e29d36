//! Error types for the untract library.

use std::io;
use thiserror::Error;

/// Result type alias for untract operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while flattening analysis output.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing objects.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error decoding the analysis JSON body.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The part body parsed but carried no blocks.
    #[error("no blocks found in analysis result")]
    EmptyAnalysis,

    /// A part object under the raw prefix had no blocks.
    #[error("no blocks found in part {0}")]
    EmptyPart(String),

    /// A blob store operation failed.
    #[error("store error: {0}")]
    Store(String),

    /// A vendor rule pattern failed to compile.
    #[error("invalid vendor pattern {pattern:?}: {source}")]
    VendorPattern {
        /// The offending pattern as written in the configuration.
        pattern: String,
        /// The underlying regex error.
        source: regex::Error,
    },

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
