//! Error types for the reeltag library.
//!
//! Every fallible operation in the crate returns [`Result`], whose error side is
//! the [`ReeltagError`] enum. The five domain variants (`InvalidInput`,
//! `NotFitted`, `Configuration`, `CorruptModel`, `MissingFile`) describe what the
//! caller did wrong; the remaining variants wrap lower-level failures.
//!
//! # Examples
//!
//! ```
//! use reeltag::error::{ReeltagError, Result};
//!
//! fn check_threshold(threshold: f64) -> Result<()> {
//!     if !(0.0..=1.0).contains(&threshold) {
//!         return Err(ReeltagError::configuration("threshold must be in [0, 1]"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_threshold(0.3).is_ok());
//! assert!(check_threshold(1.5).is_err());
//! ```

use std::io;
use std::path::Path;

use thiserror::Error;

/// The main error type for reeltag operations.
#[derive(Error, Debug)]
pub enum ReeltagError {
    /// Caller-supplied data is malformed (mismatched lengths, empty corpora, bad cells).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A prediction-side operation was invoked on a model that has not been fitted.
    #[error("Model not fitted: {0}")]
    NotFitted(String),

    /// An unknown model family, out-of-range threshold or otherwise invalid setting.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A persisted model could not be decoded.
    #[error("Corrupt model: {0}")]
    CorruptModel(String),

    /// A required input file does not exist.
    #[error("Missing file: {0}")]
    MissingFile(String),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with ReeltagError.
pub type Result<T> = std::result::Result<T, ReeltagError>;

impl ReeltagError {
    /// Create a new invalid input error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        ReeltagError::InvalidInput(msg.into())
    }

    /// Create a new not fitted error.
    pub fn not_fitted<S: Into<String>>(msg: S) -> Self {
        ReeltagError::NotFitted(msg.into())
    }

    /// Create a new configuration error.
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        ReeltagError::Configuration(msg.into())
    }

    /// Create a new corrupt model error.
    pub fn corrupt_model<S: Into<String>>(msg: S) -> Self {
        ReeltagError::CorruptModel(msg.into())
    }

    /// Create a missing file error for the given path.
    pub fn missing_file<P: AsRef<Path>>(path: P) -> Self {
        ReeltagError::MissingFile(path.as_ref().display().to_string())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        ReeltagError::Analysis(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        ReeltagError::Other(msg.into())
    }
}

/// Fail with [`ReeltagError::MissingFile`] unless `path` exists.
pub fn ensure_exists<P: AsRef<Path>>(path: P) -> Result<()> {
    if path.as_ref().exists() {
        Ok(())
    } else {
        Err(ReeltagError::missing_file(path))
    }
}
