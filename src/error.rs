//! Error types for the Spellsift library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`SpellsiftError`] enum. Note that searching itself never fails for
//! data-shape reasons: an empty corpus, an empty query or a spelling miss are
//! normal outcomes. Errors come from configuration, file loading and the
//! async wrapper's deadline.
//!
//! # Examples
//!
//! ```
//! use spellsift::error::{Result, SpellsiftError};
//!
//! fn check_threshold(value: f64) -> Result<f64> {
//!     if !(0.0..=100.0).contains(&value) {
//!         return Err(SpellsiftError::invalid_config("threshold out of range"));
//!     }
//!     Ok(value)
//! }
//!
//! assert!(check_threshold(65.0).is_ok());
//! assert!(check_threshold(120.0).is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Spellsift operations.
#[derive(Error, Debug)]
pub enum SpellsiftError {
    /// I/O errors (corpus, config and dictionary files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Analysis errors (tokenizer construction, invalid patterns)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Spelling correction errors raised by a corrector implementation
    #[error("Spelling error: {0}")]
    Spelling(String),

    /// Rejected configuration values
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A search did not finish within its deadline
    #[error("Timeout: {0}")]
    Timeout(String),

    /// A background search task panicked or was cancelled
    #[error("Task error: {0}")]
    Task(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic anyhow error, used by injected capabilities
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with SpellsiftError.
pub type Result<T> = std::result::Result<T, SpellsiftError>;

impl SpellsiftError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        SpellsiftError::Analysis(msg.into())
    }

    /// Create a new spelling error.
    pub fn spelling<S: Into<String>>(msg: S) -> Self {
        SpellsiftError::Spelling(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        SpellsiftError::InvalidConfig(msg.into())
    }

    /// Create a new timeout error.
    pub fn timeout<S: Into<String>>(msg: S) -> Self {
        SpellsiftError::Timeout(msg.into())
    }

    /// Create a new task error.
    pub fn task<S: Into<String>>(msg: S) -> Self {
        SpellsiftError::Task(msg.into())
    }
}
