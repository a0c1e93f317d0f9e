//! Structured error types for modal-relay
//!
//! Uses thiserror for ergonomic error definitions with automatic Display
//! and Error trait implementations.

use thiserror::Error;

/// All possible errors in modal-relay
#[derive(Error, Debug)]
pub enum DialogError {
    /// Input spec built with an empty or whitespace-only name
    #[error("Input name must not be empty (label: '{label}')")]
    EmptyInputName { label: String },

    /// Two inputs in the same dialog share a name
    #[error("Duplicate input name '{0}': each input needs a unique name")]
    DuplicateInputName(String),

    /// Filesystem I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration serialization error
    #[error("Config error: {0}")]
    Config(#[from] toml::ser::Error),
}

/// Convenience Result type using DialogError
pub type Result<T> = std::result::Result<T, DialogError>;
