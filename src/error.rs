//! Custom error types for the profile store.
//!
//! This module provides error handling for storage access, serialization,
//! configuration and bounds checks on the ingredient grid.

use thiserror::Error;

/// Main error type for profile store operations.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// Ingredient index outside the fixed grid.
    #[error("Ingredient index {index} out of range. Valid range: 0-{}", .len - 1)]
    IndexOutOfRange { index: usize, len: usize },

    /// Attribute name not present in personal info.
    #[error("Unknown attribute '{0}'")]
    UnknownAttribute(String),

    /// Storage backend failed to read or write.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Stored value exists but is not readable text.
    #[error("Stored value under '{key}' is corrupt: {reason}")]
    CorruptValue { key: String, reason: String },

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Profile could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No platform config directory.
    #[error("Could not find config directory")]
    ConfigDirNotFound,

    /// Configuration file is unreadable or malformed.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Generic invalid input error.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for profile store operations.
pub type Result<T> = std::result::Result<T, ProfileError>;
