//! Top-level error types for the packager.
//!
//! Pipeline failures come from [`crate::bundler::Error`]; this module wraps them
//! together with argument, metadata and IO problems raised by the CLI layer.

use thiserror::Error;

/// Result type alias for packager operations
pub type Result<T> = std::result::Result<T, PackagerError>;

/// Main error type for all packager operations
#[derive(Error, Debug)]
pub enum PackagerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON metadata errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML metadata errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Packaging pipeline errors
    #[error("Packaging error: {0}")]
    Packager(#[from] crate::bundler::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Project metadata is missing a required field
    #[error("Missing metadata field '{field}' in {file}")]
    MissingMetadata {
        /// Field name
        field: String,
        /// Metadata file that was read
        file: String,
    },

    /// Command execution failed
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}
