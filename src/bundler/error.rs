//! Error types for packaging operations.
//!
//! Provides the [`Error`] enum used throughout the pipeline together with the
//! [`ErrorExt`] and [`Context`] extension traits and the [`bail!`](crate::bail)
//! macro for early returns.

use std::{
    fmt::Display,
    path::{Path, PathBuf},
    process::ExitStatus,
};
use thiserror::Error;

/// Result type alias for packaging operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the packaging pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// A subprocess could not be started.
    #[error("failed to run `{command}`: {error}")]
    CommandFailed {
        /// Command line that was attempted
        command: String,
        /// Underlying spawn error
        #[source]
        error: std::io::Error,
    },

    /// A subprocess ran but reported failure.
    #[error("`{command}` failed ({status}){}", format_stderr(.stderr))]
    ToolFailed {
        /// Command line that failed
        command: String,
        /// Exit status reported by the process
        status: ExitStatus,
        /// Captured diagnostic output
        stderr: String,
    },

    /// A required external tool is not on `PATH`.
    #[error("`{tool}` not found on PATH. {hint}")]
    ToolNotFound {
        /// Tool binary name
        tool: &'static str,
        /// Installation hint for the operator
        hint: &'static str,
    },

    /// The installer template could not be used.
    #[error("template error: {0}")]
    Template(String),

    /// A path cannot be expressed the way a tool needs it.
    #[error("invalid path {}: {reason}", .path.display())]
    InvalidPath {
        /// Offending path
        path: PathBuf,
        /// Why it was rejected
        reason: String,
    },

    /// Filesystem error annotated with what was being done.
    #[error("{context} ({}): {source}", .path.display())]
    Fs {
        /// Operation being performed
        context: &'static str,
        /// Path involved
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Plain IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Anything else.
    #[error("{0}")]
    GenericError(String),
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}

/// Attach filesystem context to IO results.
pub trait ErrorExt<T> {
    /// Wrap the error with a description of the operation and the path.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|source| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            source,
        })
    }
}

/// Attach a message to a failed result or an empty option.
pub trait Context<T> {
    /// Replace the failure with `msg`.
    fn context<C: Display>(self, msg: C) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context<C: Display>(self, msg: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(msg.to_string()))
    }
}

impl<T> Context<T> for Result<T> {
    fn context<C: Display>(self, msg: C) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{msg}: {e}")))
    }
}

/// Return early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)))
    };
}
