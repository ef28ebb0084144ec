//! Release packaging library
//!
//! This library turns a git-tracked source tree into distributable release artifacts:
//! - a Windows installer (.exe via NSIS) generated from an installer script template
//! - a Windows .zip archive
//! - .tar.gz bundles for all platforms, macOS, Linux and Solaris
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;
pub mod source;

// Re-export commonly used types
pub use error::{CliError, PackagerError, Result};
