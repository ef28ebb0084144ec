//! External tool detection.
//!
//! Every external program (git, zip, tar, makensis) is resolved on `PATH`
//! right before the stage that needs it, so a missing tool only fails that
//! stage.

use crate::bundler::error::{Error, Result};
use std::path::PathBuf;

/// Locate `tool` on `PATH`.
///
/// `hint` is appended to the error to tell the operator how to install it.
pub fn find_tool(tool: &'static str, hint: &'static str) -> Result<PathBuf> {
    match which::which(tool) {
        Ok(path) => {
            log::debug!("Found {} at: {}", tool, path.display());
            Ok(path)
        }
        Err(e) => {
            log::debug!("{} not found in PATH: {}", tool, e);
            Err(Error::ToolNotFound { tool, hint })
        }
    }
}
