//! NSIS toolset location.
//!
//! Locates the system-installed makensis binary.

use crate::bundler::{builder::tool_detection::find_tool, error::Result};
use std::path::PathBuf;

/// Locate the makensis compiler on `PATH`.
pub fn get_makensis() -> Result<PathBuf> {
    find_tool(
        "makensis",
        "Please install NSIS (e.g., apt-get install nsis, brew install makensis).",
    )
}
