//! NSIS installer build execution.
//!
//! Compiles NSI scripts into Windows installer executables using makensis.

use crate::bundler::{
    error::{Error, ErrorExt, Result},
    utils::process,
};
use std::path::Path;
use tokio::process::Command;

/// Run makensis to compile NSI script into installer executable.
///
/// makensis runs from the script's directory so relative `File` sources
/// resolve against it. The installer path is passed as the `OUTPUT_FILE`
/// define; templates use it for `OutFile`.
///
/// # Arguments
/// - `makensis` - Path to the makensis binary
/// - `nsi_path` - Path to the NSI script file to compile
/// - `output_path` - Path where the installer .exe should be created
pub async fn run_makensis(makensis: &Path, nsi_path: &Path, output_path: &Path) -> Result<()> {
    log::info!("Running makensis on {}", nsi_path.display());

    // Ensure output directory exists
    if let Some(parent) = output_path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .fs_context("creating installer output directory", parent)?;
    }

    let script_dir = nsi_path.parent().ok_or_else(|| Error::InvalidPath {
        path: nsi_path.to_path_buf(),
        reason: "script has no parent directory".into(),
    })?;
    let nsi_arg = nsi_path.to_str().ok_or_else(|| Error::InvalidPath {
        path: nsi_path.to_path_buf(),
        reason: "NSI path is not valid UTF-8".into(),
    })?;

    let mut command = Command::new(makensis);
    command
        .args([
            "-V2", // Warnings and errors only
            "-INPUTCHARSET",
            "UTF8",
            "-OUTPUTCHARSET",
            "UTF8",
            &format!("-DOUTPUT_FILE={}", output_path.display()),
            nsi_arg,
        ])
        .current_dir(script_dir);

    process::run_streaming(command, None, "makensis").await
}
