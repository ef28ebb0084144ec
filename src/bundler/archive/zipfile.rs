//! `.zip` archive generation.

use crate::{
    bundler::{
        builder::tool_detection::find_tool,
        error::Result,
        utils::{fs, process},
    },
    source::FileList,
};
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Zip `files` in place from `root` into `<output_dir>/<base_name>.zip`.
///
/// An existing archive of the same name is removed first so the tool never
/// appends to a stale archive.
pub async fn generate_zip(
    root: &Path,
    output_dir: &Path,
    files: &FileList,
    base_name: &str,
) -> Result<PathBuf> {
    let zip_path = output_dir.join(format!("{base_name}.zip"));
    log::info!("Generating .zip archive: {}", zip_path.display());

    let zip = find_tool("zip", "Install Info-ZIP (e.g., apt-get install zip).")?;

    fs::create_dir_all(output_dir, false).await?;
    if fs::remove_file_if_exists(&zip_path).await? {
        log::debug!("Removed previous {}", zip_path.display());
    }

    // Names are read from stdin (-@) so long file lists never hit argv limits
    let mut command = Command::new(zip);
    command
        .arg("-9")
        .arg("-q")
        .arg(&zip_path)
        .arg("-@")
        .current_dir(root);

    process::run_streaming(command, Some(files.to_lines()), base_name).await?;

    log::info!("✓ Generated {}", zip_path.display());
    Ok(zip_path)
}
