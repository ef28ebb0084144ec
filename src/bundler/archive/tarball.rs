//! `.tar.gz` archive generation.
//!
//! The archive is built from a staging tree `<output_dir>/<base_name>/` that
//! holds a real copy of every file, so the archive unpacks into a single
//! folder named after it.

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

/// Copy every file in `files` from `root` into a fresh `staging_dir`.
///
/// Any previous content of `staging_dir` is erased. Parent directories are
/// created on demand and permission bits are preserved.
pub async fn stage_files(root: &Path, staging_dir: &Path, files: &FileList) -> Result<()> {
    log::debug!(
        "Staging {} files into {}",
        files.len(),
        staging_dir.display()
    );
    fs::create_dir_all(staging_dir, true).await?;

    for path in files.iter() {
        fs::copy_file(&root.join(path), &staging_dir.join(path)).await?;
    }
    Ok(())
}

/// Stage `files` and compress them into `<output_dir>/<base_name>.tar.gz`.
///
/// The staging tree is left in place unless `clean_staging` is set.
pub async fn generate_tarball(
    root: &Path,
    output_dir: &Path,
    files: &FileList,
    base_name: &str,
    clean_staging: bool,
) -> Result<PathBuf> {
    let tar_path = output_dir.join(format!("{base_name}.tar.gz"));
    let staging_dir = output_dir.join(base_name);
    log::info!("Generating .tar.gz archive: {}", tar_path.display());

    let tar = find_tool("tar", "Install GNU tar or bsdtar.")?;

    fs::create_dir_all(output_dir, false).await?;
    if fs::remove_file_if_exists(&tar_path).await? {
        log::debug!("Removed previous {}", tar_path.display());
    }

    stage_files(root, &staging_dir, files).await?;

    // Staged names are relative to output_dir: "<base_name>/<path>"
    let staged_names = FileList::from_unsorted(files.iter().map(|p| format!("{base_name}/{p}")));

    // NUL-terminated names are read verbatim, without unquoting
    let mut command = Command::new(tar);
    command
        .arg("-czf")
        .arg(&tar_path)
        .args(["--null", "-T", "-"])
        .current_dir(output_dir);

    let archived =
        process::run_streaming(command, Some(staged_names.to_nul_separated()), base_name).await;

    let cleanup = if clean_staging {
        fs::remove_dir_all(&staging_dir).await
    } else {
        Ok(())
    };
    settle(archived, cleanup)?;

    log::info!("✓ Generated {}", tar_path.display());
    Ok(tar_path)
}

/// Reports the archiver's failure ahead of a staging cleanup failure.
fn settle(archived: Result<()>, cleanup: Result<()>) -> Result<()> {
    if let (Err(_), Err(e)) = (&archived, &cleanup) {
        log::warn!("Could not remove staging tree: {}", e);
    }
    archived.and(cleanup)
}
