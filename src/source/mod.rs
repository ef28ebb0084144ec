//! Tracked file enumeration.
//!
//! A release only contains files that are committed to git. The top-level
//! listing and the recursive submodule discovery run concurrently, then each
//! submodule is listed on its own and its paths are prefixed with its mount
//! point. Listings are NUL-separated so git never quotes a name. Hidden and
//! backup files and submodule mount points are dropped before sorting.

use crate::bundler::{
    builder::tool_detection::find_tool,
    error::{Error, Result},
    utils::process,
};
use std::path::Path;
use tokio::{process::Command, task::JoinSet};

/// Shell snippet run inside each submodule by `git submodule foreach`.
///
/// `$displaypath` is the submodule's path relative to the top-level checkout,
/// so nested submodules come out rooted correctly.
const SUBMODULE_PATHS: &str = r#"printf '%s\0' "$displaypath""#;

/// Sorted, deduplicated list of slash-separated paths relative to the packaging root.
///
/// Filtering never mutates a list; it produces a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileList {
    files: Vec<String>,
}

impl FileList {
    /// Builds a list from paths in any order.
    pub fn from_unsorted<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut files: Vec<String> = paths.into_iter().map(Into::into).collect();
        files.sort();
        files.dedup();
        Self { files }
    }

    /// Returns a new list holding only the paths accepted by `keep`.
    pub fn filtered(&self, mut keep: impl FnMut(&str) -> bool) -> Self {
        Self {
            files: self
                .files
                .iter()
                .filter(|path| keep(path))
                .cloned()
                .collect(),
        }
    }

    /// Iterates over the paths in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(String::as_str)
    }

    /// Number of paths.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Whether `path` is in the list.
    pub fn contains(&self, path: &str) -> bool {
        self.files.binary_search_by(|p| p.as_str().cmp(path)).is_ok()
    }

    /// Paths joined by newlines, one per line, for feeding tools on stdin.
    pub fn to_lines(&self) -> String {
        self.joined('\n')
    }

    /// Paths each terminated by a NUL byte, for tools reading `--null` input.
    pub fn to_nul_separated(&self) -> String {
        self.joined('\0')
    }

    fn joined(&self, terminator: char) -> String {
        let mut out = String::new();
        for path in &self.files {
            out.push_str(path);
            out.push(terminator);
        }
        out
    }
}

/// Whether a listed path names a file that belongs in a release.
///
/// Rejects hidden files (basename starting with `.`) and editor backups
/// (ending with `~`).
pub fn is_packaged_path(path: &str) -> bool {
    let basename = path.rsplit('/').next().unwrap_or(path);
    !(basename.is_empty() || basename.starts_with('.') || path.ends_with('~'))
}

/// Splits NUL-separated git output into its non-empty entries.
fn split_entries(output: &str) -> impl Iterator<Item = &str> {
    output.split('\0').filter(|entry| !entry.is_empty())
}

/// Splits `git ls-files -z` output into candidate paths.
pub fn parse_listing(output: &str) -> impl Iterator<Item = &str> {
    split_entries(output).filter(|path| is_packaged_path(path))
}

fn ls_files(git: &Path, dir: &Path) -> Command {
    let mut command = Command::new(git);
    command.args(["ls-files", "-z"]).current_dir(dir);
    command
}

/// Lists every tracked regular file under `root`, including files inside
/// nested submodules.
///
/// Any listing failing fails the whole enumeration: a partial list would
/// silently drop files from every artifact.
pub async fn enumerate_files(root: &Path) -> Result<FileList> {
    let git = find_tool("git", "Install git and make sure it is on PATH.")?;
    log::info!("Enumerating tracked files in {}", root.display());

    let mut submodules = Command::new(&git);
    submodules
        .args(["submodule", "foreach", "--quiet", "--recursive", SUBMODULE_PATHS])
        .current_dir(root);

    let (top_output, mounts_output) = tokio::join!(
        process::capture(ls_files(&git, root)),
        process::capture(submodules)
    );
    let (top_output, mounts_output) = (top_output?, mounts_output?);

    let mut candidates: Vec<String> = parse_listing(&top_output)
        .map(str::to_string)
        .collect();

    let mut listings = JoinSet::new();
    for mount in split_entries(&mounts_output) {
        log::debug!("Listing submodule {}", mount);
        let command = ls_files(&git, &root.join(mount));
        let mount = mount.to_string();
        listings.spawn(async move {
            process::capture(command)
                .await
                .map(|output| (mount, output))
        });
    }
    while let Some(joined) = listings.join_next().await {
        let (mount, output) = joined
            .map_err(|e| Error::GenericError(format!("submodule listing task failed: {e}")))??;
        candidates.extend(parse_listing(&output).map(|path| format!("{mount}/{path}")));
    }

    let mut files = Vec::with_capacity(candidates.len());
    for path in candidates {
        // Submodule mount points are tracked entries but not files
        match tokio::fs::metadata(root.join(&path)).await {
            Ok(metadata) if metadata.is_dir() => {
                log::debug!("Skipping directory entry {}", path);
            }
            Ok(_) => files.push(path),
            Err(e) => {
                log::warn!("Skipping tracked path {} that cannot be read: {}", path, e);
            }
        }
    }

    let list = FileList::from_unsorted(files);
    log::info!("Found {} files to package", list.len());
    Ok(list)
}
