//! Prebuilt binary pruning.
//!
//! Projects ship prebuilt binaries for several platforms under a common
//! directory marker (for example `node-builds/osx`, `node-builds/win`). A
//! per-platform release keeps only its own binaries plus anything under an
//! always-keep marker.

use super::Target;
use crate::source::FileList;
use serde::Deserialize;

/// Rules deciding which prebuilt binaries a target ships.
///
/// Markers are plain substrings matched anywhere in the slash-separated path,
/// so a marker naming a directory covers its whole subtree.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FilterPolicy {
    /// Substring marking prebuilt-binary paths
    pub prebuilt_marker: String,

    /// Substrings that keep a prebuilt path regardless of target
    pub keep_markers: Vec<String>,
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self {
            prebuilt_marker: "node-builds".to_string(),
            keep_markers: vec!["tmp".to_string(), "etc".to_string()],
        }
    }
}

impl FilterPolicy {
    /// Whether `path` is a prebuilt binary belonging to another platform.
    pub fn excludes(&self, path: &str, target: Target) -> bool {
        let Some(keyword) = target.keyword() else {
            return false;
        };

        path.contains(self.prebuilt_marker.as_str())
            && !path.contains(keyword)
            && !self
                .keep_markers
                .iter()
                .any(|marker| path.contains(marker.as_str()))
    }

    /// Returns the subset of `files` that ships for `target`.
    ///
    /// Used for the installer and for every archive alike.
    pub fn apply(&self, files: &FileList, target: Target) -> FileList {
        let filtered = files.filtered(|path| !self.excludes(path, target));
        log::debug!(
            "{} filter kept {} of {} files",
            target,
            filtered.len(),
            files.len()
        );
        filtered
    }
}
