//! NSIS utility functions.
//!
//! Helpers for path conversion, version formatting and writing scripts in the
//! encoding makensis expects.

use crate::bundler::error::{ErrorExt, Result};
use std::path::{Component, Path};
use tokio::io::AsyncWriteExt;

/// Converts a slash-separated relative path to Windows separators.
pub fn to_windows_path(path: &str) -> String {
    path.replace('/', "\\")
}

/// Path from the directory holding the generated script back to the packaging root.
///
/// makensis resolves `File` sources relative to the script, so a script in
/// `<root>/support` refers to the root as `..`. A script outside the root
/// gets the root's absolute path.
pub fn relative_root(script_dir: &Path, root: &Path) -> String {
    match script_dir.strip_prefix(root) {
        Ok(inner) => {
            let depth = inner
                .components()
                .filter(|c| matches!(c, Component::Normal(_)))
                .count();
            if depth == 0 {
                ".".to_string()
            } else {
                vec![".."; depth].join("\\")
            }
        }
        Err(_) => root.display().to_string(),
    }
}

/// Format version string for NSIS VIProductVersion.
///
/// NSIS requires exactly 4 numeric parts (major.minor.patch.build).
/// Pre-release and build suffixes are dropped, then the version is
/// normalized:
/// - "1" -> "1.0.0.0"
/// - "1.2" -> "1.2.0.0"
/// - "1.2.3" -> "1.2.3.0"
/// - "1.2.3-beta.1" -> "1.2.3.0"
/// - "1.2.3.4.5" -> "1.2.3.4" (truncates to first 4)
pub fn format_version_for_nsis(version: &str) -> String {
    let core = version
        .split(['-', '+'])
        .next()
        .unwrap_or(version)
        .trim_start_matches('v');

    let mut parts: Vec<&str> = core.split('.').filter(|p| !p.is_empty()).take(4).collect();
    while parts.len() < 4 {
        parts.push("0");
    }
    parts.join(".")
}

/// Write file with UTF-8 BOM (required by NSIS).
///
/// NSIS requires installer scripts to be encoded with UTF-8 BOM (byte order mark).
/// This function writes the BOM (EF BB BF) followed by the content.
pub async fn write_utf8_bom(path: &Path, content: &str) -> Result<()> {
    let mut file = tokio::fs::File::create(path)
        .await
        .fs_context("creating NSI script file", path)?;

    // Write UTF-8 BOM: EF BB BF
    file.write_all(&[0xEF, 0xBB, 0xBF])
        .await
        .fs_context("writing UTF-8 BOM", path)?;
    file.write_all(content.as_bytes())
        .await
        .fs_context("writing NSI content", path)?;
    file.flush().await.fs_context("flushing NSI file", path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn converts_separators() {
        assert_eq!(to_windows_path("docs/a/x.js"), "docs\\a\\x.js");
        assert_eq!(to_windows_path("README"), "README");
    }

    #[test]
    fn version_is_padded_and_truncated() {
        assert_eq!(format_version_for_nsis("1"), "1.0.0.0");
        assert_eq!(format_version_for_nsis("1.2"), "1.2.0.0");
        assert_eq!(format_version_for_nsis("0.1.0"), "0.1.0.0");
        assert_eq!(format_version_for_nsis("1.2.3.4.5"), "1.2.3.4");
        assert_eq!(format_version_for_nsis("2.0.0-rc.1+build.5"), "2.0.0.0");
        assert_eq!(format_version_for_nsis("v3.1"), "3.1.0.0");
    }

    #[test]
    fn relative_root_counts_levels() {
        let root = PathBuf::from("/work/project");
        assert_eq!(relative_root(&root, &root), ".");
        assert_eq!(relative_root(&root.join("support"), &root), "..");
        assert_eq!(relative_root(&root.join("a/b"), &root), "..\\..");
        assert_eq!(relative_root(Path::new("/tmp/out"), &root), "/work/project");
    }

    #[tokio::test]
    async fn script_starts_with_bom() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("installer.nsi");
        write_utf8_bom(&path, "Name \"x\"").await.unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..3], &[0xEF, 0xBB, 0xBF]);
        assert_eq!(&bytes[3..], b"Name \"x\"");
    }
}
