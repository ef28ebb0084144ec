//! Release metadata from the project's `package.json` or `Cargo.toml`.

use crate::error::{CliError, PackagerError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Optional packaging rules carried in project metadata.
///
/// Read from the top-level `packager` key of `package.json` or from
/// `[package.metadata.packager]` in `Cargo.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PackagerMetadata {
    /// Overrides the prebuilt-binary marker
    pub prebuilt_marker: Option<String>,

    /// Overrides the always-keep markers
    pub keep_markers: Option<Vec<String>>,
}

/// Project metadata needed for a release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectMetadata {
    /// Project name, used as the default product name
    pub name: String,

    /// Version string (e.g., "0.1.0")
    pub version: String,

    /// Packaging rules, if the project declares any
    pub packager: Option<PackagerMetadata>,
}

/// Metadata file used when none is given: `package.json` if present, else
/// `Cargo.toml`.
pub fn default_metadata_path(root: &Path) -> PathBuf {
    let package_json = root.join("package.json");
    if package_json.is_file() {
        package_json
    } else {
        root.join("Cargo.toml")
    }
}

/// Load metadata from `path` (single read + parse).
///
/// Files named `Cargo.toml` (or any `.toml`) are parsed as a Cargo manifest;
/// everything else as `package.json`.
pub fn load_metadata(path: &Path) -> Result<ProjectMetadata> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        PackagerError::Cli(CliError::ExecutionFailed {
            command: "read_metadata".to_string(),
            reason: format!("Failed to read {}: {}", path.display(), e),
        })
    })?;

    let is_toml = path.extension().is_some_and(|ext| ext == "toml");
    let metadata = if is_toml {
        parse_cargo_manifest(&content, path)?
    } else {
        parse_package_json(&content, path)?
    };

    log::debug!(
        "Read {} version {} from {}",
        metadata.name,
        metadata.version,
        path.display()
    );
    Ok(metadata)
}

fn missing(field: &str, path: &Path) -> PackagerError {
    PackagerError::Cli(CliError::MissingMetadata {
        field: field.to_string(),
        file: path.display().to_string(),
    })
}

/// Parse `package.json` content.
pub fn parse_package_json(content: &str, path: &Path) -> Result<ProjectMetadata> {
    let value: serde_json::Value = serde_json::from_str(content)?;

    let version = value
        .get("version")
        .and_then(|v| v.as_str())
        .ok_or_else(|| missing("version", path))?
        .to_string();

    let name = value
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| missing("name", path))?
        .to_string();

    let packager = value
        .get("packager")
        .map(|p| serde_json::from_value::<PackagerMetadata>(p.clone()))
        .transpose()?;

    Ok(ProjectMetadata {
        name,
        version,
        packager,
    })
}

/// Parse `Cargo.toml` content.
pub fn parse_cargo_manifest(content: &str, path: &Path) -> Result<ProjectMetadata> {
    let toml_value: toml::Value = toml::from_str(content)?;

    let package = toml_value.get("package").ok_or_else(|| {
        PackagerError::Cli(CliError::InvalidArguments {
            reason: format!("No [package] section in {}", path.display()),
        })
    })?;

    let name = package
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| missing("package.name", path))?
        .to_string();

    let version = package
        .get("version")
        .and_then(|v| v.as_str())
        .ok_or_else(|| missing("package.version", path))?
        .to_string();

    let packager = package
        .get("metadata")
        .and_then(|m| m.get("packager"))
        .map(|p| p.clone().try_into::<PackagerMetadata>())
        .transpose()?;

    Ok(ProjectMetadata {
        name,
        version,
        packager,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_package_json() {
        let json = r#"{
            "name": "cocos2d-javascript",
            "version": "0.1.0",
            "packager": { "keep_markers": ["tmp"] }
        }"#;
        let meta = parse_package_json(json, Path::new("package.json")).unwrap();
        assert_eq!(meta.name, "cocos2d-javascript");
        assert_eq!(meta.version, "0.1.0");
        let packager = meta.packager.unwrap();
        assert_eq!(packager.keep_markers, Some(vec!["tmp".to_string()]));
        assert_eq!(packager.prebuilt_marker, None);
    }

    #[test]
    fn package_json_without_version_names_the_field() {
        let err = parse_package_json(r#"{"name": "x"}"#, Path::new("package.json")).unwrap_err();
        assert!(matches!(
            err,
            PackagerError::Cli(CliError::MissingMetadata { ref field, .. }) if field == "version"
        ));
    }

    #[test]
    fn reads_cargo_manifest_with_packager_table() {
        let manifest = r#"
            [package]
            name = "demo"
            version = "2.0.0-beta.1"

            [package.metadata.packager]
            prebuilt_marker = "prebuilt"
        "#;
        let meta = parse_cargo_manifest(manifest, Path::new("Cargo.toml")).unwrap();
        assert_eq!(meta.name, "demo");
        assert_eq!(meta.version, "2.0.0-beta.1");
        assert_eq!(
            meta.packager.unwrap().prebuilt_marker.as_deref(),
            Some("prebuilt")
        );
    }

    #[test]
    fn cargo_manifest_without_package_is_rejected() {
        let err = parse_cargo_manifest("[workspace]\n", Path::new("Cargo.toml")).unwrap_err();
        assert!(err.to_string().contains("[package]"));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = parse_package_json("{", Path::new("package.json")).unwrap_err();
        assert!(matches!(err, PackagerError::Json(_)));
    }

    #[test]
    fn default_path_prefers_package_json() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(default_metadata_path(dir.path()), dir.path().join("Cargo.toml"));

        std::fs::write(dir.path().join("package.json"), "{}").unwrap();
        assert_eq!(
            default_metadata_path(dir.path()),
            dir.path().join("package.json")
        );
    }

    #[test]
    fn load_metadata_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Cargo.toml");
        std::fs::write(&path, "[package]\nname = \"a\"\nversion = \"1\"\n").unwrap();
        assert_eq!(load_metadata(&path).unwrap().version, "1");

        let err = load_metadata(&dir.path().join("package.json")).unwrap_err();
        assert!(err.to_string().contains("read_metadata"));
    }
}
