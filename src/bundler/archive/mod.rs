//! Release archive generation.
//!
//! An [`ArchiveJob`] pairs a target's filtered file list with the archive it
//! produces. Windows ships a `.zip` built in place from the packaging root;
//! every other target ships a `.tar.gz` built from a staged copy tree whose
//! top-level folder matches the archive's base name.
//!
//! # Module Organization
//!
//! - [`zipfile`] - `zip` invocation over files in place
//! - [`tarball`] - staging copy tree and `tar -czf` invocation

pub mod tarball;
pub mod zipfile;

use crate::{
    bundler::{error::Result, platform::Target, settings::Settings},
    source::FileList,
};
use std::{fmt, path::PathBuf};

/// Archive container format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArchiveFormat {
    /// `.zip`, built with `zip -9`
    Zip,
    /// `.tar.gz`, built with `tar -czf`
    TarGz,
}

impl ArchiveFormat {
    /// File extension including the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            ArchiveFormat::Zip => ".zip",
            ArchiveFormat::TarGz => ".tar.gz",
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension().trim_start_matches('.'))
    }
}

/// One archive to produce.
#[derive(Debug, Clone)]
pub struct ArchiveJob {
    files: FileList,
    format: ArchiveFormat,
    base_name: String,
}

impl ArchiveJob {
    /// Creates a job for `target` from the unfiltered release list.
    ///
    /// The job filters its own copy with the same policy the installer uses.
    pub fn for_target(all_files: &FileList, target: Target, settings: &Settings) -> Self {
        Self {
            files: settings.filter_policy().apply(all_files, target),
            format: target.archive_format(),
            base_name: settings.artifact_base_name(target),
        }
    }

    /// Archive format.
    pub fn format(&self) -> ArchiveFormat {
        self.format
    }

    /// Files that go into the archive.
    pub fn files(&self) -> &FileList {
        &self.files
    }

    /// Archive name without extension, e.g. `demo-v1.0.0-mac`.
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Archive file name, e.g. `demo-v1.0.0-mac.tar.gz`.
    pub fn file_name(&self) -> String {
        format!("{}{}", self.base_name, self.format.extension())
    }

    /// Builds the archive and returns its path.
    pub async fn build(&self, settings: &Settings) -> Result<PathBuf> {
        match self.format {
            ArchiveFormat::Zip => {
                zipfile::generate_zip(
                    settings.root(),
                    settings.output_dir(),
                    &self.files,
                    &self.base_name,
                )
                .await
            }
            ArchiveFormat::TarGz => {
                tarball::generate_tarball(
                    settings.root(),
                    settings.output_dir(),
                    &self.files,
                    &self.base_name,
                    settings.clean_staging(),
                )
                .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::settings::{PackageSettings, SettingsBuilder};

    fn settings() -> Settings {
        SettingsBuilder::new()
            .root("/work/demo")
            .package_settings(PackageSettings {
                product_name: "demo".into(),
                version: "0.1.0".into(),
            })
            .build()
            .unwrap()
    }

    #[test]
    fn jobs_are_named_after_product_version_and_target() {
        let files = FileList::from_unsorted(["a.js"]);
        let settings = settings();

        let mac = ArchiveJob::for_target(&files, Target::Mac, &settings);
        assert_eq!(mac.file_name(), "demo-v0.1.0-mac.tar.gz");

        let windows = ArchiveJob::for_target(&files, Target::Windows, &settings);
        assert_eq!(windows.file_name(), "demo-v0.1.0-windows.zip");
        assert_eq!(windows.format(), ArchiveFormat::Zip);
    }

    #[test]
    fn jobs_filter_their_own_copy() {
        let files = FileList::from_unsorted(["node-builds/osx/node", "node-builds/win/node.exe"]);
        let settings = settings();

        let linux = ArchiveJob::for_target(&files, Target::Linux, &settings);
        assert!(linux.files().is_empty());

        let all = ArchiveJob::for_target(&files, Target::All, &settings);
        assert_eq!(all.files().len(), 2);
        assert_eq!(files.len(), 2);
    }
}
