//! Core Settings struct and implementations.

use super::PackageSettings;
use crate::bundler::platform::{FilterPolicy, Target};
use std::path::{Path, PathBuf};

/// Main settings for a packaging run.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder). All paths are
/// absolute once built.
///
/// # Examples
///
/// ```no_run
/// use release_packager::bundler::{PackageSettings, SettingsBuilder, Target};
///
/// # fn example() -> release_packager::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .root("/work/cocos2d-javascript")
///     .package_settings(PackageSettings {
///         product_name: "cocos2d-javascript".into(),
///         version: "0.1.0".into(),
///     })
///     .targets(vec![Target::Mac, Target::Windows])
///     .build()?;
/// assert_eq!(settings.artifact_base_name(Target::Mac), "cocos2d-javascript-v0.1.0-mac");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Release metadata.
    package: PackageSettings,

    /// Packaging root: the checkout whose tracked files are released.
    root: PathBuf,

    /// Directory receiving installers, archives and staging trees.
    output_dir: PathBuf,

    /// Project installer template; `None` selects the built-in one.
    template_path: Option<PathBuf>,

    /// Prebuilt-binary pruning rules.
    filter_policy: FilterPolicy,

    /// Archive targets to produce, in scheduling order.
    targets: Vec<Target>,

    /// Skip the NSIS installer stage.
    skip_installer: bool,

    /// Remove tar.gz staging trees once their archive exists.
    clean_staging: bool,
}

impl Settings {
    /// Returns the product name.
    pub fn product_name(&self) -> &str {
        &self.package.product_name
    }

    /// Returns the version string.
    pub fn version_string(&self) -> &str {
        &self.package.version
    }

    /// Returns the packaging root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the output directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Returns the project installer template, if one is configured.
    pub fn template_path(&self) -> Option<&Path> {
        self.template_path.as_deref()
    }

    /// Returns the prebuilt-binary filter policy.
    pub fn filter_policy(&self) -> &FilterPolicy {
        &self.filter_policy
    }

    /// Returns the archive targets.
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Whether the installer stage is skipped.
    pub fn skip_installer(&self) -> bool {
        self.skip_installer
    }

    /// Whether staging trees are removed after archiving.
    pub fn clean_staging(&self) -> bool {
        self.clean_staging
    }

    /// Artifact name without extension: `<product>-v<version>-<target>`.
    pub fn artifact_base_name(&self, target: Target) -> String {
        format!(
            "{}-v{}-{}",
            self.product_name(),
            self.version_string(),
            target.suffix()
        )
    }

    /// Path of the compiled Windows installer.
    pub fn installer_path(&self) -> PathBuf {
        self.output_dir.join(format!(
            "{}-setup.exe",
            self.artifact_base_name(Target::Windows)
        ))
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        package: PackageSettings,
        root: PathBuf,
        output_dir: PathBuf,
        template_path: Option<PathBuf>,
        filter_policy: FilterPolicy,
        targets: Vec<Target>,
        skip_installer: bool,
        clean_staging: bool,
    ) -> Self {
        Self {
            package,
            root,
            output_dir,
            template_path,
            filter_policy,
            targets,
            skip_installer,
            clean_staging,
        }
    }
}
