//! Builder for constructing Settings.

use super::{PackageSettings, Settings};
use crate::{
    bail,
    bundler::{
        error::{Context, Error, Result},
        platform::{FilterPolicy, Target},
    },
};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// Provides a fluent API for building packaging settings with validation.
///
/// # Examples
///
/// ```no_run
/// use release_packager::bundler::{PackageSettings, SettingsBuilder};
///
/// # fn example() -> release_packager::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .root(".")
///     .output_dir("dist")
///     .package_settings(PackageSettings {
///         product_name: "MyApp".into(),
///         version: "1.0.0".into(),
///     })
///     .skip_installer(true)
///     .build()?;
/// # Ok(())
/// # }
/// ```
///
/// # See Also
///
/// - [`Settings`] - The built settings struct
#[derive(Default)]
pub struct SettingsBuilder {
    root: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    template_path: Option<PathBuf>,
    package_settings: Option<PackageSettings>,
    filter_policy: FilterPolicy,
    targets: Option<Vec<Target>>,
    skip_installer: bool,
    clean_staging: bool,
}

fn absolute(path: &Path) -> Result<PathBuf> {
    path.absolutize()
        .map(|p| p.into_owned())
        .map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the packaging root.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the output directory.
    ///
    /// Default: the packaging root
    pub fn output_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the project installer template.
    ///
    /// Default: None (built-in template)
    pub fn template_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.template_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets release metadata.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn package_settings(mut self, settings: PackageSettings) -> Self {
        self.package_settings = Some(settings);
        self
    }

    /// Sets the prebuilt-binary filter policy.
    ///
    /// Default: [`FilterPolicy::default`]
    pub fn filter_policy(mut self, policy: FilterPolicy) -> Self {
        self.filter_policy = policy;
        self
    }

    /// Sets the archive targets. Duplicates are dropped, first occurrence wins.
    ///
    /// Default: every target in [`Target::ALL_TARGETS`] order
    pub fn targets(mut self, targets: Vec<Target>) -> Self {
        self.targets = Some(targets);
        self
    }

    /// Skips the NSIS installer stage.
    ///
    /// Default: false
    pub fn skip_installer(mut self, skip: bool) -> Self {
        self.skip_installer = skip;
        self
    }

    /// Removes staging trees after their archive is written.
    ///
    /// Default: false
    pub fn clean_staging(mut self, clean: bool) -> Self {
        self.clean_staging = clean;
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing (`root`,
    /// `package_settings`), if the product name or version is empty, or if
    /// the filter policy has an empty prebuilt marker.
    pub fn build(self) -> Result<Settings> {
        let package = self
            .package_settings
            .context("package_settings is required")?;
        if package.product_name.trim().is_empty() {
            bail!("product name must not be empty");
        }
        if package.version.trim().is_empty() {
            bail!("version must not be empty");
        }
        if self.filter_policy.prebuilt_marker.is_empty() {
            bail!("prebuilt marker must not be empty");
        }

        let root = absolute(&self.root.context("root is required")?)?;
        let output_dir = match self.output_dir {
            Some(dir) => absolute(&dir)?,
            None => root.clone(),
        };
        let template_path = self.template_path.as_deref().map(absolute).transpose()?;

        let mut targets = Vec::new();
        for target in self.targets.unwrap_or_else(|| Target::ALL_TARGETS.to_vec()) {
            if !targets.contains(&target) {
                targets.push(target);
            }
        }

        Ok(Settings::new(
            package,
            root,
            output_dir,
            template_path,
            self.filter_policy,
            targets,
            self.skip_installer,
            self.clean_staging,
        ))
    }
}
