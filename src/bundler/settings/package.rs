//! Release metadata.

/// Release metadata.
///
/// Usually read from the project's `package.json` or `Cargo.toml` by
/// [`crate::metadata`].
///
/// # Examples
///
/// ```no_run
/// use release_packager::bundler::PackageSettings;
///
/// let package = PackageSettings {
///     product_name: "cocos2d-javascript".into(),
///     version: "0.1.0".into(),
/// };
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageSettings {
    /// Product name used as the prefix of every artifact name.
    pub product_name: String,

    /// Version string, embedded in artifact names as `v<version>`.
    ///
    /// Example: "1.0.0", "0.2.3-beta.1"
    pub version: String,
}
