//! Release targets and platform-specific packaging.
//!
//! Each [`Target`] names one archive in a release and knows how prebuilt
//! binaries for it are tagged on disk. [`filter`] prunes prebuilt binaries
//! for other platforms; [`windows`] builds the NSIS installer.

pub mod filter;
pub mod windows;

pub use filter::FilterPolicy;

use crate::bundler::archive::ArchiveFormat;
use std::fmt;

/// A release target.
///
/// `All` ships every prebuilt binary; the others ship only their own.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, clap::ValueEnum, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// Every platform, no pruning
    All,
    /// macOS / OS X
    #[value(alias = "osx", alias = "macos")]
    #[serde(alias = "osx", alias = "macos")]
    Mac,
    /// Linux
    Linux,
    /// Windows
    #[value(alias = "win")]
    #[serde(alias = "win")]
    Windows,
    /// Solaris
    Solaris,
}

impl Target {
    /// Every target, in the order archives are scheduled.
    pub const ALL_TARGETS: [Target; 5] = [
        Target::All,
        Target::Mac,
        Target::Linux,
        Target::Windows,
        Target::Solaris,
    ];

    /// Suffix used in artifact names (`<product>-v<version>-<suffix>`).
    pub fn suffix(self) -> &'static str {
        match self {
            Target::All => "all",
            Target::Mac => "mac",
            Target::Linux => "linux",
            Target::Windows => "windows",
            Target::Solaris => "solaris",
        }
    }

    /// Substring identifying this platform's prebuilt binaries in a path.
    ///
    /// `None` for [`Target::All`], which keeps everything.
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Target::All => None,
            Target::Mac => Some("osx"),
            Target::Linux => Some("lin"),
            Target::Windows => Some("win"),
            Target::Solaris => Some("sol"),
        }
    }

    /// Archive format shipped for this target.
    pub fn archive_format(self) -> ArchiveFormat {
        match self {
            Target::Windows => ArchiveFormat::Zip,
            _ => ArchiveFormat::TarGz,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}
