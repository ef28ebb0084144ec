//! Release packaging pipeline.
//!
//! Turns an enumerated [`FileList`](crate::source::FileList) into release artifacts:
//! an NSIS installer for Windows and one archive per [`Target`].
//!
//! # Module Organization
//!
//! - [`archive`] - zip and tar.gz archive generation
//! - [`builder`] - the [`Packager`] orchestrator, tool detection and checksums
//! - [`error`] - error type and extension traits
//! - [`platform`] - targets, prebuilt-binary filtering and the NSIS installer
//! - [`settings`] - [`Settings`] and [`SettingsBuilder`]
//! - [`template`] - `{{placeholder}}` substitution
//! - [`utils`] - filesystem and subprocess helpers

pub mod archive;
pub mod builder;
pub mod error;
pub mod platform;
pub mod settings;
pub mod template;
pub mod utils;

pub use archive::{ArchiveFormat, ArchiveJob};
pub use builder::{ArtifactKind, PackagedArtifact, Packager, PackagingReport, StageFailure};
pub use error::{Error, Result};
pub use platform::{FilterPolicy, Target};
pub use settings::{PackageSettings, Settings, SettingsBuilder};
pub use template::{Template, TemplateContext};
