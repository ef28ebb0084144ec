//! Packaging orchestration and coordination.
//!
//! This module provides the main [`Packager`] orchestrator that runs the
//! release pipeline:
//!
//! 1. **Enumerate** tracked files (fatal on failure)
//! 2. **Generate the installer**: filter for Windows, render the NSI script,
//!    compile it with makensis, remove the script
//! 3. **Generate archives** for every target concurrently
//!
//! # Example
//!
//! ```no_run
//! use release_packager::bundler::{PackageSettings, Packager, SettingsBuilder};
//!
//! # async fn example() -> release_packager::bundler::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .root(".")
//!     .package_settings(PackageSettings {
//!         product_name: "MyApp".into(),
//!         version: "1.0.0".into(),
//!     })
//!     .build()?;
//!
//! let report = Packager::new(settings).run().await?;
//!
//! for artifact in &report.artifacts {
//!     println!("Created: {} ({} bytes)", artifact.path.display(), artifact.size);
//!     println!("SHA256: {}", artifact.checksum);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA256 checksum calculation for artifacts
//! - `orchestrator` - Main [`Packager`] struct and pipeline stages
//! - [`tool_detection`] - External tool lookup

pub mod checksum;
mod orchestrator;
pub mod tool_detection;

pub use orchestrator::{ArtifactKind, PackagedArtifact, Packager, PackagingReport, StageFailure};
