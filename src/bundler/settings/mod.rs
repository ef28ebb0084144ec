//! Configuration structures for packaging operations.
//!
//! [`Settings`] holds everything one packaging run needs: release metadata,
//! paths, the prebuilt-binary filter policy and the targets to produce.
//! Construct it with [`SettingsBuilder`].

mod builder;
mod core;
mod package;

// Re-export all public types
pub use builder::SettingsBuilder;
pub use self::core::Settings;
pub use package::PackageSettings;
