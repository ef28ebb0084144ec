//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap, with validation
//! and the runtime configuration derived from it.

use crate::bundler::Target;
use clap::Parser;
use std::path::PathBuf;

/// Release packager for git-tracked projects
#[derive(Parser, Debug)]
#[command(
    name = "release_packager",
    version,
    about = "Builds a Windows installer and per-platform archives from a git checkout",
    long_about = "Packages every git-tracked file of a project (submodules included) into release artifacts:

  <product>-v<version>-windows-setup.exe   NSIS installer (needs makensis)
  <product>-v<version>-windows.zip
  <product>-v<version>-{all,mac,linux,solaris}.tar.gz

Prebuilt binaries for other platforms are pruned from each per-platform artifact.

Usage:
  release_packager --root .
  release_packager --root . --skip-installer --target mac --target linux
  release_packager --root . --list-files --target windows

Exit code 0 = every requested artifact was produced."
)]
pub struct Args {
    /// Packaging root (a git checkout)
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Metadata file with `name` and `version` (package.json or Cargo.toml)
    ///
    /// Defaults to <root>/package.json, falling back to <root>/Cargo.toml.
    #[arg(short, long, value_name = "FILE")]
    pub metadata: Option<PathBuf>,

    /// NSIS installer template
    ///
    /// Defaults to <root>/support/installer_nsi.template when present,
    /// otherwise a built-in template.
    #[arg(long, value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// Directory receiving artifacts and staging trees (default: root)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Product name used in artifact names (default: metadata name)
    #[arg(short, long, value_name = "NAME")]
    pub product: Option<String>,

    /// Archive target to build; repeat for several (default: all five)
    #[arg(short, long = "target", value_enum, value_name = "TARGET")]
    pub targets: Vec<Target>,

    /// Path substring marking prebuilt binaries
    #[arg(long, value_name = "MARKER")]
    pub prebuilt_marker: Option<String>,

    /// Path substring that always keeps a prebuilt binary; repeatable
    #[arg(long = "keep-marker", value_name = "MARKER")]
    pub keep_markers: Vec<String>,

    /// Skip the Windows installer
    #[arg(long)]
    pub skip_installer: bool,

    /// Remove tar.gz staging trees after archiving
    #[arg(long)]
    pub clean_staging: bool,

    /// Print the files that would be packaged and exit
    ///
    /// With exactly one --target, prints that target's filtered list.
    #[arg(long)]
    pub list_files: bool,

    /// Verbose output (debug logging)
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if !self.root.is_dir() {
            return Err(format!(
                "Root is not a directory: {}",
                self.root.display()
            ));
        }

        if let Some(metadata) = self.metadata.as_ref().filter(|m| !m.is_file()) {
            return Err(format!("Metadata file not found: {}", metadata.display()));
        }

        if let Some(template) = self.template.as_ref().filter(|t| !t.is_file()) {
            return Err(format!("Template not found: {}", template.display()));
        }

        if self.product.as_deref().is_some_and(|p| p.trim().is_empty()) {
            return Err("Product name cannot be empty".to_string());
        }

        if self.prebuilt_marker.as_deref() == Some("") {
            return Err("Prebuilt marker cannot be empty".to_string());
        }

        if self.keep_markers.iter().any(String::is_empty) {
            return Err("Keep markers cannot be empty".to_string());
        }

        Ok(())
    }

    /// Target whose filtered list `--list-files` prints, if exactly one was given.
    pub fn list_target(&self) -> Option<Target> {
        match self.targets.as_slice() {
            [single] => Some(*single),
            _ => None,
        }
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,

    /// Default `env_logger` filter when `RUST_LOG` is unset
    log_level: &'static str,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        let log_level = if args.quiet {
            "warn"
        } else if args.verbose {
            "debug"
        } else {
            "info"
        };

        Self {
            output: super::OutputManager::new(args.verbose, args.quiet),
            log_level,
        }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Default log filter
    pub fn log_level(&self) -> &'static str {
        self.log_level
    }

    /// Print verbose message if in verbose mode
    pub fn verbose_println(&self, message: &str) -> std::io::Result<()> {
        self.output.verbose(message)
    }

    /// Print success message if not in quiet mode
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    /// Print warning message if not in quiet mode
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.output.warn(message)
    }

    /// Print error message
    pub fn error(&self, message: &str) -> std::io::Result<()> {
        self.output.error(message)
    }

    /// Print progress message
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        self.output.progress(message)
    }

    /// Print section header
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        self.output.section(title)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.output.indent(message)
    }
}
