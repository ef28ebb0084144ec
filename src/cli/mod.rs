//! Command line interface for the release packager.
//!
//! This module parses arguments, reads project metadata into [`Settings`],
//! runs the [`Packager`] and reports its artifacts.

mod args;
mod output;

pub use args::{Args, RuntimeConfig};
pub use output::OutputManager;

use crate::{
    bundler::{
        FilterPolicy, PackageSettings, Packager, PackagingReport, Settings, SettingsBuilder,
    },
    error::{CliError, Result},
    metadata::{self, PackagerMetadata},
    source,
};
use std::path::{Path, PathBuf};

/// Main CLI entry point
///
/// Returns the process exit code: 0 when every requested artifact was
/// produced, 1 when any stage or job failed.
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    let config = RuntimeConfig::from(&args);
    init_logging(config.log_level());

    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    execute(&args, &config).await
}

/// Initialise `env_logger`; `RUST_LOG` takes precedence over `level`.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // Keep an already installed logger
    let _ = env_logger::Builder::from_env(env).try_init();
}

/// Run with already parsed and validated arguments.
pub async fn execute(args: &Args, config: &RuntimeConfig) -> Result<i32> {
    let settings = build_settings(args)?;

    if args.list_files {
        return list_files(args, &settings, config).await;
    }

    config.section(&format!(
        "Packaging {} v{}",
        settings.product_name(),
        settings.version_string()
    ))?;
    config.verbose_println(&format!("Root: {}", settings.root().display()))?;
    config.verbose_println(&format!("Output: {}", settings.output_dir().display()))?;
    if let Some(template) = settings.template_path() {
        config.verbose_println(&format!("Template: {}", template.display()))?;
    }

    let report = Packager::new(settings).run().await?;
    print_report(&report, config)?;

    Ok(if report.is_success() { 0 } else { 1 })
}

/// Build [`Settings`] from arguments and project metadata.
///
/// Command line values override metadata values.
pub fn build_settings(args: &Args) -> Result<Settings> {
    let metadata_path = args
        .metadata
        .clone()
        .unwrap_or_else(|| metadata::default_metadata_path(&args.root));
    let project = metadata::load_metadata(&metadata_path)?;

    let package = PackageSettings {
        product_name: args.product.clone().unwrap_or(project.name),
        version: project.version,
    };

    let mut builder = SettingsBuilder::new()
        .root(&args.root)
        .package_settings(package)
        .filter_policy(filter_policy(args, project.packager.as_ref()))
        .skip_installer(args.skip_installer)
        .clean_staging(args.clean_staging);

    if let Some(dir) = &args.output_dir {
        builder = builder.output_dir(dir);
    }
    if let Some(template) = args.template.clone().or_else(|| default_template(&args.root)) {
        builder = builder.template_path(template);
    }
    if !args.targets.is_empty() {
        builder = builder.targets(args.targets.clone());
    }

    Ok(builder.build()?)
}

/// Merge filter rules: defaults, then metadata, then command line.
pub fn filter_policy(args: &Args, packager: Option<&PackagerMetadata>) -> FilterPolicy {
    let mut policy = FilterPolicy::default();

    if let Some(packager) = packager {
        if let Some(marker) = &packager.prebuilt_marker {
            policy.prebuilt_marker = marker.clone();
        }
        if let Some(markers) = &packager.keep_markers {
            policy.keep_markers = markers.clone();
        }
    }

    if let Some(marker) = &args.prebuilt_marker {
        policy.prebuilt_marker = marker.clone();
    }
    if !args.keep_markers.is_empty() {
        policy.keep_markers = args.keep_markers.clone();
    }

    policy
}

/// `<root>/support/installer_nsi.template`, if the project has one.
fn default_template(root: &Path) -> Option<PathBuf> {
    let path = root.join("support").join("installer_nsi.template");
    path.is_file().then_some(path)
}

async fn list_files(args: &Args, settings: &Settings, config: &RuntimeConfig) -> Result<i32> {
    let files = source::enumerate_files(settings.root()).await?;
    let files = match args.list_target() {
        Some(target) => settings.filter_policy().apply(&files, target),
        None => files,
    };

    for path in files.iter() {
        config.output().plain(path)?;
    }
    Ok(0)
}

fn print_report(report: &PackagingReport, config: &RuntimeConfig) -> std::io::Result<()> {
    config.section("Artifacts")?;
    for artifact in &report.artifacts {
        config.success(&format!("{}: {}", artifact.kind, artifact.path.display()))?;
        config.indent(&format!(
            "{} bytes, sha256 {}",
            artifact.size, artifact.checksum
        ))?;
    }

    for failure in &report.failures {
        config.error(&format!("{}: {}", failure.artifact, failure.error))?;
    }

    let produced = report.artifacts.len();
    if report.is_success() {
        config.progress(&format!(
            "{} artifact(s) from {} files",
            produced, report.files_enumerated
        ))
    } else {
        config.warn(&format!(
            "{} artifact(s) produced, {} failed",
            produced,
            report.failures.len()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(extra: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("release_packager").chain(extra.iter().copied()))
            .unwrap()
    }

    #[test]
    fn command_line_markers_override_metadata() {
        let packager = PackagerMetadata {
            prebuilt_marker: Some("prebuilt".into()),
            keep_markers: Some(vec!["shared".into()]),
        };

        let policy = filter_policy(&args(&[]), Some(&packager));
        assert_eq!(policy.prebuilt_marker, "prebuilt");
        assert_eq!(policy.keep_markers, vec!["shared".to_string()]);

        let policy = filter_policy(
            &args(&["--prebuilt-marker", "bin", "--keep-marker", "common"]),
            Some(&packager),
        );
        assert_eq!(policy.prebuilt_marker, "bin");
        assert_eq!(policy.keep_markers, vec!["common".to_string()]);

        assert_eq!(filter_policy(&args(&[]), None), FilterPolicy::default());
    }

    #[test]
    fn settings_come_from_metadata_and_project_template() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("package.json"),
            r#"{"name": "cocos2d-javascript", "version": "0.1.0"}"#,
        )
        .unwrap();
        std::fs::create_dir(dir.path().join("support")).unwrap();
        std::fs::write(
            dir.path().join("support/installer_nsi.template"),
            "{{install_file_list}}{{remove_file_list}}{{remove_dir_list}}",
        )
        .unwrap();

        let root = dir.path().to_str().unwrap();
        let settings = build_settings(&args(&["--root", root, "--target", "mac"])).unwrap();
        assert_eq!(settings.product_name(), "cocos2d-javascript");
        assert_eq!(settings.version_string(), "0.1.0");
        assert_eq!(settings.targets(), &[crate::bundler::Target::Mac]);
        assert!(
            settings
                .template_path()
                .unwrap()
                .ends_with("support/installer_nsi.template")
        );

        let settings = build_settings(&args(&["--root", root, "--product", "cocos2d"])).unwrap();
        assert_eq!(settings.product_name(), "cocos2d");
        assert_eq!(settings.targets().len(), 5);
    }

    #[test]
    fn missing_metadata_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_str().unwrap();
        assert!(build_settings(&args(&["--root", root])).is_err());
    }
}
