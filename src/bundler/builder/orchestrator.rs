//! Main packaging orchestration.
//!
//! This module provides the [`Packager`] orchestrator that sequences the
//! release pipeline and collects a [`PackagingReport`].

use super::checksum::calculate_sha256;
use crate::{
    bail,
    bundler::{
        archive::ArchiveJob,
        error::{ErrorExt, Result},
        platform::{Target, windows::nsis},
        settings::Settings,
    },
    source::{self, FileList},
};
use std::{fmt, path::PathBuf, sync::Arc};
use tokio::task::JoinSet;

/// What a produced artifact is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// The NSIS installer executable
    Installer,
    /// A release archive for one target
    Archive(Target),
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Installer => f.write_str("windows installer"),
            ArtifactKind::Archive(target) => write!(f, "{} archive", target),
        }
    }
}

/// An artifact produced by the run.
#[derive(Debug, Clone)]
pub struct PackagedArtifact {
    /// Installer or archive
    pub kind: ArtifactKind,
    /// Where it was written
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
    /// Hex-encoded SHA-256
    pub checksum: String,
}

/// A stage or job that did not produce its artifact.
#[derive(Debug, Clone)]
pub struct StageFailure {
    /// Name of the artifact that was not produced
    pub artifact: String,
    /// Rendered error
    pub error: String,
}

/// Outcome of a packaging run.
#[derive(Debug, Clone, Default)]
pub struct PackagingReport {
    /// Number of tracked files enumerated
    pub files_enumerated: usize,
    /// Artifacts produced, ordered by path
    pub artifacts: Vec<PackagedArtifact>,
    /// Non-fatal failures
    pub failures: Vec<StageFailure>,
}

impl PackagingReport {
    /// Whether every requested artifact was produced.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn record_failure(&mut self, artifact: String, error: impl fmt::Display) {
        log::error!("✗ Failed to generate {}: {}", artifact, error);
        self.failures.push(StageFailure {
            artifact,
            error: error.to_string(),
        });
    }
}

/// Main packaging orchestrator.
///
/// # Stages
///
/// 1. Enumerate tracked files. Failure aborts the run.
/// 2. Generate the installer. Template problems abort the run; a failed or
///    missing makensis is recorded and the run continues.
/// 3. Generate one archive per target, concurrently. Each job filters its
///    own list and failures are recorded per job.
///
/// Stage 2 finishes, including removal of the temporary script, before
/// stage 3 starts.
#[derive(Debug, Clone)]
pub struct Packager {
    settings: Arc<Settings>,
}

impl Packager {
    /// Creates a packager for the given settings.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Arc::new(settings),
        }
    }

    /// Returns a reference to the packaging settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Runs the whole pipeline.
    ///
    /// # Returns
    ///
    /// * `Ok(PackagingReport)` - the run completed; check
    ///   [`PackagingReport::is_success`] for per-artifact failures
    /// * `Err` - a fatal stage failed (enumeration or installer template)
    pub async fn run(&self) -> Result<PackagingReport> {
        log::info!(
            "Packaging {} version {}",
            self.settings.product_name(),
            self.settings.version_string()
        );

        let files = Arc::new(source::enumerate_files(self.settings.root()).await?);
        if files.is_empty() {
            bail!(
                "no tracked files found under {}",
                self.settings.root().display()
            );
        }

        let mut report = PackagingReport {
            files_enumerated: files.len(),
            ..Default::default()
        };

        if self.settings.skip_installer() {
            log::info!("Skipping Windows installer");
        } else {
            self.generate_installer(&files, &mut report).await?;
        }

        self.generate_archives(files, &mut report).await;

        Ok(report)
    }

    /// Stage 2: build the NSIS installer from `files`.
    ///
    /// Returns an error only for script generation problems; compiler
    /// failures land in `report`.
    pub async fn generate_installer(
        &self,
        files: &FileList,
        report: &mut PackagingReport,
    ) -> Result<()> {
        log::info!("Generating Windows installer");
        let prepared = nsis::prepare_installer(&self.settings, files).await?;
        let installer_name = display_name(prepared.installer_path());

        let outcome = match nsis::compile_installer(prepared).await {
            Ok(path) => describe_artifact(ArtifactKind::Installer, path).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(artifact) => report.artifacts.push(artifact),
            Err(e) => report.record_failure(installer_name, e),
        }
        Ok(())
    }

    /// Stage 3: build every target's archive concurrently.
    pub async fn generate_archives(&self, files: Arc<FileList>, report: &mut PackagingReport) {
        let mut jobs = JoinSet::new();

        for &target in self.settings.targets() {
            let settings = Arc::clone(&self.settings);
            let files = Arc::clone(&files);
            jobs.spawn(async move {
                let job = ArchiveJob::for_target(&files, target, &settings);
                let name = job.file_name();
                let outcome = match job.build(&settings).await {
                    Ok(path) => describe_artifact(ArtifactKind::Archive(target), path).await,
                    Err(e) => Err(e),
                };
                (name, outcome)
            });
        }

        while let Some(joined) = jobs.join_next().await {
            match joined {
                Ok((_, Ok(artifact))) => report.artifacts.push(artifact),
                Ok((name, Err(e))) => report.record_failure(name, e),
                Err(e) => report.record_failure("archive job".to_string(), e),
            }
        }

        report.artifacts.sort_by(|a, b| a.path.cmp(&b.path));
    }
}

fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Calculate artifact metadata.
async fn describe_artifact(kind: ArtifactKind, path: PathBuf) -> Result<PackagedArtifact> {
    let size = tokio::fs::metadata(&path)
        .await
        .fs_context("reading artifact metadata", &path)?
        .len();
    let checksum = calculate_sha256(&path).await?;

    log::info!("✓ {}: {} ({} bytes)", kind, path.display(), size);
    Ok(PackagedArtifact {
        kind,
        path,
        size,
        checksum,
    })
}
