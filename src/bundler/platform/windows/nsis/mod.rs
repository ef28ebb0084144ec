//! Windows NSIS installer creation.
//!
//! Creates the release's Windows installer using NSIS (Nullsoft Scriptable
//! Install System): the Windows-filtered file list becomes install and
//! uninstall directives, which fill the installer template.
//!
//! # Module Organization
//!
//! - `directives` - install/remove directive records built from a file list
//! - `template` - built-in NSI script template
//! - `script` - NSIS rendering and template filling
//! - `toolset` - makensis location
//! - `build` - makensis execution
//! - `utils` - path conversion, version formatting, BOM writing

pub mod directives;
pub mod script;
pub mod template;
pub mod utils;

mod build;
mod toolset;

use crate::{
    bundler::{
        error::{ErrorExt, Result},
        platform::Target,
        settings::Settings,
        template::Template,
        utils::fs,
    },
    source::FileList,
};
use script::ScriptValues;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// A generated installer script waiting to be compiled.
///
/// The script lives in a temporary file that is deleted when this value is
/// consumed by [`compile_installer`] or dropped.
#[derive(Debug)]
pub struct PreparedInstaller {
    script: NamedTempFile,
    installer_path: PathBuf,
}

impl PreparedInstaller {
    /// Path of the temporary NSI script.
    pub fn script_path(&self) -> &Path {
        self.script.path()
    }

    /// Path the compiled installer will be written to.
    pub fn installer_path(&self) -> &Path {
        &self.installer_path
    }
}

/// Generate the installer script for `files`.
///
/// # Process
///
/// 1. Filter `files` for Windows
/// 2. Load the project template, or the built-in one
/// 3. Build directives and fill the template
/// 4. Write the script (UTF-8 with BOM) to a temporary file beside the template
///
/// Any failure here is fatal to the run: nothing has been compiled yet.
pub async fn prepare_installer(settings: &Settings, files: &FileList) -> Result<PreparedInstaller> {
    let windows_files = settings.filter_policy().apply(files, Target::Windows);

    let (template, script_dir) = match settings.template_path() {
        Some(path) => {
            log::info!("Using installer template {}", path.display());
            let dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| settings.root().to_path_buf());
            (Template::from_file(path).await?, dir)
        }
        None => {
            log::info!("Using built-in installer template");
            (
                Template::new(template::NSI_TEMPLATE),
                settings.output_dir().to_path_buf(),
            )
        }
    };

    let installer_path = settings.installer_path();
    let values = ScriptValues {
        product: settings.product_name().to_string(),
        version: settings.version_string().to_string(),
        root_path: utils::relative_root(&script_dir, settings.root()),
        output_file: installer_path.display().to_string(),
    };
    let content = script::generate_nsi_script(&template, &windows_files, &values)?;

    fs::create_dir_all(&script_dir, false).await?;
    let script = tempfile::Builder::new()
        .prefix("windows-installer-")
        .suffix(".nsi")
        .tempfile_in(&script_dir)
        .fs_context("creating temporary NSI script", &script_dir)?;
    utils::write_utf8_bom(script.path(), &content).await?;
    log::debug!("Wrote NSI script to {}", script.path().display());

    Ok(PreparedInstaller {
        script,
        installer_path,
    })
}

/// Compile a prepared script with makensis.
///
/// The temporary script is removed whether or not compilation succeeds.
///
/// # Returns
///
/// Path to the generated installer .exe file
pub async fn compile_installer(prepared: PreparedInstaller) -> Result<PathBuf> {
    let PreparedInstaller {
        script,
        installer_path,
    } = prepared;

    let result = match toolset::get_makensis() {
        Ok(makensis) => build::run_makensis(&makensis, script.path(), &installer_path).await,
        Err(e) => Err(e),
    };

    let script_path = script.path().to_path_buf();
    if let Err(e) = script.close() {
        log::warn!(
            "Could not remove temporary NSI script {}: {}",
            script_path.display(),
            e
        );
    }

    result?;
    log::info!("✓ Created NSIS installer: {}", installer_path.display());
    Ok(installer_path)
}
