//! Staging tree and installer script generation without external tools.

mod common;

use common::{PROJECT_FILES, fixture, write_file};
use release_packager::{
    bundler::{
        PackageSettings, SettingsBuilder, archive::tarball::stage_files,
        platform::windows::nsis::prepare_installer,
    },
    source::FileList,
};
use std::path::Path;
use walkdir::WalkDir;

fn project_list() -> FileList {
    FileList::from_unsorted(PROJECT_FILES.iter().map(|(path, _)| *path))
}

fn relative_files(dir: &Path) -> Vec<String> {
    let mut files: Vec<String> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            entry
                .path()
                .strip_prefix(dir)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    files.sort();
    files
}

#[tokio::test]
async fn staged_tree_matches_sources() {
    let project = tempfile::tempdir().unwrap();
    for (path, content) in PROJECT_FILES {
        write_file(project.path(), path, content);
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(
            project.path().join("node-builds/osx/node"),
            std::fs::Permissions::from_mode(0o755),
        )
        .unwrap();
    }

    let out = tempfile::tempdir().unwrap();
    let staging = out.path().join("demo-v1.0.0-all");
    // Leftovers from a previous run must disappear
    write_file(&staging, "stale.txt", "old");

    let files = project_list();
    stage_files(project.path(), &staging, &files).await.unwrap();

    let staged = relative_files(&staging);
    assert_eq!(staged, files.iter().collect::<Vec<_>>());

    for path in files.iter() {
        let source = project.path().join(path);
        let copy = staging.join(path);
        assert_eq!(
            std::fs::read(&source).unwrap(),
            std::fs::read(&copy).unwrap(),
            "{path}"
        );
        assert_eq!(
            std::fs::metadata(&source).unwrap().permissions(),
            std::fs::metadata(&copy).unwrap().permissions(),
            "{path}"
        );
    }
}

#[tokio::test]
async fn staging_a_missing_file_fails() {
    let project = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let files = FileList::from_unsorted(["gone.js"]);
    assert!(
        stage_files(project.path(), &out.path().join("x"), &files)
            .await
            .is_err()
    );
}

#[tokio::test]
async fn project_template_script_is_windows_filtered() {
    let project = tempfile::tempdir().unwrap();
    let support = project.path().join("support");
    std::fs::create_dir_all(&support).unwrap();
    let template = support.join("installer_nsi.template");
    std::fs::copy(fixture("installer_nsi.template"), &template).unwrap();

    let out = tempfile::tempdir().unwrap();
    let settings = SettingsBuilder::new()
        .root(project.path())
        .output_dir(out.path())
        .template_path(&template)
        .package_settings(PackageSettings {
            product_name: "demo".into(),
            version: "1.0.0".into(),
        })
        .build()
        .unwrap();

    let prepared = prepare_installer(&settings, &project_list()).await.unwrap();
    let script_path = prepared.script_path().to_path_buf();
    assert_eq!(script_path.parent().unwrap(), support.as_path());
    assert_eq!(
        prepared.installer_path(),
        out.path().join("demo-v1.0.0-windows-setup.exe")
    );

    let bytes = std::fs::read(&script_path).unwrap();
    assert_eq!(&bytes[..3], b"\xEF\xBB\xBF");
    let script = String::from_utf8(bytes[3..].to_vec()).unwrap();

    assert!(script.contains(r#"!define ROOT_PATH "..""#));
    assert!(script.contains(r#"!define PRODUCT_VERSION "v1.0.0""#));
    assert!(script.contains(r#"VIProductVersion "1.0.0.0""#));
    assert!(script.contains(r#"  File /oname=README.txt "${ROOT_PATH}\README.md""#));
    assert!(script.contains(r#"  File /oname=LICENSE.txt "${ROOT_PATH}\LICENSE""#));
    assert!(script.contains(r#"  File "${ROOT_PATH}\node-builds\win\node.exe""#));
    assert!(script.contains(r#"  File "${ROOT_PATH}\node-builds\tmp\shared.txt""#));
    assert!(!script.contains("osx"));
    assert!(script.contains(r#"  RMDir "$INSTDIR\lib\util""#));
    assert!(!script.contains("{{"));

    let util = script.find(r#"RMDir "$INSTDIR\lib\util""#).unwrap();
    let lib = script.find(r#"RMDir "$INSTDIR\lib""#).unwrap();
    assert!(util < lib);

    drop(prepared);
    assert!(!script_path.exists());
}

#[tokio::test]
async fn template_without_file_lists_is_fatal() {
    let project = tempfile::tempdir().unwrap();
    let template = project.path().join("broken.template");
    std::fs::write(&template, "Name {{product}}\n").unwrap();

    let out = tempfile::tempdir().unwrap();
    let settings = SettingsBuilder::new()
        .root(project.path())
        .output_dir(out.path())
        .template_path(&template)
        .package_settings(PackageSettings {
            product_name: "demo".into(),
            version: "1.0.0".into(),
        })
        .build()
        .unwrap();

    let err = prepare_installer(&settings, &project_list()).await.unwrap_err();
    assert!(err.to_string().contains("install_file_list"));
    assert!(!out.path().join("demo-v1.0.0-windows-setup.exe").exists());
}
