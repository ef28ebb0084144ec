//! Shared helpers for integration tests.

#![allow(dead_code)]

use release_packager::bundler::{PackageSettings, Settings, SettingsBuilder, Target};
use std::{
    path::{Path, PathBuf},
    process::Command,
};

/// Files committed into every test project.
pub const PROJECT_FILES: &[(&str, &str)] = &[
    ("README.md", "# demo\n"),
    ("LICENSE", "MIT\n"),
    ("lib/app.js", "console.log('demo');\n"),
    ("lib/util/strings.js", "exports.trim = s => s.trim();\n"),
    ("node-builds/osx/node", "osx binary\n"),
    ("node-builds/win/node.exe", "win binary\n"),
    ("node-builds/lin/node", "linux binary\n"),
    ("node-builds/sol/node", "solaris binary\n"),
    ("node-builds/tmp/shared.txt", "shared\n"),
    (".hidden", "secret\n"),
];

/// Whether `tool` is on PATH; tests needing it skip otherwise.
pub fn tool_available(tool: &str) -> bool {
    let found = which::which(tool).is_ok();
    if !found {
        eprintln!("skipping: {tool} not found on PATH");
    }
    found
}

pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

fn git(root: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args([
            "-c",
            "user.name=Packager Test",
            "-c",
            "user.email=test@example.com",
            "-c",
            "commit.gpgsign=false",
        ])
        .args(args)
        .current_dir(root)
        .status()
        .unwrap();
    assert!(status.success(), "git {args:?} failed");
}

/// Writes [`PROJECT_FILES`] plus a `package.json` under `root` and commits them.
pub fn init_project(root: &Path) {
    write_file(
        root,
        "package.json",
        r#"{"name": "demo", "version": "1.0.0"}"#,
    );
    for (path, content) in PROJECT_FILES {
        write_file(root, path, content);
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let node = root.join("node-builds/osx/node");
        std::fs::set_permissions(node, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    git(root, &["init", "-q"]);
    git(root, &["add", "-A"]);
    git(root, &["commit", "-q", "-m", "initial"]);
}

/// Creates a standalone repository at `dir` holding `files`.
pub fn init_repo(dir: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        write_file(dir, path, content);
    }
    git(dir, &["init", "-q"]);
    git(dir, &["add", "-A"]);
    git(dir, &["commit", "-q", "-m", "initial"]);
}

/// Mounts the repository at `source` as a submodule at `mount`, checks out
/// its own submodules and commits the result.
pub fn add_submodule(root: &Path, mount: &str, source: &Path) {
    let source = source.to_str().unwrap();
    git(
        root,
        &["-c", "protocol.file.allow=always", "submodule", "add", source, mount],
    );
    git(
        root,
        &[
            "-c",
            "protocol.file.allow=always",
            "submodule",
            "update",
            "--init",
            "--recursive",
        ],
    );
    git(root, &["commit", "-q", "-m", &format!("add {mount}")]);
}

pub fn settings(root: &Path, output_dir: &Path, targets: Vec<Target>) -> Settings {
    SettingsBuilder::new()
        .root(root)
        .output_dir(output_dir)
        .package_settings(PackageSettings {
            product_name: "demo".into(),
            version: "1.0.0".into(),
        })
        .targets(targets)
        .skip_installer(true)
        .build()
        .unwrap()
}

pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}
