//! Install and uninstall directives derived from a file list.
//!
//! [`DirectiveBlock`] decides *what* the installer does; rendering to NSIS
//! syntax lives in the `script` module.

use crate::source::FileList;
use regex::Regex;
use std::{collections::BTreeSet, sync::LazyLock};

/// Documentation files that install with a `.txt` extension.
static PLAIN_TEXT_DOC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(README|LICENSE)(\.md)?$").expect("doc pattern is valid"));

/// One installer instruction.
///
/// Paths are slash-separated and relative to the packaging root (sources) or
/// the install directory (destinations). An empty directory means the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Subsequent files install into `dir`
    SetOutPath { dir: String },
    /// Install `source`, optionally under a different file name
    InstallFile {
        source: String,
        rename: Option<String>,
    },
    /// Uninstall the installed file at `dest`
    RemoveFile { dest: String },
    /// Uninstall the (then empty) directory `dir`
    RemoveDir { dir: String },
}

/// Splits a slash path into its directory and file name.
fn split_path(path: &str) -> (&str, &str) {
    path.rsplit_once('/').unwrap_or(("", path))
}

/// Installed name for a file, when it differs from the source name.
pub fn installed_name(file_name: &str) -> Option<String> {
    PLAIN_TEXT_DOC
        .captures(file_name)
        .map(|caps| format!("{}.txt", &caps[1]))
}

/// Directive accumulator for one installer script.
#[derive(Debug, Default)]
pub struct DirectiveBlock {
    install: Vec<Directive>,
    remove_files: Vec<Directive>,
    remove_dirs: BTreeSet<String>,
    prev_dir: Option<String>,
}

impl DirectiveBlock {
    /// Builds the directives for every file in `files`.
    ///
    /// Plain path order can interleave a directory with its subdirectories
    /// (`a/b.js`, `a/b/c.js`, `a/z.js`), so files are regrouped by directory
    /// first. Each directory is then one contiguous run and gets exactly one
    /// `SetOutPath`.
    pub fn from_files(files: &FileList) -> Self {
        let mut grouped: Vec<(&str, &str, &str)> = files
            .iter()
            .map(|path| {
                let (dir, name) = split_path(path);
                (dir, name, path)
            })
            .collect();
        // Stable, so names keep their sorted order within a directory
        grouped.sort_by_key(|&(dir, _, _)| dir);

        let mut block = Self::default();
        for (dir, name, path) in grouped {
            block.push_file(dir, name, path);
        }
        block
    }

    fn push_file(&mut self, dir: &str, name: &str, path: &str) {
        if self.prev_dir.as_deref() != Some(dir) {
            self.prev_dir = Some(dir.to_string());
            self.install.push(Directive::SetOutPath {
                dir: dir.to_string(),
            });
            self.mark_dir_for_removal(dir);
        }

        let rename = installed_name(name);
        let dest_name = rename.as_deref().unwrap_or(name);
        let dest = if dir.is_empty() {
            dest_name.to_string()
        } else {
            format!("{dir}/{dest_name}")
        };

        self.install.push(Directive::InstallFile {
            source: path.to_string(),
            rename,
        });
        self.remove_files.push(Directive::RemoveFile { dest });
    }

    /// Records `dir` and its ancestors so intermediate directories with no
    /// files of their own are removed too.
    fn mark_dir_for_removal(&mut self, dir: &str) {
        if dir.is_empty() {
            self.remove_dirs.insert(String::new());
            return;
        }
        let mut current = dir;
        loop {
            self.remove_dirs.insert(current.to_string());
            match current.rsplit_once('/') {
                Some((parent, _)) => current = parent,
                None => break,
            }
        }
    }

    /// `SetOutPath` and `InstallFile` directives in file order.
    pub fn install(&self) -> &[Directive] {
        &self.install
    }

    /// `RemoveFile` directives in file order.
    pub fn remove_files(&self) -> &[Directive] {
        &self.remove_files
    }

    /// `RemoveDir` directives, deepest first.
    ///
    /// Reverse lexicographic order puts every directory before its parent,
    /// and the root (empty path) last.
    pub fn remove_dirs(&self) -> Vec<Directive> {
        self.remove_dirs
            .iter()
            .rev()
            .map(|dir| Directive::RemoveDir { dir: dir.clone() })
            .collect()
    }
}
