// Licensed under the Apache-2.0 license

use anyhow::{bail, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::PROJECT_ROOT;

const LICENSE: &str = "Licensed under the Apache-2.0 license";

/// Only the first few lines are searched, so the header may sit inside a
/// block comment.
const HEADER_LINES: usize = 3;

const IGNORED_DIRS: &[&str] = &["target", "examples", ".git"];

fn is_ignored(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| IGNORED_DIRS.contains(&name))
            .unwrap_or(false)
}

fn comment_prefix(path: &Path) -> Option<&'static str> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("rs") => Some("//"),
        Some("toml") => Some("#"),
        _ => None,
    }
}

fn has_header(contents: &str) -> bool {
    contents
        .lines()
        .take(HEADER_LINES)
        .any(|line| line.contains(LICENSE))
}

fn source_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_ignored(e))
    {
        let entry = entry?;
        if entry.file_type().is_file() && comment_prefix(entry.path()).is_some() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn missing_headers(root: &Path) -> Result<Vec<PathBuf>> {
    let mut missing = Vec::new();
    for path in source_files(root)? {
        if !has_header(&fs::read_to_string(&path)?) {
            missing.push(path);
        }
    }
    Ok(missing)
}

pub(crate) fn check() -> Result<()> {
    println!("Checking license headers");
    let missing = missing_headers(&PROJECT_ROOT)?;
    for path in &missing {
        println!("  missing header: {}", path.display());
    }
    if !missing.is_empty() {
        bail!(
            "{} file(s) without a license header; run `cargo xtask header-fix`",
            missing.len()
        );
    }
    Ok(())
}

pub(crate) fn fix() -> Result<()> {
    for path in missing_headers(&PROJECT_ROOT)? {
        let Some(prefix) = comment_prefix(&path) else {
            continue;
        };
        let contents = fs::read_to_string(&path)?;
        fs::write(&path, format!("{prefix} {LICENSE}\n\n{contents}"))?;
        println!("  added header: {}", path.display());
    }
    Ok(())
}
