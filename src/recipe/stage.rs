// src/recipe/stage.rs

//! Artifact staging
//!
//! Applies a recipe's glob-to-destination rules to a built source tree.
//! The same function produces both the package and deploy layouts, so
//! the two cannot drift.

use crate::error::{Error, Result};
use crate::recipe::format::ArtifactRule;
use glob::Pattern;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Apply every rule to `source_root`, copying matches under `output_root`.
///
/// Files keep their path relative to each rule's `src` directory. Hidden
/// entries, the `.git` directory included, are never staged. A rule that
/// matches nothing fails the build rather than silently producing an
/// empty layout.
pub fn stage_artifacts(
    rules: &[ArtifactRule],
    source_root: &Path,
    output_root: &Path,
) -> Result<Vec<PathBuf>> {
    let mut staged = Vec::new();
    for rule in rules {
        staged.extend(apply_rule(rule, source_root, output_root)?);
    }
    Ok(staged)
}

fn apply_rule(
    rule: &ArtifactRule,
    source_root: &Path,
    output_root: &Path,
) -> Result<Vec<PathBuf>> {
    let pattern = Pattern::new(&rule.pattern)
        .map_err(|e| Error::Parse(format!("bad artifact pattern {}: {}", rule.pattern, e)))?;

    let src_root = source_root.join(&rule.src);
    if !src_root.is_dir() {
        return Err(Error::NoArtifacts {
            pattern: rule.pattern.clone(),
            dir: src_root,
        });
    }
    let dst_root = output_root.join(&rule.dst);

    let mut copied = Vec::new();
    let walker = WalkDir::new(&src_root)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));
    for entry in walker.filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        if !pattern.matches(&entry.file_name().to_string_lossy()) {
            continue;
        }
        let rel = match entry.path().strip_prefix(&src_root) {
            Ok(rel) => rel,
            Err(_) => continue,
        };

        let dest = dst_root.join(rel);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(entry.path(), &dest)?;
        debug!("Staged {}", dest.display());
        copied.push(dest);
    }

    if copied.is_empty() {
        return Err(Error::NoArtifacts {
            pattern: rule.pattern.clone(),
            dir: src_root,
        });
    }

    Ok(copied)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}
