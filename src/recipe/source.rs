// src/recipe/source.rs

//! Pinned git source fetching
//!
//! A recipe pins one exact upstream tag. Fetching clones the repository,
//! refreshes tags, verifies the tag exists, and checks it out into a
//! local branch named after the tag. Re-invocation against an existing
//! checkout reuses both the clone and the branch.

use crate::error::{Error, Result};
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

/// Fetch `url` into `dest` and check out the pinned `tag`.
pub fn fetch(url: &str, tag: &str, dest: &Path) -> Result<()> {
    if dest.join(".git").is_dir() {
        info!("Reusing existing checkout: {}", dest.display());
    } else {
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        info!("Cloning {}", url);
        let dest_str = dest.to_string_lossy();
        run_git(None, &["clone", url, dest_str.as_ref()])?;
    }

    run_git(Some(dest), &["fetch", "--all", "--tags", "--prune"])?;

    if !ref_exists(dest, &format!("refs/tags/{}", tag))? {
        return Err(Error::TagNotFound(tag.to_string()));
    }

    if ref_exists(dest, &format!("refs/heads/{}", tag))? {
        debug!("Branch {} already exists, checking it out", tag);
        run_git(Some(dest), &["checkout", tag])?;
    } else {
        run_git(Some(dest), &["checkout", &format!("tags/{}", tag), "-b", tag])?;
    }

    Ok(())
}

fn run_git(cwd: Option<&Path>, args: &[&str]) -> Result<()> {
    debug!("git {}", args.join(" "));

    let mut cmd = Command::new("git");
    cmd.args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let output = cmd.output().map_err(|e| Error::Git {
        action: args[0].to_string(),
        stderr: e.to_string(),
    })?;

    if !output.status.success() {
        return Err(Error::Git {
            action: args[0].to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(())
}

fn ref_exists(dir: &Path, reference: &str) -> Result<bool> {
    let refspec = format!("{}^{{commit}}", reference);
    let output = Command::new("git")
        .args(["rev-parse", "-q", "--verify", refspec.as_str()])
        .current_dir(dir)
        .output()
        .map_err(|e| Error::Git {
            action: "rev-parse".to_string(),
            stderr: e.to_string(),
        })?;

    Ok(output.status.success())
}
