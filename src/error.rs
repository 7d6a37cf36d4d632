// src/error.rs

//! Crate-wide error type
//!
//! All failures are terminal: a build either completes or stops at the
//! first failing phase. There is no retryable class.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid recipe: {0}")]
    Parse(String),

    #[error("git {action} failed: {stderr}")]
    Git { action: String, stderr: String },

    #[error("tag {0} does not exist upstream")]
    TagNotFound(String),

    #[error("{phase} phase failed with exit code {code:?}: {stderr}")]
    Phase {
        phase: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("no files matched {pattern} under {dir}")]
    NoArtifacts { pattern: String, dir: PathBuf },

    #[error("not found: {0}")]
    NotFound(String),
}
