// src/recipe/mod.rs

//! Recipe system for building third-party dependencies from source
//!
//! A recipe defines how to produce one pinned upstream release for
//! downstream consumption:
//! - Identity (name, version, license) and the tag derived from the
//!   version
//! - A build option (threading on or off)
//! - The configure and native build tool invocations with fixed flags
//! - Artifact staging rules (headers, static archives)
//!
//! # Example Recipe
//!
//! ```toml
//! [package]
//! name = "openssl"
//! version = "1.1.1"
//! license = "Apache-2.0"
//!
//! [source]
//! git = "https://github.com/openssl/openssl.git"
//! tag = "OpenSSL_%(version_)s"
//!
//! [options]
//! threads = false
//!
//! [build]
//! configure = "./config"
//! prefix_flags = ["--prefix=%(prefix)s", "--openssldir=%(prefix)s"]
//! flags = ["no-shared", "no-ssl3", "enable-ubsan"]
//! depend = true
//!
//! [[artifacts]]
//! pattern = "*.h"
//! src = "include/openssl"
//! dst = "include/openssl"
//!
//! [[artifacts]]
//! pattern = "*.a"
//! dst = "lib"
//! ```
//!
//! Phases run strictly in sequence, fetch then configure then compile
//! then stage, once per invocation. Any subprocess failure is fatal.

mod format;
mod galley;
pub mod parser;
mod source;
mod stage;

pub use format::{ArtifactRule, BuildSection, OptionsSection, PackageSection, Recipe, SourceSection};
pub use galley::{BuildReport, Galley, GalleyConfig};
pub use parser::{parse_recipe, parse_recipe_file, validate_recipe};
