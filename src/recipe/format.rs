// src/recipe/format.rs

//! Recipe file format definitions
//!
//! Recipes are TOML files that describe one pinned upstream release:
//! where to fetch it, how to configure and compile it, and which build
//! artifacts to stage for downstream consumers.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// A complete recipe for building a third-party dependency
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Package identity
    pub package: PackageSection,

    /// Pinned source location
    pub source: SourceSection,

    /// User-settable build options
    #[serde(default)]
    pub options: OptionsSection,

    /// Build tool invocations
    #[serde(default)]
    pub build: BuildSection,

    /// Artifact staging rules, applied identically for the package and
    /// deploy layouts
    #[serde(default)]
    pub artifacts: Vec<ArtifactRule>,
}

impl Recipe {
    /// Substitute built-in variables in a template string.
    ///
    /// Replaces `%(name)s`, `%(version)s`, `%(version_)s` (the version
    /// with every `.` turned into `_`) and `%(prefix)s`.
    pub fn substitute(&self, template: &str, prefix: &str) -> String {
        template
            .replace("%(name)s", &self.package.name)
            .replace("%(version)s", &self.package.version)
            .replace("%(version_)s", &self.package.version.replace('.', "_"))
            .replace("%(prefix)s", prefix)
    }

    /// The source-control tag this recipe pins.
    ///
    /// Always recomputed from the version string so the two cannot drift.
    pub fn tag(&self) -> String {
        self.substitute(&self.source.tag, "")
    }

    /// Assemble the configure argument list for a given install prefix.
    ///
    /// The threading option is read here, once: when off, `no-threads`
    /// is appended after the fixed flag set.
    pub fn configure_args(&self, prefix: &Path) -> Vec<String> {
        let prefix = prefix.to_string_lossy();
        let mut args: Vec<String> = self
            .build
            .prefix_flags
            .iter()
            .map(|f| self.substitute(f, &prefix))
            .collect();
        args.extend(self.build.flags.iter().cloned());
        if !self.options.threads {
            args.push("no-threads".to_string());
        }
        args
    }
}

/// Package identity section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageSection {
    /// Package name
    pub name: String,

    /// Upstream version, the single source of truth for the derived tag
    pub version: String,

    /// Short description
    #[serde(default)]
    pub summary: Option<String>,

    /// Full description
    #[serde(default)]
    pub description: Option<String>,

    /// License identifier (SPDX)
    #[serde(default)]
    pub license: Option<String>,

    /// Homepage URL
    #[serde(default)]
    pub homepage: Option<String>,
}

/// Pinned source location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSection {
    /// Git repository URL
    pub git: String,

    /// Tag template, e.g. `OpenSSL_%(version_)s`
    ///
    /// Supports the same substitutions as build commands.
    pub tag: String,
}

/// User-settable build options
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionsSection {
    /// Build with threading support (default: off, which appends
    /// `no-threads` to the configure arguments)
    #[serde(default)]
    pub threads: bool,
}

/// Build tool invocations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildSection {
    /// Configure command run in the source tree
    #[serde(default = "default_configure")]
    pub configure: String,

    /// Prefix-bearing configure arguments; `%(prefix)s` is bound to the
    /// package output directory
    #[serde(default = "default_prefix_flags")]
    pub prefix_flags: Vec<String>,

    /// Fixed configure flags appended after the prefix arguments
    #[serde(default)]
    pub flags: Vec<String>,

    /// Native build tool
    #[serde(default = "default_make")]
    pub make: String,

    /// Run a dependency-generation pass (`make -jN depend`) before the
    /// full build
    #[serde(default)]
    pub depend: bool,

    /// Parallel jobs, overriding the engine default
    #[serde(default)]
    pub jobs: Option<u32>,
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            configure: default_configure(),
            prefix_flags: default_prefix_flags(),
            flags: Vec::new(),
            make: default_make(),
            depend: false,
            jobs: None,
        }
    }
}

fn default_configure() -> String {
    "./config".to_string()
}

fn default_prefix_flags() -> Vec<String> {
    vec!["--prefix=%(prefix)s".to_string()]
}

fn default_make() -> String {
    "make".to_string()
}

/// One glob-to-destination staging rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactRule {
    /// File-name glob, e.g. `*.h` or `*.a`
    pub pattern: String,

    /// Directory to search, relative to the source tree
    #[serde(default = "default_src")]
    pub src: String,

    /// Destination directory, relative to the output root
    pub dst: String,
}

fn default_src() -> String {
    ".".to_string()
}
