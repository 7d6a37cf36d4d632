// src/recipe/galley.rs

//! The build engine
//!
//! Runs a recipe through the fixed phase sequence:
//! fetch -> configure -> compile -> stage. Each phase blocks on its
//! subprocess and any non-zero exit stops the build. The only
//! parallelism is the job count handed to the native build tool.

use crate::error::{Error, Result};
use crate::recipe::format::Recipe;
use crate::recipe::parser::validate_recipe;
use crate::recipe::{source, stage};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;
use tracing::{debug, info, warn};

/// Engine configuration
#[derive(Debug, Clone)]
pub struct GalleyConfig {
    /// Explicit working directory for source checkouts. `None` means a
    /// fresh temporary directory per build. Repeated builds that share a
    /// workdir reuse the checkout instead of cloning again.
    pub workdir: Option<PathBuf>,
    /// Parallelism handed to the native build tool
    pub jobs: u32,
    /// Keep a temporary working directory after the build (for debugging)
    pub keep_workdir: bool,
}

impl Default for GalleyConfig {
    fn default() -> Self {
        let jobs = std::thread::available_parallelism()
            .map(|p| p.get() as u32)
            .unwrap_or(4);

        Self {
            workdir: None,
            jobs,
            keep_workdir: false,
        }
    }
}

/// Result of building a recipe
#[derive(Debug)]
pub struct BuildReport {
    /// Package output directory
    pub package_dir: PathBuf,
    /// Files staged into the package layout
    pub staged: Vec<PathBuf>,
    /// Accumulated build log (phase markers plus subprocess output)
    pub log: String,
    /// Validation warnings surfaced before the build started
    pub warnings: Vec<String>,
}

/// The build engine
pub struct Galley {
    config: GalleyConfig,
}

impl Galley {
    /// Create an engine with the given configuration
    pub fn new(config: GalleyConfig) -> Self {
        Self { config }
    }

    /// Create an engine with default configuration
    pub fn with_defaults() -> Self {
        Self::new(GalleyConfig::default())
    }

    /// Run the full pipeline for a recipe.
    pub fn build(&self, recipe: &Recipe, package_dir: &Path) -> Result<BuildReport> {
        info!(
            "Building {} version {}",
            recipe.package.name, recipe.package.version
        );

        let warnings = validate_recipe(recipe)?;
        for warning in &warnings {
            warn!("{}", warning);
        }

        let mut run = BuildRun::new(self, recipe)?;
        run.warnings = warnings;

        info!("Fetching source...");
        run.fetch()?;

        info!("Configuring...");
        run.configure(package_dir)?;

        info!("Compiling...");
        run.compile()?;

        info!("Staging artifacts...");
        let staged = run.stage(package_dir)?;

        let (log, warnings) = run.finish();
        Ok(BuildReport {
            package_dir: package_dir.to_path_buf(),
            staged,
            log,
            warnings,
        })
    }

    /// Restage artifacts from an existing checkout into a deploy layout.
    ///
    /// Applies the identical rules as the package phase, for consumers
    /// that import the artifacts rather than link against the package.
    pub fn deploy(&self, recipe: &Recipe, deploy_dir: &Path) -> Result<Vec<PathBuf>> {
        let warnings = validate_recipe(recipe)?;
        for warning in &warnings {
            warn!("{}", warning);
        }

        let workdir = self.config.workdir.as_ref().ok_or_else(|| {
            Error::NotFound("deploy requires an explicit workdir holding a built checkout".to_string())
        })?;

        let source_dir = workdir.join(&recipe.package.name);
        if !source_dir.is_dir() {
            return Err(Error::NotFound(format!(
                "no checkout at {}",
                source_dir.display()
            )));
        }

        fs::create_dir_all(deploy_dir)?;
        let staged = stage::stage_artifacts(&recipe.artifacts, &source_dir, deploy_dir)?;
        info!(
            "Deployed {} files into {}",
            staged.len(),
            deploy_dir.display()
        );
        Ok(staged)
    }
}

/// State for one build of one recipe
struct BuildRun<'a> {
    galley: &'a Galley,
    recipe: &'a Recipe,
    /// Present while the workdir is temporary and not kept; removed on
    /// drop. Kept temporary workdirs are detached up front so they also
    /// survive a failed phase.
    temp: Option<TempDir>,
    source_dir: PathBuf,
    log: String,
    warnings: Vec<String>,
}

impl<'a> BuildRun<'a> {
    fn new(galley: &'a Galley, recipe: &'a Recipe) -> Result<Self> {
        let (temp, root) = match &galley.config.workdir {
            Some(dir) => {
                fs::create_dir_all(dir)?;
                (None, dir.clone())
            }
            None => {
                let temp = TempDir::new()?;
                if galley.config.keep_workdir {
                    // detach immediately so the workdir survives a failed
                    // phase as well as a successful build
                    let root = temp.keep();
                    info!("Keeping workdir at {}", root.display());
                    (None, root)
                } else {
                    let root = temp.path().to_path_buf();
                    (Some(temp), root)
                }
            }
        };

        let source_dir = root.join(&recipe.package.name);

        Ok(Self {
            galley,
            recipe,
            temp,
            source_dir,
            log: String::new(),
            warnings: Vec::new(),
        })
    }

    fn fetch(&mut self) -> Result<()> {
        let tag = self.recipe.tag();
        source::fetch(&self.recipe.source.git, &tag, &self.source_dir)?;
        self.log_line(&format!(
            "Fetched {} at tag {}",
            self.recipe.source.git, tag
        ));
        Ok(())
    }

    fn configure(&mut self, package_dir: &Path) -> Result<()> {
        fs::create_dir_all(package_dir)?;
        // the upstream configure script needs an absolute prefix
        let prefix = package_dir.canonicalize()?;

        let args = self.recipe.configure_args(&prefix);
        let command = format!("{} {}", self.recipe.build.configure, args.join(" "));
        self.run_step("configure", &command)
    }

    fn compile(&mut self) -> Result<()> {
        let jobs = self.recipe.build.jobs.unwrap_or(self.galley.config.jobs);

        if self.recipe.build.depend {
            let command = format!("{} -j{} depend", self.recipe.build.make, jobs);
            self.run_step("depend", &command)?;
        }

        let command = format!("{} -j{}", self.recipe.build.make, jobs);
        self.run_step("make", &command)
    }

    fn stage(&mut self, package_dir: &Path) -> Result<Vec<PathBuf>> {
        let staged = stage::stage_artifacts(&self.recipe.artifacts, &self.source_dir, package_dir)?;
        self.log_line(&format!(
            "Staged {} files into {}",
            staged.len(),
            package_dir.display()
        ));
        Ok(staged)
    }

    /// Run one build step through the shell, capturing its output
    fn run_step(&mut self, phase: &str, command: &str) -> Result<()> {
        info!("Running {} step", phase);
        debug!("Command: {}", command);

        let output = Command::new("sh")
            .arg("-c")
            .arg(command)
            .current_dir(&self.source_dir)
            .output()?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        self.log_line(&format!("=== {} ===", phase));
        if !stdout.is_empty() {
            self.log.push_str(&stdout);
            self.log.push('\n');
        }
        if !stderr.is_empty() {
            self.log.push_str(&stderr);
            self.log.push('\n');
        }

        if !output.status.success() {
            return Err(Error::Phase {
                phase: phase.to_string(),
                code: output.status.code(),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(())
    }

    fn finish(mut self) -> (String, Vec<String>) {
        (std::mem::take(&mut self.log), std::mem::take(&mut self.warnings))
    }

    fn log_line(&mut self, line: &str) {
        self.log.push_str(line);
        self.log.push('\n');
    }
}
