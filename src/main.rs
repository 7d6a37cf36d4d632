// src/main.rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use galley::recipe::{parse_recipe_file, validate_recipe};
use galley::{Galley, GalleyConfig};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "galley")]
#[command(author, version, about = "Build pinned third-party dependencies from recipes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch, configure, compile, and stage a recipe
    Build {
        /// Path to the recipe file
        recipe: PathBuf,
        /// Package output directory
        #[arg(short, long)]
        output: PathBuf,
        /// Working directory for the source checkout (default: temporary)
        #[arg(short, long)]
        workdir: Option<PathBuf>,
        /// Keep a temporary working directory after the build
        #[arg(long)]
        keep_workdir: bool,
        /// Parallel jobs for the native build tool
        #[arg(short, long)]
        jobs: Option<u32>,
        /// Override the recipe's threading option
        #[arg(long)]
        threads: Option<bool>,
    },
    /// Restage artifacts from an existing checkout into a deploy layout
    Deploy {
        /// Path to the recipe file
        recipe: PathBuf,
        /// Working directory holding the built checkout
        #[arg(short, long)]
        workdir: PathBuf,
        /// Deploy output directory
        #[arg(short, long)]
        dest: PathBuf,
    },
    /// Parse and validate a recipe
    Validate {
        /// Path to the recipe file
        recipe: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            recipe,
            output,
            workdir,
            keep_workdir,
            jobs,
            threads,
        } => {
            let mut recipe = parse_recipe_file(&recipe)?;
            if let Some(threads) = threads {
                recipe.options.threads = threads;
            }

            let mut config = GalleyConfig {
                workdir,
                keep_workdir,
                ..Default::default()
            };
            if let Some(jobs) = jobs {
                config.jobs = jobs;
            }

            let report = Galley::new(config).build(&recipe, &output)?;
            for warning in &report.warnings {
                eprintln!("warning: {}", warning);
            }
            println!(
                "Staged {} files into {}",
                report.staged.len(),
                report.package_dir.display()
            );
            Ok(())
        }
        Commands::Deploy {
            recipe,
            workdir,
            dest,
        } => {
            let recipe = parse_recipe_file(&recipe)?;
            let config = GalleyConfig {
                workdir: Some(workdir),
                ..Default::default()
            };

            let staged = Galley::new(config).deploy(&recipe, &dest)?;
            println!("Deployed {} files into {}", staged.len(), dest.display());
            Ok(())
        }
        Commands::Validate { recipe: path } => {
            let recipe = parse_recipe_file(&path)?;
            let warnings = validate_recipe(&recipe)?;

            info!(
                "Recipe {} {} pins tag {}",
                recipe.package.name,
                recipe.package.version,
                recipe.tag()
            );
            for warning in warnings {
                println!("warning: {}", warning);
            }
            println!("{} is valid", path.display());
            Ok(())
        }
    }
}
