// src/lib.rs

//! Galley
//!
//! Recipe-driven builder for third-party dependencies: fetch a pinned
//! upstream tag, run the upstream configure/build toolchain with fixed
//! flags, and stage the resulting headers and static archives into a
//! layout consumable by downstream builds.
//!
//! # Architecture
//!
//! - Recipes are declarative TOML: identity, pinned tag, build flags,
//!   artifact staging rules
//! - The engine runs a fixed phase sequence: fetch, configure, compile,
//!   stage
//! - Failures are flat and fatal: any non-zero subprocess exit stops
//!   the build

mod error;
pub mod recipe;

pub use error::{Error, Result};
pub use recipe::{BuildReport, Galley, GalleyConfig, Recipe};
