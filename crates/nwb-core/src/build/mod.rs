//! Building standalone React entry modules
//!
//! This module provides:
//! - Build arguments and the two-phase bundler config (`config`)
//! - Bundler drivers (`bundler`)
//! - Output directory cleaning (`clean`)

pub mod bundler;
pub mod clean;
pub mod config;

use crate::errors::UserError;
use anyhow::Result;
use colored::Colorize;
use std::path::Path;

pub use bundler::{Bundler, CommandBundler};
pub use clean::{clean_app, CleanArgs};
pub use config::{BuildArgs, BuildConfig, BuildEnv, PendingBuild};

/// Validate arguments and capture them for a build rooted at `cwd`
pub fn prepare_react_build(args: BuildArgs, cwd: &Path) -> Result<PendingBuild> {
    let entry = args
        .entry
        .clone()
        .ok_or(UserError::MissingEntry {
            command: "build-react",
        })?;
    Ok(PendingBuild::capture(args, entry, cwd))
}

/// Build a standalone React entry module
///
/// Cleans the output directory, then hands the captured arguments to the
/// bundler, which finalizes the config for its environment.
pub fn build_react<B: Bundler>(args: BuildArgs, cwd: &Path, bundler: &B) -> Result<()> {
    let build = prepare_react_build(args, cwd)?;

    clean_app(&CleanArgs::new(build.args().dist()), cwd)?;

    println!("{}", "nwb: build-react".cyan());
    bundler.bundle(build)
}
