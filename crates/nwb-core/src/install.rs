//! Dependency installation
//!
//! Installing is delegated to a package manager. Failures come back through
//! the returned `Result` like every other step of project creation.

use crate::runtime;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;
use std::process::Command;

/// What to install and where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRequest {
    pub cwd: PathBuf,
    pub packages: Vec<String>,
    /// Record the packages in package.json
    pub save: bool,
    /// Record them as dev dependencies (only meaningful with `save`)
    pub dev: bool,
}

impl InstallRequest {
    /// `react` and `react-dom` at the same version
    pub fn react(cwd: impl Into<PathBuf>, version: &str, dev: bool) -> Self {
        Self {
            cwd: cwd.into(),
            packages: vec![
                format!("react@{}", version),
                format!("react-dom@{}", version),
            ],
            save: true,
            dev,
        }
    }

    /// Arguments passed to `npm`
    pub fn npm_args(&self) -> Vec<String> {
        let mut args = vec!["install".to_string()];
        match (self.save, self.dev) {
            (true, true) => args.push("--save-dev".to_string()),
            (true, false) => args.push("--save".to_string()),
            _ => {}
        }
        args.extend(self.packages.iter().cloned());
        args
    }
}

/// Something that can install packages into a project
pub trait PackageInstaller {
    fn install(&self, request: &InstallRequest) -> Result<()>;
}

/// Installs with npm, streaming its output to the terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct NpmInstaller;

impl PackageInstaller for NpmInstaller {
    fn install(&self, request: &InstallRequest) -> Result<()> {
        let npm = runtime::require(runtime::check_npm(), "https://nodejs.org")?;

        let args = request.npm_args();
        println!(
            "{} npm {} {}",
            "Running:".dimmed(),
            args.join(" ").yellow(),
            format!("({})", npm.label()).dimmed()
        );

        let status = Command::new(runtime::npm_program())
            .args(&args)
            .current_dir(&request.cwd)
            .status()
            .context("Failed to run npm")?;

        if !status.success() {
            anyhow::bail!(
                "npm install failed with exit code: {}\n\
                 Please try installing manually: npm {}",
                status.code().unwrap_or(-1),
                args.join(" ")
            );
        }

        Ok(())
    }
}
