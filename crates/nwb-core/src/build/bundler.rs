//! Bundler drivers
//!
//! The bundling itself is done by an external program. A driver settles the
//! build environment, finalizes the pending config and hands it over.

use super::config::{BuildEnv, PendingBuild};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tempfile::NamedTempFile;

/// `NODE_ENV` used for builds when the caller did not set one
pub const DEFAULT_NODE_ENV: &str = "production";

/// Something that can run a build from a pending config
pub trait Bundler {
    fn bundle(&self, build: PendingBuild) -> Result<()>;
}

/// Runs an external bundler command with the config written to a JSON file
#[derive(Debug, Clone)]
pub struct CommandBundler {
    command: Vec<String>,
    node_env: String,
}

impl CommandBundler {
    /// Create a driver for `command` (program followed by leading args),
    /// taking `NODE_ENV` from the process environment
    pub fn new(command: Vec<String>) -> Self {
        let node_env = std::env::var("NODE_ENV")
            .ok()
            .filter(|env| !env.is_empty())
            .unwrap_or_else(|| DEFAULT_NODE_ENV.to_string());
        Self::with_node_env(command, node_env)
    }

    pub fn with_node_env(command: Vec<String>, node_env: impl Into<String>) -> Self {
        Self {
            command,
            node_env: node_env.into(),
        }
    }

    /// Environment the config will be finalized with
    pub fn env(&self) -> BuildEnv {
        BuildEnv::from_node_env(&self.node_env)
    }

    /// Write the finalized config to a new temporary file, removed on drop
    fn write_config(&self, build: &PendingBuild) -> Result<NamedTempFile> {
        let json = build.finalize(&self.env()).to_json()?;
        let mut file = tempfile::Builder::new()
            .prefix("nwb-build-")
            .suffix(".json")
            .tempfile()
            .context("Failed to create build config file")?;
        file.write_all(json.as_bytes()).with_context(|| {
            format!("Failed to write build config: {}", file.path().display())
        })?;
        Ok(file)
    }

    fn run(&self, config_path: &Path) -> Result<()> {
        let (program, leading_args) = self
            .command
            .split_first()
            .context("No bundler command configured")?;

        let status = Command::new(program)
            .args(leading_args)
            .arg(config_path)
            .env("NODE_ENV", &self.node_env)
            .status()
            .with_context(|| format!("Failed to run bundler `{}`", program))?;

        if !status.success() {
            anyhow::bail!(
                "Bundler `{}` failed with exit code: {}",
                program,
                status.code().unwrap_or(-1)
            );
        }

        Ok(())
    }
}

impl Bundler for CommandBundler {
    fn bundle(&self, build: PendingBuild) -> Result<()> {
        let config = self.write_config(&build)?;
        self.run(config.path())
    }
}
