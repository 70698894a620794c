//! Removal of build output

use super::config::DEFAULT_DIST;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Arguments of the `clean-app` command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanArgs {
    /// Directory to remove, relative to the working directory
    pub dir: Option<String>,
}

impl CleanArgs {
    pub fn new(dir: impl Into<String>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    /// Target directory resolved against `cwd`
    pub fn target(&self, cwd: &Path) -> PathBuf {
        cwd.join(self.dir.as_deref().unwrap_or(DEFAULT_DIST))
    }
}

/// Remove the output directory. Blocks until the removal is complete.
pub fn clean_app(args: &CleanArgs, cwd: &Path) -> Result<()> {
    let target = args.target(cwd);
    match std::fs::remove_dir_all(&target) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => {
            Err(e).with_context(|| format!("Failed to remove directory: {}", target.display()))
        }
    }
}
