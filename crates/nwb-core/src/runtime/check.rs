//! Detection of the external tools nwb delegates to

use anyhow::Result;
use std::process::Command;

/// Runtime detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

impl RuntimeInfo {
    /// Name plus the detected version, e.g. `npm 10.2.0`
    pub fn label(&self) -> String {
        match &self.version {
            Some(version) => format!("{} {}", self.name, version),
            None => self.name.to_string(),
        }
    }
}

/// Run `<program> --version` and report what was found
pub fn check_program(program: &str, name: &'static str) -> RuntimeInfo {
    let output = Command::new(program).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            RuntimeInfo {
                name,
                version: Some(version),
                available: true,
            }
        }
        _ => RuntimeInfo {
            name,
            version: None,
            available: false,
        },
    }
}

/// Check if npm is available
pub fn check_npm() -> RuntimeInfo {
    check_program(npm_program(), "npm")
}

/// npm ships as a batch script on Windows
pub fn npm_program() -> &'static str {
    if cfg!(windows) {
        "npm.cmd"
    } else {
        "npm"
    }
}

/// Fail with an install hint when a runtime is missing
pub fn require(info: RuntimeInfo, install_hint: &str) -> Result<RuntimeInfo> {
    if !info.available {
        anyhow::bail!(
            "{} is required but was not found (install from {})",
            info.name,
            install_hint
        );
    }
    Ok(info)
}
