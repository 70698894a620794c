//! Project creation from templates
//!
//! This module provides:
//! - The project type enum and its validation (`project_type`)
//! - UMD / ES6 build preferences for npm modules (`prefs`)
//! - [`ProjectCreator`], which copies a template, reports created files and
//!   installs framework dependencies
//! - The `new` and `init` commands built on top of it

pub mod prefs;
pub mod project_type;

use crate::errors::UserError;
use crate::install::{InstallRequest, PackageInstaller};
use crate::prompts::Prompter;
use crate::templates::{self, TemplateSource, TemplateVars};
use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};

pub use prefs::{get_web_module_prefs, CreateArgs, WebModulePrefs};
pub use project_type::{validate_project_type, ProjectType};

/// React version installed when `--react` is not given
pub const REACT_VERSION: &str = "0.14.x";

/// Version range of this tool written into generated package.json files,
/// e.g. `0.7.x`
pub fn nwb_version() -> String {
    match semver::Version::parse(crate::NWB_VERSION) {
        Ok(version) => format!("{}.{}.x", version.major, version.minor),
        Err(_) => crate::NWB_VERSION.to_string(),
    }
}

/// Add the variables shared by npm module templates
pub fn npm_module_vars(mut vars: TemplateVars, prefs: &WebModulePrefs) -> TemplateVars {
    vars.insert_bool("umd", prefs.umd);
    vars.insert("globalVariable", prefs.global_variable.clone());
    vars.insert_bool("jsNext", prefs.js_next);
    vars.insert(
        "jsNextMain",
        if prefs.js_next {
            "\n  \"jsnext:main\": \"es6/index.js\","
        } else {
            ""
        },
    );
    vars
}

/// Creates projects from a template source, prompting and installing
/// through the given collaborators
pub struct ProjectCreator<P, I> {
    templates: TemplateSource,
    prompter: P,
    installer: I,
}

impl<P: Prompter, I: PackageInstaller> ProjectCreator<P, I> {
    pub fn new(templates: TemplateSource, prompter: P, installer: I) -> Self {
        Self {
            templates,
            prompter,
            installer,
        }
    }

    /// Create a project of the given type in `target_dir`
    pub async fn create(
        &mut self,
        project_type: ProjectType,
        args: &CreateArgs,
        name: &str,
        target_dir: &Path,
    ) -> Result<()> {
        let base = TemplateVars::new()
            .with("name", name)
            .with("nwbVersion", nwb_version());
        let react_version = args.react.as_deref().unwrap_or(REACT_VERSION);

        match project_type {
            ProjectType::ReactApp => {
                let vars = base.with("reactVersion", react_version);
                self.copy(project_type, target_dir, &vars).await?;
                self.install_react(target_dir, react_version, false)
            }
            ProjectType::ReactComponent => {
                let prefs = get_web_module_prefs(args, &mut self.prompter)?;
                let vars = npm_module_vars(base.with("reactVersion", react_version), &prefs);
                self.copy(project_type, target_dir, &vars).await?;
                self.install_react(target_dir, react_version, true)
            }
            ProjectType::WebApp => {
                self.copy(project_type, target_dir, &base).await?;
                Ok(())
            }
            ProjectType::WebModule => {
                let prefs = get_web_module_prefs(args, &mut self.prompter)?;
                let vars = npm_module_vars(base, &prefs);
                self.copy(project_type, target_dir, &vars).await?;
                Ok(())
            }
        }
    }

    async fn copy(
        &self,
        project_type: ProjectType,
        target_dir: &Path,
        vars: &TemplateVars,
    ) -> Result<()> {
        let files = self.templates.files(project_type.as_str()).await?;
        let created = templates::copy_template(&files, target_dir, vars).await?;
        templates::log_created_files(target_dir, &created);
        Ok(())
    }

    fn install_react(&self, target_dir: &Path, version: &str, dev: bool) -> Result<()> {
        println!("{}", "nwb: installing dependencies".cyan());
        self.installer
            .install(&InstallRequest::react(target_dir, version, dev))
    }

    /// `nwb new <type> <name>`: create the project in a new `<cwd>/<name>`
    pub async fn new_project(
        &mut self,
        project_type: Option<&str>,
        name: Option<&str>,
        args: &CreateArgs,
        cwd: &Path,
    ) -> Result<PathBuf> {
        let project_type = validate_project_type(project_type)?;
        let name = match name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(UserError::MissingProjectName.into()),
        };

        let target_dir = cwd.join(name);
        if target_dir.exists() {
            return Err(UserError::DirectoryExists {
                name: name.to_string(),
            }
            .into());
        }

        println!(
            "{}",
            format!("nwb: new {} {}", project_type, name).cyan()
        );
        self.create(project_type, args, name, &target_dir).await?;
        Ok(target_dir)
    }

    /// `nwb init <type> [name]`: create the project in `cwd`, named after it
    /// unless a name is given
    pub async fn init_project(
        &mut self,
        project_type: Option<&str>,
        name: Option<&str>,
        args: &CreateArgs,
        cwd: &Path,
    ) -> Result<PathBuf> {
        let project_type = validate_project_type(project_type)?;
        let name = match name {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => cwd
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or(UserError::MissingProjectName)?,
        };

        println!(
            "{}",
            format!("nwb: init {} {}", project_type, name).cyan()
        );
        self.create(project_type, args, &name, cwd).await?;
        Ok(cwd.to_path_buf())
    }
}
