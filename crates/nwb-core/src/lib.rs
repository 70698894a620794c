//! nwb core - building and scaffolding front-end JavaScript projects
//!
//! The heavy lifting (bundling, transpiling, installing packages) is done by
//! external tools. This library decides what to ask them for:
//!
//! - **Build**: turns `build-react` arguments into a bundler config, built in
//!   two phases so the driver settles the environment before the config is
//!   finalized
//! - **Create**: copies a project template for one of four project types,
//!   substituting variables, and installs framework dependencies
//!
//! External collaborators sit behind traits ([`build::Bundler`],
//! [`install::PackageInstaller`], [`prompts::Prompter`]) so the flows can be
//! driven without a terminal, npm or a bundler.
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompter

pub mod build;
pub mod create;
pub mod errors;
pub mod install;
pub mod prompts;
pub mod runtime;
pub mod settings;
pub mod templates;

// Re-export main types for convenience
pub use build::{
    build_react, clean_app, BuildArgs, BuildConfig, Bundler, CleanArgs, CommandBundler,
};
pub use create::{CreateArgs, ProjectCreator, ProjectType, WebModulePrefs};
pub use errors::{as_user_error, UserError};
pub use install::{InstallRequest, NpmInstaller, PackageInstaller};
pub use prompts::Prompter;
pub use settings::Settings;
pub use templates::{TemplateSource, TemplateVars};

#[cfg(feature = "tui")]
pub use prompts::ClackPrompter;

/// Tool version, used for the `nwbVersion` template variable
pub const NWB_VERSION: &str = env!("CARGO_PKG_VERSION");
