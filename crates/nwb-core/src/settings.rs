//! Tool settings resolved from flags, environment and built-in defaults

use crate::templates::TemplateSource;
use std::path::PathBuf;

/// Environment variable pointing at a local template root directory
pub const TEMPLATE_DIR_ENV: &str = "NWB_TEMPLATE_DIR";

/// Environment variable overriding the bundler command
pub const BUNDLER_ENV: &str = "NWB_BUNDLER";

/// Bundler command used when nothing else is configured. It receives the
/// path to the JSON build config as its last argument.
pub const DEFAULT_BUNDLER: &str = "nwb-webpack";

/// Settings shared by the commands of a single invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Where project templates come from: the embedded set unless a local
    /// template root was configured
    pub template_source: TemplateSource,

    /// Program and leading arguments of the external bundler
    pub bundler_command: Vec<String>,
}

impl Settings {
    /// Resolve settings: explicit values win, then environment, then defaults
    pub fn resolve(template_dir: Option<PathBuf>, bundler: Option<String>) -> Self {
        Self::resolve_with(template_dir, bundler, |key| std::env::var(key).ok())
    }

    fn resolve_with(
        template_dir: Option<PathBuf>,
        bundler: Option<String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let template_source = template_dir
            .or_else(|| env(TEMPLATE_DIR_ENV).map(PathBuf::from))
            .map(TemplateSource::local)
            .unwrap_or_default();

        let bundler = bundler
            .or_else(|| env(BUNDLER_ENV))
            .filter(|cmd| !cmd.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BUNDLER.to_string());

        Self {
            template_source,
            bundler_command: bundler.split_whitespace().map(String::from).collect(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::resolve(None, None)
    }
}
