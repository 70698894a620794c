//! Bundler configuration, built in two phases
//!
//! [`PendingBuild::capture`] records the command arguments. The bundler
//! driver calls [`PendingBuild::finalize`] once it has decided the build
//! environment, so production-only settings never depend on when the
//! arguments were parsed.

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

/// Output directory used when none is given
pub const DEFAULT_DIST: &str = "dist";

/// Package substituted for React when `--preact` is passed
pub const PREACT_COMPAT: &str = "preact-compat";

/// Arguments of the `build-react` command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildArgs {
    /// Entry module (first positional argument after the command)
    pub entry: Option<String>,

    /// Output directory (second positional argument)
    pub dist: Option<String>,

    /// Id of the element the app is mounted on in the generated HTML
    pub mount_id: Option<String>,

    /// Title of the generated HTML page
    pub title: Option<String>,

    /// Split third-party modules into a vendor chunk
    pub vendor: bool,

    /// Alias React to preact-compat
    pub preact: bool,
}

impl BuildArgs {
    /// Output directory, falling back to `dist`
    pub fn dist(&self) -> &str {
        self.dist.as_deref().unwrap_or(DEFAULT_DIST)
    }
}

/// Environment the driver settled on before finalizing the config
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildEnv {
    pub production: bool,
}

impl BuildEnv {
    /// Derive the environment from a `NODE_ENV` value
    pub fn from_node_env(node_env: &str) -> Self {
        Self {
            production: node_env == "production",
        }
    }
}

/// Captured arguments waiting for the driver to finalize them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingBuild {
    args: BuildArgs,
    entry: String,
    cwd: PathBuf,
}

impl PendingBuild {
    /// Capture arguments for a build rooted at `cwd`. The entry must already
    /// have been validated by the caller.
    pub(crate) fn capture(args: BuildArgs, entry: String, cwd: &Path) -> Self {
        Self {
            args,
            entry,
            cwd: cwd.to_path_buf(),
        }
    }

    pub fn args(&self) -> &BuildArgs {
        &self.args
    }

    /// Produce the final config for the given environment
    pub fn finalize(&self, env: &BuildEnv) -> BuildConfig {
        let mut presets = vec!["react".to_string()];
        if env.production {
            presets.push("react-prod".to_string());
        }

        let resolve = self.args.preact.then(|| Resolve {
            alias: BTreeMap::from([
                ("react".to_string(), PREACT_COMPAT.to_string()),
                ("react-dom".to_string(), PREACT_COMPAT.to_string()),
            ]),
        });

        BuildConfig {
            babel: Babel {
                stage: 0,
                presets,
                runtime: true,
            },
            devtool: "source-map".to_string(),
            entry: Entry {
                app: self.resolve_path(&self.entry),
            },
            output: Output {
                filename: "[name].js".to_string(),
                path: self.resolve_path(self.args.dist()),
                public_path: "/".to_string(),
            },
            plugins: Plugins {
                html: HtmlPlugin {
                    mount_id: self.args.mount_id.clone().unwrap_or_else(|| "app".to_string()),
                    title: self
                        .args
                        .title
                        .clone()
                        .unwrap_or_else(|| "React App".to_string()),
                },
                vendor_chunk_name: self.args.vendor.then(|| "vendor".to_string()),
            },
            resolve,
        }
    }

    /// Absolute, lexically normalized path; absolute arguments ignore `cwd`
    fn resolve_path(&self, path: &str) -> PathBuf {
        normalize(&self.cwd.join(path))
    }
}

/// Drop `.` components and apply `..` without touching the filesystem
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            // `..` at the root stays at the root
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Configuration handed to the external bundler
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
    pub babel: Babel,
    pub devtool: String,
    pub entry: Entry,
    pub output: Output,
    pub plugins: Plugins,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolve: Option<Resolve>,
}

impl BuildConfig {
    /// Pretty-printed JSON, as written for the bundler
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize build config")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Babel {
    pub stage: u8,
    pub presets: Vec<String>,
    pub runtime: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub app: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Output {
    pub filename: String,
    pub path: PathBuf,
    pub public_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plugins {
    pub html: HtmlPlugin,
    /// `None` serializes as `null`: no vendor chunk
    pub vendor_chunk_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlPlugin {
    pub mount_id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolve {
    pub alias: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(args: BuildArgs) -> PendingBuild {
        let entry = args.entry.clone().unwrap_or_else(|| "src/index.js".to_string());
        PendingBuild::capture(args, entry, Path::new("/work/app"))
    }

    fn entry_args() -> BuildArgs {
        BuildArgs {
            entry: Some("src/index.js".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_output_is_cwd_dist() {
        let config = pending(entry_args()).finalize(&BuildEnv::default());
        assert_eq!(config.output.path, PathBuf::from("/work/app/dist"));
        assert_eq!(config.entry.app, PathBuf::from("/work/app/src/index.js"));
        assert_eq!(config.output.filename, "[name].js");
        assert_eq!(config.output.public_path, "/");
    }

    #[test]
    fn test_explicit_and_absolute_paths() {
        let args = BuildArgs {
            entry: Some("/abs/entry.js".to_string()),
            dist: Some("build/out".to_string()),
            ..Default::default()
        };
        let config = pending(args).finalize(&BuildEnv::default());
        assert_eq!(config.entry.app, PathBuf::from("/abs/entry.js"));
        assert_eq!(config.output.path, PathBuf::from("/work/app/build/out"));
    }

    #[test]
    fn test_relative_paths_are_normalized() {
        let args = BuildArgs {
            entry: Some("./src/../app/./index.js".to_string()),
            dist: Some("build/".to_string()),
            ..Default::default()
        };
        let config = pending(args).finalize(&BuildEnv::default());
        assert_eq!(config.entry.app, PathBuf::from("/work/app/app/index.js"));
        assert_eq!(config.output.path, PathBuf::from("/work/app/build"));

        let config = pending(BuildArgs {
            entry: Some("../../../../shared/entry.js".to_string()),
            dist: Some("/srv/www/./public/..".to_string()),
            ..Default::default()
        })
        .finalize(&BuildEnv::default());
        assert_eq!(config.entry.app, PathBuf::from("/shared/entry.js"));
        assert_eq!(config.output.path, PathBuf::from("/srv/www"));
    }

    #[test]
    fn test_environment_only_changes_presets() {
        let build = pending(entry_args());
        let dev = build.finalize(&BuildEnv { production: false });
        let prod = build.finalize(&BuildEnv { production: true });

        assert_eq!(dev.babel.presets, vec!["react"]);
        assert_eq!(prod.babel.presets, vec!["react", "react-prod"]);

        let mut prod_without_presets = prod.clone();
        prod_without_presets.babel.presets = dev.babel.presets.clone();
        assert_eq!(prod_without_presets, dev);
    }

    #[test]
    fn test_vendor_chunk_name() {
        let without = pending(entry_args()).finalize(&BuildEnv::default());
        assert_eq!(without.plugins.vendor_chunk_name, None);

        let with = pending(BuildArgs {
            vendor: true,
            ..entry_args()
        })
        .finalize(&BuildEnv::default());
        assert_eq!(with.plugins.vendor_chunk_name.as_deref(), Some("vendor"));
    }

    #[test]
    fn test_preact_aliases() {
        let without = pending(entry_args()).finalize(&BuildEnv::default());
        assert!(without.resolve.is_none());

        let with = pending(BuildArgs {
            preact: true,
            ..entry_args()
        })
        .finalize(&BuildEnv::default());
        let alias = with.resolve.expect("resolve section").alias;
        assert_eq!(alias.len(), 2);
        assert_eq!(alias["react"], PREACT_COMPAT);
        assert_eq!(alias["react-dom"], PREACT_COMPAT);
    }

    #[test]
    fn test_html_plugin_defaults_and_overrides() {
        let config = pending(entry_args()).finalize(&BuildEnv::default());
        assert_eq!(config.plugins.html.mount_id, "app");
        assert_eq!(config.plugins.html.title, "React App");

        let config = pending(BuildArgs {
            mount_id: Some("root".to_string()),
            title: Some("Dashboard".to_string()),
            ..entry_args()
        })
        .finalize(&BuildEnv::default());
        assert_eq!(config.plugins.html.mount_id, "root");
        assert_eq!(config.plugins.html.title, "Dashboard");
    }

    #[test]
    fn test_node_env() {
        assert!(BuildEnv::from_node_env("production").production);
        assert!(!BuildEnv::from_node_env("development").production);
        assert!(!BuildEnv::from_node_env("").production);
    }

    #[test]
    fn test_json_shape() {
        let config = pending(entry_args()).finalize(&BuildEnv::default());
        let json: serde_json::Value = serde_json::from_str(&config.to_json().unwrap()).unwrap();

        assert_eq!(json["babel"]["stage"], 0);
        assert_eq!(json["babel"]["runtime"], true);
        assert_eq!(json["devtool"], "source-map");
        assert_eq!(json["output"]["publicPath"], "/");
        assert_eq!(json["plugins"]["html"]["mountId"], "app");
        assert!(json["plugins"]["vendorChunkName"].is_null());
        assert!(json.get("resolve").is_none());
    }
}
