//! Template sources: the templates compiled into the binary, or a local
//! directory given with `--template-dir` / `NWB_TEMPLATE_DIR`

use anyhow::{Context, Result};
use include_dir::{include_dir, Dir, DirEntry};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

static EMBEDDED_TEMPLATES: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// A single template file, path relative to the template root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    pub path: PathBuf,
    pub contents: Cow<'static, [u8]>,
}

/// Where project templates are read from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TemplateSource {
    /// Templates shipped inside the binary
    #[default]
    Embedded,
    /// One sub-directory per template under this path
    Local(PathBuf),
}

impl TemplateSource {
    /// Create a local template source from a path
    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self::Local(path.into())
    }

    /// Files of the named template, sorted by path for a stable copy order
    pub async fn files(&self, name: &str) -> Result<Vec<TemplateFile>> {
        let mut files = match self {
            TemplateSource::Embedded => {
                let dir = EMBEDDED_TEMPLATES
                    .get_dir(name)
                    .with_context(|| format!("Template not found: {}", name))?;
                let mut files = Vec::new();
                collect_embedded(dir, dir.path(), &mut files);
                files
            }
            TemplateSource::Local(root) => read_local(&root.join(name)).await?,
        };
        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }
}

fn collect_embedded(dir: &'static Dir<'static>, root: &Path, files: &mut Vec<TemplateFile>) {
    for entry in dir.entries() {
        match entry {
            DirEntry::Dir(sub) => collect_embedded(sub, root, files),
            DirEntry::File(file) => files.push(TemplateFile {
                path: file
                    .path()
                    .strip_prefix(root)
                    .unwrap_or(file.path())
                    .to_path_buf(),
                contents: Cow::Borrowed(file.contents()),
            }),
        }
    }
}

async fn read_local(template_dir: &Path) -> Result<Vec<TemplateFile>> {
    if !template_dir.is_dir() {
        anyhow::bail!("Template directory not found: {}", template_dir.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(template_dir).sort_by_file_name() {
        let entry = entry
            .with_context(|| format!("Failed to read template: {}", template_dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry
            .path()
            .strip_prefix(template_dir)
            .context("Template file outside template directory")?
            .to_path_buf();
        let contents = tokio::fs::read(entry.path()).await.with_context(|| {
            format!("Failed to read template file: {}", entry.path().display())
        })?;
        files.push(TemplateFile {
            path,
            contents: Cow::Owned(contents),
        });
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn paths(files: &[TemplateFile]) -> Vec<String> {
        files
            .iter()
            .map(|f| f.path.to_string_lossy().into_owned())
            .collect()
    }

    #[tokio::test]
    async fn test_embedded_templates_ship_every_project_type() -> Result<()> {
        for name in ["react-app", "react-component", "web-app", "web-module"] {
            let files = TemplateSource::Embedded.files(name).await?;
            let paths = paths(&files);
            assert!(paths.contains(&"package.json".to_string()), "{}: {:?}", name, paths);
            assert!(paths.contains(&"_gitignore".to_string()), "{}: {:?}", name, paths);
            assert!(paths.iter().all(|p| !p.starts_with(name)), "{}: {:?}", name, paths);
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_embedded_paths_include_sub_directories() -> Result<()> {
        let files = TemplateSource::Embedded.files("react-component").await?;
        let demo = Path::new("demo").join("src").join("index.js");
        assert!(files.iter().any(|f| f.path == demo));
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_embedded_template() {
        let err = TemplateSource::Embedded.files("angular-app").await.unwrap_err();
        assert!(err.to_string().contains("Template not found: angular-app"));
    }

    #[tokio::test]
    async fn test_local_template() -> Result<()> {
        let root = TempDir::new()?;
        let dir = root.path().join("web-app");
        std::fs::create_dir_all(dir.join("src"))?;
        std::fs::write(dir.join("package.json"), "{}")?;
        std::fs::write(dir.join("src/index.js"), "// app")?;

        let files = TemplateSource::local(root.path()).files("web-app").await?;

        assert_eq!(
            files,
            vec![
                TemplateFile {
                    path: PathBuf::from("package.json"),
                    contents: Cow::Owned(b"{}".to_vec()),
                },
                TemplateFile {
                    path: PathBuf::from("src/index.js"),
                    contents: Cow::Owned(b"// app".to_vec()),
                },
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_local_template() {
        let err = TemplateSource::local("/nonexistent/nwb-templates")
            .files("web-app")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Template directory not found"));
    }
}
