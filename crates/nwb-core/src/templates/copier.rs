//! Template copying with variable substitution

use super::source::TemplateFile;
use super::vars::TemplateVars;
use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Copy template files into `target_dir`, rendering placeholders in file
/// contents and path components.
///
/// Returns the written files as paths under `target_dir`. If any file
/// fails, everything the copy did is undone before the error is returned:
/// new files and directories are removed and overwritten files get their
/// previous contents back.
pub async fn copy_template(
    files: &[TemplateFile],
    target_dir: &Path,
    vars: &TemplateVars,
) -> Result<Vec<PathBuf>> {
    let mut journal = Journal::default();
    match copy_files(files, target_dir, vars, &mut journal).await {
        Ok(()) => Ok(journal.written),
        Err(e) => {
            journal.rollback().await;
            Err(e)
        }
    }
}

async fn copy_files(
    files: &[TemplateFile],
    target_dir: &Path,
    vars: &TemplateVars,
    journal: &mut Journal,
) -> Result<()> {
    journal
        .create_dirs(target_dir)
        .await
        .context("Failed to create target directory")?;

    for file in files {
        let target_path = target_dir.join(output_path(&file.path, vars));

        if let Some(parent) = target_path.parent() {
            journal
                .create_dirs(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let content = match std::str::from_utf8(&file.contents) {
            Ok(text) => vars.render(text).into_bytes(),
            // Binary files (images, fonts) are copied untouched
            Err(_) => file.contents.to_vec(),
        };

        journal.write_file(&target_path, &content).await?;
    }

    Ok(())
}

/// Render placeholders in each path component; a leading `_` in the file
/// name becomes `.` so dotfiles survive packaging (`_gitignore`).
fn output_path(relative: &Path, vars: &TemplateVars) -> PathBuf {
    let mut parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(vars.render(&part.to_string_lossy())),
            _ => None,
        })
        .collect();

    if let Some(file_name) = parts.last_mut() {
        if let Some(rest) = file_name.strip_prefix('_') {
            *file_name = format!(".{}", rest);
        }
    }

    parts.iter().collect()
}

/// Filesystem changes made by a copy, in the order they were made
#[derive(Debug, Default)]
struct Journal {
    written: Vec<PathBuf>,
    new_files: Vec<PathBuf>,
    new_dirs: Vec<PathBuf>,
    replaced: Vec<(PathBuf, Vec<u8>)>,
}

impl Journal {
    async fn create_dirs(&mut self, dir: &Path) -> Result<()> {
        let mut missing = Vec::new();
        let mut current = Some(dir);
        while let Some(path) = current {
            // Anything that can't be confirmed missing is treated as existing
            if !matches!(fs::try_exists(path).await, Ok(false)) {
                break;
            }
            missing.push(path.to_path_buf());
            current = path.parent();
        }
        self.new_dirs.extend(missing.into_iter().rev());

        fs::create_dir_all(dir).await?;
        Ok(())
    }

    async fn write_file(&mut self, path: &Path, content: &[u8]) -> Result<()> {
        match fs::read(path).await {
            Ok(previous) => self.replaced.push((path.to_path_buf(), previous)),
            Err(e) if e.kind() == ErrorKind::NotFound => self.new_files.push(path.to_path_buf()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to write file: {}", path.display()))
            }
        }

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        self.written.push(path.to_path_buf());
        Ok(())
    }

    async fn rollback(self) {
        for (path, previous) in self.replaced.iter().rev() {
            let _ = fs::write(path, previous).await;
        }
        for path in self.new_files.iter().rev() {
            let _ = fs::remove_file(path).await;
        }
        // Children were recorded after their parents
        for dir in self.new_dirs.iter().rev() {
            let _ = fs::remove_dir(dir).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use tempfile::TempDir;

    fn file(path: &str, contents: &[u8]) -> TemplateFile {
        TemplateFile {
            path: PathBuf::from(path),
            contents: Cow::Owned(contents.to_vec()),
        }
    }

    fn template() -> Vec<TemplateFile> {
        vec![
            file("_gitignore", b"/node_modules\n"),
            file("logo.png", &[0x89, b'P', b'N', b'G', 0xff, 0xfe]),
            file("package.json", br#"{"name": "{{name}}", "version": "1.0.0"}"#),
            file("src/index.js", b"// {{name}}\n"),
            file("src/{{name}}.css", b".{{name}} {}\n"),
        ]
    }

    // `{{name}}` in a path renders to a file name containing a NUL byte,
    // which fails after the earlier files have been written
    fn failing_vars() -> TemplateVars {
        TemplateVars::new().with("name", "wid\0get")
    }

    #[test]
    fn test_output_path_renames_underscore_files() {
        let vars = TemplateVars::new().with("name", "widget");
        assert_eq!(
            output_path(Path::new("_gitignore"), &vars),
            PathBuf::from(".gitignore")
        );
        assert_eq!(
            output_path(Path::new("src/_helpers/{{name}}.js"), &vars),
            PathBuf::from("src/_helpers/widget.js")
        );
    }

    #[tokio::test]
    async fn test_copies_and_substitutes() -> Result<()> {
        let target = TempDir::new()?;
        let out = target.path().join("widget");
        let vars = TemplateVars::new().with("name", "widget");

        let mut created = copy_template(&template(), &out, &vars).await?;
        created.sort();

        let expected: Vec<PathBuf> = [
            ".gitignore",
            "logo.png",
            "package.json",
            "src/index.js",
            "src/widget.css",
        ]
        .iter()
        .map(|p| out.join(p))
        .collect();
        assert_eq!(created, expected);

        assert_eq!(
            std::fs::read_to_string(out.join("package.json"))?,
            r#"{"name": "widget", "version": "1.0.0"}"#
        );
        assert_eq!(std::fs::read_to_string(out.join("src/widget.css"))?, ".widget {}\n");
        assert_eq!(
            std::fs::read(out.join("logo.png"))?,
            vec![0x89, b'P', b'N', b'G', 0xff, 0xfe]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_copy_rolls_back_new_target() -> Result<()> {
        let target = TempDir::new()?;
        let out = target.path().join("widget");

        let result = copy_template(&template(), &out, &failing_vars()).await;

        assert!(result.is_err());
        assert!(!out.exists());
        assert_eq!(std::fs::read_dir(target.path())?.count(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_copy_keeps_existing_content() -> Result<()> {
        let target = TempDir::new()?;
        std::fs::write(target.path().join("notes.txt"), "keep me")?;

        let result = copy_template(&template(), target.path(), &failing_vars()).await;

        assert!(result.is_err());
        assert_eq!(
            std::fs::read_to_string(target.path().join("notes.txt"))?,
            "keep me"
        );
        assert!(!target.path().join("package.json").exists());
        assert!(!target.path().join(".gitignore").exists());
        assert!(!target.path().join("src").exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_copy_restores_overwritten_file() -> Result<()> {
        let target = TempDir::new()?;
        std::fs::write(target.path().join("README.md"), "user's own readme")?;
        std::fs::create_dir(target.path().join("docs"))?;
        let files = vec![
            file("README.md", b"# {{name}}\n"),
            file("docs/guide.md", b"guide\n"),
            file("src/{{name}}.js", b"export default 1\n"),
        ];

        let result = copy_template(&files, target.path(), &failing_vars()).await;

        assert!(result.is_err());
        assert_eq!(
            std::fs::read_to_string(target.path().join("README.md"))?,
            "user's own readme"
        );
        // Directories that were there before survive, new ones are removed
        assert!(target.path().join("docs").is_dir());
        assert!(!target.path().join("docs/guide.md").exists());
        assert!(!target.path().join("src").exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_successful_copy_overwrites_existing_file() -> Result<()> {
        let target = TempDir::new()?;
        std::fs::write(target.path().join("README.md"), "old")?;
        let vars = TemplateVars::new().with("name", "widget");

        let written = copy_template(&[file("README.md", b"# {{name}}\n")], target.path(), &vars)
            .await?;

        assert_eq!(written, vec![target.path().join("README.md")]);
        assert_eq!(
            std::fs::read_to_string(target.path().join("README.md"))?,
            "# widget\n"
        );
        Ok(())
    }
}
