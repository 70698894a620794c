//! Template copying, variable substitution and created-file reporting
//!
//! This module provides:
//! - Template variables and placeholder rendering (`vars`)
//! - Embedded and local template sources (`source`)
//! - Template copying with rollback (`copier`)

pub mod copier;
pub mod source;
pub mod vars;

use colored::Colorize;
use std::path::{Path, PathBuf};

pub use copier::copy_template;
pub use source::{TemplateFile, TemplateSource};
pub use vars::TemplateVars;

/// Created files relative to `target_dir`, in lexicographic order
pub fn created_file_list(target_dir: &Path, created: &[PathBuf]) -> Vec<String> {
    let mut relative: Vec<String> = created
        .iter()
        .map(|path| {
            path.strip_prefix(target_dir)
                .unwrap_or(path)
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    relative.sort();
    relative
}

/// Print one `create` line per created file
pub fn log_created_files(target_dir: &Path, created: &[PathBuf]) {
    for path in created_file_list(target_dir, created) {
        println!("  {} {}", "create".green(), path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_files_sorted_and_relative() {
        let target = Path::new("/projects/widget");
        let created: Vec<PathBuf> = [
            "src/index.js",
            "README.md",
            "src-utils/a.js",
            ".gitignore",
            "package.json",
            "demo/src/index.js",
        ]
        .iter()
        .map(|p| target.join(p))
        .collect();

        // Plain string order: `src-utils` sorts before `src/`
        assert_eq!(
            created_file_list(target, &created),
            vec![
                ".gitignore",
                "README.md",
                "demo/src/index.js",
                "package.json",
                "src-utils/a.js",
                "src/index.js",
            ]
        );
    }

    #[test]
    fn test_created_files_empty() {
        assert!(created_file_list(Path::new("/projects/widget"), &[]).is_empty());
    }
}
