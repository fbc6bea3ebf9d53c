//! Recursive file discovery, matching a shell-style glob against file names.

use glob_match::glob_match;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Version-control metadata directories, skipped at any depth.
const ALWAYS_SKIP_DIRS: &[&str] = &[".git", ".svn", ".hg"];

/// Collect every regular file under `root` whose *file name* matches `pattern`.
///
/// Symlinked directories are not followed. The result is sorted.
pub fn walk_files(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    walk_recursive(root, pattern, &mut files)?;
    files.sort();
    Ok(files)
}

/// Match a file name (not a path) against a glob such as `*.java`.
pub fn matches_pattern(pattern: &str, file_name: &str) -> bool {
    glob_match(pattern, file_name)
}

/// Path of `path` relative to `root`, for reporting.
pub fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}

fn walk_recursive(dir: &Path, pattern: &str, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("read dir {}", dir.display())))
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("read dir {}", dir.display())))
        })?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("stat {}", path.display())))
        })?;
        let name = entry.file_name().to_string_lossy().to_string();

        if file_type.is_dir() {
            if ALWAYS_SKIP_DIRS.contains(&name.as_str()) {
                continue;
            }
            walk_recursive(&path, pattern, files)?;
        } else if file_type.is_file() && matches_pattern(pattern, &name) {
            files.push(path);
        }
    }

    Ok(())
}
