//! Path argument handling.

use std::path::PathBuf;

use crate::error::{Error, Result};

/// Expand `~` and `$VAR` in a user-supplied path.
pub fn expand(raw: &str) -> Result<PathBuf> {
    shellexpand::full(raw)
        .map(|expanded| PathBuf::from(expanded.as_ref()))
        .map_err(|e| {
            Error::validation_invalid_argument(
                "path",
                format!("Cannot expand '{}': {}", raw, e),
                Some(raw.to_string()),
            )
        })
}

/// Expand and check the directory the migration runs over.
pub fn resolve_root(raw: &str) -> Result<PathBuf> {
    let root = expand(raw)?;

    if !root.exists() {
        return Err(Error::validation_invalid_argument(
            "dir",
            format!("Directory '{}' does not exist", root.display()),
            Some(raw.to_string()),
        ));
    }
    if !root.is_dir() {
        return Err(Error::validation_invalid_argument(
            "dir",
            format!("'{}' is not a directory", root.display()),
            Some(raw.to_string()),
        ));
    }

    Ok(root)
}
