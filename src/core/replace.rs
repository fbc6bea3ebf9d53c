//! Content replacement engine.
//!
//! For every file the walk yields, the whole text is loaded, each pair of the
//! table is applied in order as a literal, case-sensitive, all-occurrence
//! substitution, and the file is rewritten only when the final text differs
//! from what was read. Writes are plain overwrites with no backup.

use serde::Serialize;
use std::path::Path;

use crate::error::{Error, Result};
use crate::table::{MigrationTable, Replacement};
use crate::walk;

/// How many times one pair fired in one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairCount {
    pub find: String,
    pub replace: String,
    pub count: usize,
}

/// A file whose content changed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEdit {
    /// File path relative to root.
    pub file: String,
    /// Total substitutions across all pairs.
    pub replacements: usize,
    /// Only the pairs that matched, in application order.
    pub pairs: Vec<PairCount>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceResult {
    pub pattern: String,
    pub files_scanned: usize,
    pub edits: Vec<FileEdit>,
    pub total_replacements: usize,
    /// Whether changes were written to disk.
    pub applied: bool,
}

/// Apply `pairs` to `text` in order. Each pair sees the previous pair's output.
pub fn replace_text(text: &str, pairs: &[Replacement]) -> (String, Vec<PairCount>) {
    let mut current = text.to_string();
    let mut counts = Vec::new();

    for pair in pairs {
        if pair.find.is_empty() {
            continue;
        }
        let count = current.matches(pair.find.as_str()).count();
        if count == 0 {
            continue;
        }
        current = current.replace(&pair.find, &pair.replace);
        counts.push(PairCount {
            find: pair.find.clone(),
            replace: pair.replace.clone(),
            count,
        });
    }

    (current, counts)
}

/// Rewrite one file. Returns `None` when the text would not change.
pub fn replace_file(
    root: &Path,
    path: &Path,
    pairs: &[Replacement],
    write: bool,
) -> Result<Option<FileEdit>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("read {}", path.display())))
    })?;

    let (new_content, counts) = replace_text(&content, pairs);
    if new_content == content {
        return Ok(None);
    }

    let file = walk::relative(root, path);
    let replacements = counts.iter().map(|c| c.count).sum();

    if write {
        std::fs::write(path, &new_content).map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("write {}", path.display())))
        })?;
        log_status!("replace", "{} ({} replacements)", file, replacements);
    }

    Ok(Some(FileEdit {
        file,
        replacements,
        pairs: counts,
    }))
}

/// Run the table's content pairs over every matching file under `root`.
///
/// Stops at the first I/O error. Files rewritten before that stay rewritten.
pub fn replace_tree(root: &Path, table: &MigrationTable, write: bool) -> Result<ReplaceResult> {
    let files = walk::walk_files(root, &table.pattern)?;
    let mut edits = Vec::new();

    for path in &files {
        if let Some(edit) = replace_file(root, path, &table.replacements, write)? {
            edits.push(edit);
        }
    }

    let total_replacements = edits.iter().map(|e| e.replacements).sum();

    Ok(ReplaceResult {
        pattern: table.pattern.clone(),
        files_scanned: files.len(),
        edits,
        total_replacements,
        applied: write,
    })
}
