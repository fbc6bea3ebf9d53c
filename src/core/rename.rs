//! Filename renames.
//!
//! A file is a candidate when its name contains at least one of the table's
//! rename `find` strings. Its new name is the old name with every rename pair
//! applied in order; the directory it lives in does not change. Moves go
//! through a [`MoveStrategy`] and are never rolled back.

use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::output::BulkResult;
use crate::replace::replace_text;
use crate::table::{MigrationTable, Replacement};
use crate::vcs::MoveStrategy;
use crate::walk;

/// A planned file rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRename {
    /// Original path relative to root.
    pub from: String,
    /// New path relative to root.
    pub to: String,
}

/// A rename that was planned but skipped.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameWarning {
    /// Warning category.
    pub kind: String,
    /// File path relative to root.
    pub file: String,
    /// Human-readable description.
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenamePlan {
    pub pattern: String,
    pub files_scanned: usize,
    pub renames: Vec<FileRename>,
    pub warnings: Vec<RenameWarning>,
}

/// Per-file result of a move.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveOutcome {
    pub to: String,
}

/// The new file name, or `None` when no rename pair occurs in `name`.
pub fn new_file_name(name: &str, pairs: &[Replacement]) -> Option<String> {
    if !pairs.iter().any(|p| !p.find.is_empty() && name.contains(&p.find)) {
        return None;
    }

    let (renamed, _) = replace_text(name, pairs);
    if renamed == name {
        None
    } else {
        Some(renamed)
    }
}

pub fn plan_renames(root: &Path, table: &MigrationTable) -> Result<RenamePlan> {
    let files = walk::walk_files(root, &table.pattern)?;
    let mut renames = Vec::new();
    let mut warnings = Vec::new();
    let mut claimed: HashSet<PathBuf> = HashSet::new();

    for path in &files {
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().to_string()) else {
            continue;
        };
        let Some(new_name) = new_file_name(&name, &table.renames) else {
            continue;
        };

        let from = walk::relative(root, path);

        if new_name.is_empty() || new_name.contains('/') || new_name.contains('\\') {
            warnings.push(RenameWarning {
                kind: "invalid_name".to_string(),
                file: from,
                message: format!("Renaming '{}' would produce invalid name '{}'", name, new_name),
            });
            continue;
        }

        let target = path.with_file_name(&new_name);
        let to = walk::relative(root, &target);

        if target.exists() {
            warnings.push(RenameWarning {
                kind: "file_collision".to_string(),
                file: to.clone(),
                message: format!(
                    "Rename target '{}' already exists on disk (from '{}')",
                    to, from
                ),
            });
            continue;
        }

        if !claimed.insert(target) {
            warnings.push(RenameWarning {
                kind: "duplicate_target".to_string(),
                file: to.clone(),
                message: format!(
                    "'{}' maps to '{}', which another file is already renamed to",
                    from, to
                ),
            });
            continue;
        }

        renames.push(FileRename { from, to });
    }

    Ok(RenamePlan {
        pattern: table.pattern.clone(),
        files_scanned: files.len(),
        renames,
        warnings,
    })
}

/// Move every planned file. A failed move is recorded and the rest continue.
pub fn apply_renames(
    plan: &RenamePlan,
    root: &Path,
    strategy: MoveStrategy,
) -> Result<BulkResult<MoveOutcome>> {
    let mut outcome = BulkResult::new(format!("{} mv", strategy.as_str()));

    if plan.renames.is_empty() {
        return Ok(outcome);
    }

    strategy.ensure_ready(root)?;

    for rename in &plan.renames {
        match strategy.move_file(root, &rename.from, &rename.to) {
            Ok(()) => outcome.record_success(
                rename.from.clone(),
                MoveOutcome {
                    to: rename.to.clone(),
                },
            ),
            Err(err) => {
                log_status!("rename", "Failed to move {}: {}", rename.from, err);
                outcome.record_failure(rename.from.clone(), err.message);
            }
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(renames: &[(&str, &str)]) -> MigrationTable {
        MigrationTable::inline()
            .extend_renames(renames.iter().map(|(f, r)| Replacement::new(*f, *r)).collect())
    }

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, "class X {}\n").unwrap();
    }

    #[test]
    fn new_file_name_applies_pairs_in_order() {
        let pairs = vec![
            Replacement::new("CDenseMatrix64F", "ZMatrixRMaj"),
            Replacement::new("DenseMatrix64F", "DMatrixRMaj"),
        ];
        assert_eq!(
            new_file_name("TestCDenseMatrix64F.java", &pairs).as_deref(),
            Some("TestZMatrixRMaj.java")
        );
        assert_eq!(
            new_file_name("DenseMatrix64F.java", &pairs).as_deref(),
            Some("DMatrixRMaj.java")
        );
        assert_eq!(new_file_name("Other.java", &pairs), None);
    }

    #[test]
    fn plan_only_touches_file_names() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("alg_D64/QrHelperFunctions_D64.java"));

        let plan = plan_renames(root, &table(&[("_D64", "_DDRM")])).unwrap();

        assert_eq!(
            plan.renames,
            vec![FileRename {
                from: "alg_D64/QrHelperFunctions_D64.java".to_string(),
                to: "alg_D64/QrHelperFunctions_DDRM.java".to_string(),
            }]
        );
    }

    #[test]
    fn plan_respects_pattern() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("Ops_D64.java"));
        touch(&root.join("Ops_D64.txt"));

        let plan = plan_renames(root, &table(&[("_D64", "_DDRM")])).unwrap();
        assert_eq!(plan.files_scanned, 1);
        assert_eq!(plan.renames.len(), 1);
    }

    #[test]
    fn existing_target_is_skipped_with_warning() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("Ops_D64.java"));
        touch(&root.join("Ops_DDRM.java"));

        let plan = plan_renames(root, &table(&[("_D64", "_DDRM")])).unwrap();
        assert!(plan.renames.is_empty());
        assert_eq!(plan.warnings.len(), 1);
        assert_eq!(plan.warnings[0].kind, "file_collision");
    }

    #[test]
    fn two_sources_same_target_keeps_first() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("Ops_D64.java"));
        touch(&root.join("Ops_R64.java"));

        let plan =
            plan_renames(root, &table(&[("_D64", "_DDRM"), ("_R64", "_DDRM")])).unwrap();
        assert_eq!(plan.renames.len(), 1);
        assert_eq!(plan.renames[0].from, "Ops_D64.java");
        assert_eq!(plan.warnings[0].kind, "duplicate_target");
    }

    #[test]
    fn separator_in_new_name_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("Ops_D64.java"));

        let plan = plan_renames(root, &table(&[("_D64", "/DDRM")])).unwrap();
        assert!(plan.renames.is_empty());
        assert_eq!(plan.warnings[0].kind, "invalid_name");
    }

    #[test]
    fn apply_plain_moves_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("sub/Ops_D64.java"));

        let plan = plan_renames(root, &table(&[("_D64", "_DDRM")])).unwrap();
        let outcome = apply_renames(&plan, root, MoveStrategy::Plain).unwrap();

        assert_eq!(outcome.summary.succeeded, 1);
        assert!(!outcome.has_failures());
        assert!(root.join("sub/Ops_DDRM.java").exists());
        assert!(!root.join("sub/Ops_D64.java").exists());
    }

    #[test]
    fn apply_records_failure_and_continues() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("B_D64.java"));

        let plan = RenamePlan {
            pattern: "*.java".to_string(),
            files_scanned: 2,
            renames: vec![
                FileRename {
                    from: "A_D64.java".to_string(),
                    to: "A_DDRM.java".to_string(),
                },
                FileRename {
                    from: "B_D64.java".to_string(),
                    to: "B_DDRM.java".to_string(),
                },
            ],
            warnings: Vec::new(),
        };

        let outcome = apply_renames(&plan, root, MoveStrategy::Plain).unwrap();
        assert_eq!(outcome.summary.failed, 1);
        assert_eq!(outcome.summary.succeeded, 1);
        assert!(root.join("B_DDRM.java").exists());
    }

    #[test]
    fn empty_plan_skips_vcs_check() {
        let dir = tempfile::tempdir().unwrap();
        let plan = RenamePlan {
            pattern: "*.java".to_string(),
            files_scanned: 0,
            renames: Vec::new(),
            warnings: Vec::new(),
        };

        // Not a git repo, but nothing to move.
        let outcome = apply_renames(&plan, dir.path(), MoveStrategy::Git).unwrap();
        assert_eq!(outcome.summary.total, 0);
    }
}
