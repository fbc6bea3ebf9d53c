//! Version-control aware file moves.
//!
//! Renames go through the VCS so history follows the file. `Plain` exists for
//! trees that are not under version control at all.

use serde::Serialize;
use std::path::Path;

use crate::error::{Error, Result, VcsCommandFailedDetails};
use crate::utils::command;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveStrategy {
    Git,
    Svn,
    Plain,
}

impl MoveStrategy {
    pub fn from_str(s: &str) -> Result<Self> {
        match s {
            "git" => Ok(MoveStrategy::Git),
            "svn" => Ok(MoveStrategy::Svn),
            "plain" | "none" => Ok(MoveStrategy::Plain),
            _ => Err(Error::validation_invalid_argument(
                "vcs",
                format!("Unknown vcs '{}'. Use: git, svn, plain", s),
                None,
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MoveStrategy::Git => "git",
            MoveStrategy::Svn => "svn",
            MoveStrategy::Plain => "plain",
        }
    }

    /// Fail early when `root` is not inside a working copy for this VCS.
    pub fn ensure_ready(&self, root: &Path) -> Result<()> {
        let ok = match self {
            MoveStrategy::Git => {
                command::succeeded_in(root, "git", &["rev-parse", "--is-inside-work-tree"])
            }
            MoveStrategy::Svn => command::succeeded_in(root, "svn", &["info"]),
            MoveStrategy::Plain => true,
        };

        if ok {
            Ok(())
        } else {
            Err(Error::vcs_not_a_working_copy(
                self.as_str(),
                root.to_string_lossy(),
            ))
        }
    }

    /// Move `from` to `to`, both relative to `root`.
    pub fn move_file(&self, root: &Path, from: &str, to: &str) -> Result<()> {
        match self {
            MoveStrategy::Git => vcs_move(root, "git", from, to),
            MoveStrategy::Svn => vcs_move(root, "svn", from, to),
            MoveStrategy::Plain => {
                std::fs::rename(root.join(from), root.join(to)).map_err(|e| {
                    Error::internal_io(e.to_string(), Some(format!("rename {} -> {}", from, to)))
                })
            }
        }
    }
}

fn vcs_move(root: &Path, program: &str, from: &str, to: &str) -> Result<()> {
    let display = format!("{} mv {} {}", program, from, to);
    let output = command::output_in(root, program, &["mv", from, to], &display)?;

    if !output.status.success() {
        return Err(Error::vcs_command_failed(VcsCommandFailedDetails {
            command: display,
            exit_code: output.status.code(),
            stderr: command::error_text(&output),
        }));
    }

    log_status!("rename", "{}", display);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::process::Command;

    fn git(dir: &Path, args: &[&str]) {
        let status = Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .unwrap()
            .status;
        assert!(status.success(), "git {:?} failed", args);
    }

    #[test]
    fn parses_strategies() {
        assert_eq!(MoveStrategy::from_str("git").unwrap(), MoveStrategy::Git);
        assert_eq!(MoveStrategy::from_str("svn").unwrap(), MoveStrategy::Svn);
        assert_eq!(MoveStrategy::from_str("none").unwrap(), MoveStrategy::Plain);
        assert!(MoveStrategy::from_str("hg").is_err());
    }

    #[test]
    fn plain_move_renames_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("A_D64.java"), "x").unwrap();

        MoveStrategy::Plain
            .move_file(dir.path(), "A_D64.java", "A_DDRM.java")
            .unwrap();

        assert!(!dir.path().join("A_D64.java").exists());
        assert!(dir.path().join("A_DDRM.java").exists());
    }

    #[test]
    fn git_requires_working_copy() {
        if !command::is_available("git") {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let err = MoveStrategy::Git.ensure_ready(dir.path()).unwrap_err();
        assert_eq!(err.code, ErrorCode::VcsNotAWorkingCopy);
        assert!(!err.hints.is_empty());
    }

    #[test]
    fn git_move_stages_rename() {
        if !command::is_available("git") {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        git(root, &["init", "-q"]);
        std::fs::write(root.join("Ops_D64.java"), "class Ops_D64 {}\n").unwrap();
        git(root, &["add", "Ops_D64.java"]);

        MoveStrategy::Git.ensure_ready(root).unwrap();
        MoveStrategy::Git
            .move_file(root, "Ops_D64.java", "Ops_DDRM.java")
            .unwrap();

        assert!(root.join("Ops_DDRM.java").exists());
        assert!(!root.join("Ops_D64.java").exists());
    }

    #[test]
    fn git_move_of_untracked_file_fails() {
        if !command::is_available("git") {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        git(root, &["init", "-q"]);
        std::fs::write(root.join("Loose_D64.java"), "x").unwrap();

        let err = MoveStrategy::Git
            .move_file(root, "Loose_D64.java", "Loose_DDRM.java")
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::VcsCommandFailed);
        assert!(root.join("Loose_D64.java").exists());
    }
}
