//! Command execution primitives with consistent error handling.

use std::path::Path;
use std::process::{Command, Output};

use crate::error::{Error, Result};

/// Run a command in a specific directory and hand back its raw output.
///
/// Only a failure to spawn is an error here; callers decide what a non-zero
/// exit status means.
pub fn output_in(dir: &Path, program: &str, args: &[&str], context: &str) -> Result<Output> {
    Command::new(program)
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|e| {
            Error::internal_io(
                format!("Failed to run {}: {}", context, e),
                Some(context.to_string()),
            )
        })
}

/// Check if a command succeeds in a directory without capturing output.
pub fn succeeded_in(dir: &Path, program: &str, args: &[&str]) -> bool {
    Command::new(program)
        .args(args)
        .current_dir(dir)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Whether `program` is on PATH and answers `--version`.
pub fn is_available(program: &str) -> bool {
    Command::new(program)
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Extract error text from command output.
///
/// Prefers stderr, falls back to stdout if stderr is empty.
pub fn error_text(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        stderr.trim().to_string()
    } else {
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_in_captures_stdout() {
        let output = output_in(Path::new("/tmp"), "echo", &["hello"], "echo test").unwrap();
        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "hello");
    }

    #[test]
    fn output_in_fails_to_spawn_missing_program() {
        let result = output_in(Path::new("/tmp"), "nonexistent_command_xyz", &[], "test");
        assert!(result.is_err());
    }

    #[test]
    fn succeeded_in_reports_exit_status() {
        assert!(succeeded_in(Path::new("/tmp"), "true", &[]));
        assert!(!succeeded_in(Path::new("/tmp"), "false", &[]));
    }

    #[test]
    fn error_text_prefers_stderr() {
        let output = Output {
            status: std::process::ExitStatus::default(),
            stdout: b"stdout content".to_vec(),
            stderr: b"stderr content".to_vec(),
        };
        assert_eq!(error_text(&output), "stderr content");
    }

    #[test]
    fn error_text_falls_back_to_stdout() {
        let output = Output {
            status: std::process::ExitStatus::default(),
            stdout: b"stdout content".to_vec(),
            stderr: b"".to_vec(),
        };
        assert_eq!(error_text(&output), "stdout content");
    }
}
