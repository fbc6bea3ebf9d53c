use clap::{Parser, Subcommand};

mod commands;
mod output;
mod tty;

use commands::{presets_cmd, rename, replace, run};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "migrator")]
#[command(version = VERSION)]
#[command(about = "Rename identifiers, package paths and files across a source tree")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replace literal strings inside matching files
    Replace(replace::ReplaceArgs),
    /// Rename matching files through version control
    Rename(rename::RenameArgs),
    /// Replace contents, then rename files
    Run(run::RunArgs),
    /// List built-in migration tables, or show one
    Presets(presets_cmd::PresetsArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let (json_result, exit_code) = commands::run_json(cli.command);
    // Nothing left to report to if stdout itself fails.
    let _ = output::print_json_result(json_result);

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn missing_directory_is_a_usage_error() {
        let err = Cli::try_parse_from(["migrator", "replace"]).err().unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn preset_and_table_conflict() {
        let result = Cli::try_parse_from([
            "migrator",
            "replace",
            "src",
            "--preset",
            "ejml-v0.31",
            "--table",
            "t.toml",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn repeated_pairs_keep_order() {
        let cli = Cli::try_parse_from([
            "migrator", "rename", "src", "--from", "_D64", "--to", "_DDRM", "--from", "_R64",
            "--to", "_DDRM", "--vcs", "plain",
        ])
        .unwrap();
        match cli.command {
            Commands::Rename(args) => {
                assert_eq!(args.table.from, vec!["_D64", "_R64"]);
                assert_eq!(args.vcs, "plain");
            }
            _ => panic!("expected rename"),
        }
    }

    #[test]
    fn exit_codes_clamp() {
        assert_eq!(exit_code_to_u8(-1), 0);
        assert_eq!(exit_code_to_u8(20), 20);
        assert_eq!(exit_code_to_u8(1000), 255);
    }
}
