use clap::Args;

use migrator::presets;
use migrator::table::{MigrationTable, Replacement};
use migrator::utils::paths;

pub type CmdResult<T> = migrator::Result<(T, i32)>;

/// Where `--from/--to` pairs land in the resolved table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PairTarget {
    Contents,
    FileNames,
    Both,
}

/// Table selection shared by `replace`, `rename` and `run`.
#[derive(Args, Debug, Default)]
pub struct TableArgs {
    /// Built-in migration table (see `migrator presets`)
    #[arg(long, conflicts_with = "table")]
    pub preset: Option<String>,

    /// Migration table file (.toml or .json)
    #[arg(long, value_name = "FILE")]
    pub table: Option<String>,

    /// Literal string to find (repeatable, pairs with --to)
    #[arg(long = "from", value_name = "FIND")]
    pub from: Vec<String>,

    /// Replacement for the matching --from
    #[arg(long = "to", value_name = "REPLACE")]
    pub to: Vec<String>,

    /// File name glob, overriding the table's (e.g. "*.java")
    #[arg(long)]
    pub pattern: Option<String>,
}

impl TableArgs {
    /// Build the table a command runs with.
    ///
    /// Falls back to the default preset only when nothing at all was given.
    pub(crate) fn resolve(&self, target: PairTarget) -> migrator::Result<MigrationTable> {
        let inline = Replacement::zip(&self.from, &self.to)?;

        let base = if let Some(path) = &self.table {
            MigrationTable::load(&paths::expand(path)?)?
        } else if let Some(name) = &self.preset {
            presets::load(name)?
        } else if !inline.is_empty() {
            MigrationTable::inline()
        } else {
            presets::load(presets::DEFAULT_PRESET)?
        };

        let table = match target {
            PairTarget::Contents => base.extend_replacements(inline),
            PairTarget::FileNames => base.extend_renames(inline),
            PairTarget::Both => base
                .extend_replacements(inline.clone())
                .extend_renames(inline),
        }
        .with_pattern(self.pattern.clone());

        table.validate()?;
        Ok(table)
    }
}

pub mod presets_cmd;
pub mod rename;
pub mod replace;
pub mod run;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args))
    };
}

pub(crate) fn run_json(command: crate::Commands) -> (migrator::Result<serde_json::Value>, i32) {
    crate::tty::status("migrator is working...");

    match command {
        crate::Commands::Replace(args) => dispatch!(args, replace),
        crate::Commands::Rename(args) => dispatch!(args, rename),
        crate::Commands::Run(args) => dispatch!(args, run),
        crate::Commands::Presets(args) => dispatch!(args, presets_cmd),
    }
}
