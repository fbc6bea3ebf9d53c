use clap::Args;
use serde::Serialize;

use migrator::log_status;
use migrator::replace::{self, ReplaceResult};
use migrator::utils::paths;

use super::{CmdResult, PairTarget, TableArgs};

#[derive(Args, Debug)]
pub struct ReplaceArgs {
    /// Directory to migrate
    pub dir: String,

    #[command(flatten)]
    pub table: TableArgs,

    /// Report what would change without writing
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceOutput {
    pub command: &'static str,
    pub root: String,
    pub table: String,
    pub dry_run: bool,
    #[serde(flatten)]
    pub result: ReplaceResult,
}

pub fn run(args: ReplaceArgs) -> CmdResult<ReplaceOutput> {
    let root = paths::resolve_root(&args.dir)?;
    let table = args.table.resolve(PairTarget::Contents)?;

    log_status!(
        "replace",
        "{} pair(s) from '{}' over {} in {}",
        table.replacements.len(),
        table.name,
        table.pattern,
        root.display()
    );

    let result = replace::replace_tree(&root, &table, !args.dry_run)?;

    Ok((
        ReplaceOutput {
            command: "replace",
            root: root.to_string_lossy().to_string(),
            table: table.name,
            dry_run: args.dry_run,
            result,
        },
        0,
    ))
}
