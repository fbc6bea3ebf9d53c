use clap::Args;
use serde::Serialize;
use std::path::Path;

use migrator::log_status;
use migrator::output::BulkResult;
use migrator::rename::{self, MoveOutcome, RenamePlan};
use migrator::utils::paths;
use migrator::{MigrationTable, MoveStrategy};

use super::{CmdResult, PairTarget, TableArgs};

#[derive(Args, Debug)]
pub struct RenameArgs {
    /// Directory to migrate
    pub dir: String,

    #[command(flatten)]
    pub table: TableArgs,

    /// How files are moved: git, svn, plain
    #[arg(long, default_value = "git")]
    pub vcs: String,

    /// Report planned renames without moving anything
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameOutput {
    pub command: &'static str,
    pub root: String,
    pub table: String,
    pub vcs: MoveStrategy,
    pub dry_run: bool,
    #[serde(flatten)]
    pub plan: RenamePlan,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moves: Option<BulkResult<MoveOutcome>>,
}

pub fn run(args: RenameArgs) -> CmdResult<RenameOutput> {
    let root = paths::resolve_root(&args.dir)?;
    let strategy = MoveStrategy::from_str(&args.vcs)?;
    let table = args.table.resolve(PairTarget::FileNames)?;

    let plan = plan_tree(&root, &table, strategy)?;
    let moves = apply_plan(&plan, &root, strategy, args.dry_run)?;
    let exit_code = exit_code_for(moves.as_ref());

    Ok((
        RenameOutput {
            command: "rename",
            root: root.to_string_lossy().to_string(),
            table: table.name,
            vcs: strategy,
            dry_run: args.dry_run,
            plan,
            moves,
        },
        exit_code,
    ))
}

/// Plan the renames for `table` under `root`. Shared with `run`.
pub(crate) fn plan_tree(
    root: &Path,
    table: &MigrationTable,
    strategy: MoveStrategy,
) -> migrator::Result<RenamePlan> {
    let plan = rename::plan_renames(root, table)?;

    log_status!(
        "rename",
        "{} file(s) to rename via {} ({} skipped)",
        plan.renames.len(),
        strategy.as_str(),
        plan.warnings.len()
    );

    Ok(plan)
}

/// Apply a plan unless dry-running.
pub(crate) fn apply_plan(
    plan: &RenamePlan,
    root: &Path,
    strategy: MoveStrategy,
    dry_run: bool,
) -> migrator::Result<Option<BulkResult<MoveOutcome>>> {
    if dry_run {
        return Ok(None);
    }
    rename::apply_renames(plan, root, strategy).map(Some)
}

/// Failed moves are reported in the body; the exit code flags them.
pub(crate) fn exit_code_for(moves: Option<&BulkResult<MoveOutcome>>) -> i32 {
    match moves {
        Some(m) if m.has_failures() => 1,
        _ => 0,
    }
}
