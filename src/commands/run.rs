use clap::Args;
use serde::Serialize;

use migrator::output::BulkResult;
use migrator::rename::{MoveOutcome, RenamePlan};
use migrator::replace::{self, ReplaceResult};
use migrator::utils::paths;
use migrator::MoveStrategy;

use super::rename::{apply_plan, exit_code_for, plan_tree};
use super::{CmdResult, PairTarget, TableArgs};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Directory to migrate
    pub dir: String,

    #[command(flatten)]
    pub table: TableArgs,

    /// How files are moved: git, svn, plain
    #[arg(long, default_value = "git")]
    pub vcs: String,

    /// Report what would change without writing or moving
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameSection {
    #[serde(flatten)]
    pub plan: RenamePlan,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moves: Option<BulkResult<MoveOutcome>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunOutput {
    pub command: &'static str,
    pub root: String,
    pub table: String,
    pub vcs: MoveStrategy,
    pub dry_run: bool,
    pub replace: ReplaceResult,
    pub rename: RenameSection,
}

/// Content first, then file names, so moved files carry their edits.
pub fn run(args: RunArgs) -> CmdResult<RunOutput> {
    let root = paths::resolve_root(&args.dir)?;
    let strategy = MoveStrategy::from_str(&args.vcs)?;
    let table = args.table.resolve(PairTarget::Both)?;

    // Content edits never change file names, so the plan made here still
    // holds after they are written. Check the VCS before touching content,
    // and only when something will actually move.
    let plan = plan_tree(&root, &table, strategy)?;
    if !args.dry_run && !plan.renames.is_empty() {
        strategy.ensure_ready(&root)?;
    }

    let replace = replace::replace_tree(&root, &table, !args.dry_run)?;
    let moves = apply_plan(&plan, &root, strategy, args.dry_run)?;
    let exit_code = exit_code_for(moves.as_ref());

    Ok((
        RunOutput {
            command: "run",
            root: root.to_string_lossy().to_string(),
            table: table.name,
            vcs: strategy,
            dry_run: args.dry_run,
            replace,
            rename: RenameSection { plan, moves },
        },
        exit_code,
    ))
}
