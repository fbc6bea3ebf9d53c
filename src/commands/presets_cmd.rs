use clap::Args;
use serde::Serialize;

use migrator::presets::{self, PresetSummary};
use migrator::MigrationTable;

use super::CmdResult;

#[derive(Args, Debug)]
pub struct PresetsArgs {
    /// Show one preset's full table instead of listing them
    pub name: Option<String>,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum PresetsOutput {
    #[serde(rename = "presets.list")]
    List { presets: Vec<PresetSummary> },
    #[serde(rename = "presets.show")]
    Show { preset: MigrationTable },
}

pub fn run(args: PresetsArgs) -> CmdResult<PresetsOutput> {
    match args.name {
        Some(name) => Ok((
            PresetsOutput::Show {
                preset: presets::load(&name)?,
            },
            0,
        )),
        None => Ok((
            PresetsOutput::List {
                presets: presets::list()?,
            },
            0,
        )),
    }
}
