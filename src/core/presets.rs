//! Built-in migration tables compiled into the binary.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::error::{Error, Result};
use crate::table::MigrationTable;

/// Table used when no preset, table file, or inline pair is given.
pub const DEFAULT_PRESET: &str = "ejml-v0.31";

const BUILTIN: &[(&str, &str)] = &[(
    "ejml-v0.31",
    include_str!("presets/ejml-v0.31.toml"),
)];

fn presets_index() -> &'static BTreeMap<&'static str, &'static str> {
    static PRESETS: OnceLock<BTreeMap<&'static str, &'static str>> = OnceLock::new();

    PRESETS.get_or_init(|| BUILTIN.iter().copied().collect())
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetSummary {
    pub name: String,
    pub description: String,
    pub pattern: String,
    pub replacements: usize,
    pub renames: usize,
}

pub fn names() -> Vec<String> {
    presets_index().keys().map(|k| k.to_string()).collect()
}

pub fn load(name: &str) -> Result<MigrationTable> {
    let content = presets_index()
        .get(name)
        .copied()
        .ok_or_else(|| Error::preset_not_found(name, names()))?;

    MigrationTable::parse_toml(content, name)
}

pub fn list() -> Result<Vec<PresetSummary>> {
    presets_index()
        .keys()
        .map(|name| {
            let table = load(name)?;
            Ok(PresetSummary {
                name: table.name,
                description: table.description,
                pattern: table.pattern,
                replacements: table.replacements.len(),
                renames: table.renames.len(),
            })
        })
        .collect()
}
