//! Migration tables: ordered literal find/replace pairs plus the filename glob
//! they apply to.
//!
//! Tables come from three places: built-in presets (see [`crate::presets`]),
//! TOML or JSON files on disk, and `--from/--to` pairs given on the command
//! line. All three end up as a [`MigrationTable`] that has passed
//! [`MigrationTable::validate`].

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

pub const DEFAULT_PATTERN: &str = "*.java";

/// A single literal substitution. Case-sensitive, every occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    pub find: String,
    pub replace: String,
}

impl Replacement {
    pub fn new(find: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            find: find.into(),
            replace: replace.into(),
        }
    }

    /// Pair up repeated `--from`/`--to` values positionally.
    pub fn zip(from: &[String], to: &[String]) -> Result<Vec<Self>> {
        if from.len() != to.len() {
            return Err(Error::validation_invalid_argument(
                "from/to",
                format!(
                    "Got {} --from value(s) but {} --to value(s); they pair up positionally",
                    from.len(),
                    to.len()
                ),
                None,
            ));
        }

        Ok(from
            .iter()
            .zip(to.iter())
            .map(|(f, t)| Replacement::new(f.as_str(), t.as_str()))
            .collect())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationTable {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default = "default_pattern")]
    pub pattern: String,
    /// Applied to file contents, in order.
    #[serde(default)]
    pub replacements: Vec<Replacement>,
    /// Applied to file names, in order.
    #[serde(default)]
    pub renames: Vec<Replacement>,
}

fn default_pattern() -> String {
    DEFAULT_PATTERN.to_string()
}

impl MigrationTable {
    /// An unnamed table built from command-line pairs.
    pub fn inline() -> Self {
        Self {
            name: "inline".to_string(),
            description: String::new(),
            pattern: default_pattern(),
            replacements: Vec::new(),
            renames: Vec::new(),
        }
    }

    pub fn parse_toml(content: &str, source: &str) -> Result<Self> {
        let table: MigrationTable = toml::from_str(content)
            .map_err(|e| Error::config_invalid_toml(source, e.to_string()))?;
        table.named_after(source).validated()
    }

    pub fn parse_json(content: &str, source: &str) -> Result<Self> {
        let table: MigrationTable =
            serde_json::from_str(content).map_err(|e| Error::config_invalid_json(source, e))?;
        table.named_after(source).validated()
    }

    /// Load a table file, choosing the format by extension.
    pub fn load(path: &Path) -> Result<Self> {
        let source = path.to_string_lossy().to_string();
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        if !matches!(ext, "toml" | "json") {
            return Err(Error::validation_invalid_argument(
                "table",
                format!("Unsupported table format '{}'. Use .toml or .json", ext),
                Some(source),
            ));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::internal_io(e.to_string(), Some(format!("read {}", source))))?;

        log_status!("table", "Loaded migration table from {}", source);

        match ext {
            "toml" => Self::parse_toml(&content, &source),
            _ => Self::parse_json(&content, &source),
        }
    }

    /// Fall back to the file stem when a table file has no `name`.
    fn named_after(mut self, source: &str) -> Self {
        if self.name.is_empty() {
            self.name = Path::new(source)
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| source.to_string());
        }
        self
    }

    fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.pattern.trim().is_empty() {
            return Err(Error::config_invalid_value(
                "pattern",
                Some(self.pattern.clone()),
                "File pattern cannot be empty",
            ));
        }

        if self.replacements.is_empty() && self.renames.is_empty() {
            return Err(Error::config_invalid_value(
                "replacements",
                None,
                format!("Table '{}' has no replacements and no renames", self.name),
            ));
        }

        validate_pairs("replacements", &self.replacements)?;
        validate_pairs("renames", &self.renames)
    }

    pub fn with_pattern(mut self, pattern: Option<String>) -> Self {
        if let Some(p) = pattern {
            self.pattern = p;
        }
        self
    }

    pub fn extend_replacements(mut self, pairs: Vec<Replacement>) -> Self {
        self.replacements.extend(pairs);
        self
    }

    pub fn extend_renames(mut self, pairs: Vec<Replacement>) -> Self {
        self.renames.extend(pairs);
        self
    }
}

fn validate_pairs(key: &str, pairs: &[Replacement]) -> Result<()> {
    for (i, pair) in pairs.iter().enumerate() {
        if pair.find.is_empty() {
            return Err(Error::config_invalid_value(
                format!("{}[{}].find", key, i),
                None,
                "Find string cannot be empty",
            ));
        }
        if pair.find == pair.replace {
            return Err(Error::config_invalid_value(
                format!("{}[{}]", key, i),
                Some(pair.find.clone()),
                "Find and replace are identical",
            ));
        }
    }
    Ok(())
}
