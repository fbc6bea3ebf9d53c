use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigInvalidToml,
    ConfigInvalidJson,
    ConfigInvalidValue,

    ValidationInvalidArgument,

    PresetNotFound,

    VcsNotAWorkingCopy,
    VcsCommandFailed,

    InternalIoError,
    InternalJsonError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConfigInvalidToml => "config.invalid_toml",
            ErrorCode::ConfigInvalidJson => "config.invalid_json",
            ErrorCode::ConfigInvalidValue => "config.invalid_value",

            ErrorCode::ValidationInvalidArgument => "validation.invalid_argument",

            ErrorCode::PresetNotFound => "preset.not_found",

            ErrorCode::VcsNotAWorkingCopy => "vcs.not_a_working_copy",
            ErrorCode::VcsCommandFailed => "vcs.command_failed",

            ErrorCode::InternalIoError => "internal.io_error",
            ErrorCode::InternalJsonError => "internal.json_error",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigParseDetails {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigInvalidValueDetails {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub problem: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidArgumentDetails {
    pub field: String,
    pub problem: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotFoundDetails {
    pub id: String,
    pub available: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VcsCommandFailedDetails {
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    pub stderr: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalIoErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

fn to_details<T: Serialize>(details: T) -> Value {
    serde_json::to_value(details).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
        }
    }

    pub fn validation_invalid_argument(
        field: impl Into<String>,
        problem: impl Into<String>,
        id: Option<String>,
    ) -> Self {
        Self::new(
            ErrorCode::ValidationInvalidArgument,
            "Invalid argument",
            to_details(InvalidArgumentDetails {
                field: field.into(),
                problem: problem.into(),
                id,
            }),
        )
    }

    pub fn config_invalid_toml(path: impl Into<String>, error: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ConfigInvalidToml,
            "Invalid TOML in migration table",
            to_details(ConfigParseDetails {
                path: path.into(),
                error: error.into(),
            }),
        )
    }

    pub fn config_invalid_json(path: impl Into<String>, err: serde_json::Error) -> Self {
        Self::new(
            ErrorCode::ConfigInvalidJson,
            "Invalid JSON in migration table",
            to_details(ConfigParseDetails {
                path: path.into(),
                error: err.to_string(),
            }),
        )
    }

    pub fn config_invalid_value(
        key: impl Into<String>,
        value: Option<String>,
        problem: impl Into<String>,
    ) -> Self {
        Self::new(
            ErrorCode::ConfigInvalidValue,
            "Invalid migration table value",
            to_details(ConfigInvalidValueDetails {
                key: key.into(),
                value,
                problem: problem.into(),
            }),
        )
    }

    pub fn preset_not_found(id: impl Into<String>, available: Vec<String>) -> Self {
        Self::new(
            ErrorCode::PresetNotFound,
            "Preset not found",
            to_details(NotFoundDetails {
                id: id.into(),
                available,
            }),
        )
        .with_hint("Run 'migrator presets' to see the built-in migration tables")
    }

    pub fn vcs_not_a_working_copy(vcs: &str, path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(
            ErrorCode::VcsNotAWorkingCopy,
            format!("'{}' is not inside a {} working copy", path, vcs),
            serde_json::json!({ "vcs": vcs, "path": path }),
        )
        .with_hint("Pass '--vcs plain' to rename without version control")
    }

    pub fn vcs_command_failed(details: VcsCommandFailedDetails) -> Self {
        let message = if details.stderr.is_empty() {
            format!("{} failed", details.command)
        } else {
            format!("{} failed: {}", details.command, details.stderr)
        };
        Self::new(ErrorCode::VcsCommandFailed, message, to_details(details))
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        Self::new(
            ErrorCode::InternalIoError,
            "IO error",
            to_details(InternalIoErrorDetails {
                error: error.into(),
                context,
            }),
        )
    }

    pub fn internal_json(error: impl Into<String>, context: Option<String>) -> Self {
        Self::new(
            ErrorCode::InternalJsonError,
            "JSON error",
            serde_json::json!({ "error": error.into(), "context": context }),
        )
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_dotted() {
        assert_eq!(ErrorCode::PresetNotFound.as_str(), "preset.not_found");
        assert_eq!(ErrorCode::VcsCommandFailed.as_str(), "vcs.command_failed");
    }

    #[test]
    fn preset_not_found_carries_hint_and_available() {
        let err = Error::preset_not_found("nope", vec!["ejml-v0.31".to_string()]);
        assert_eq!(err.code, ErrorCode::PresetNotFound);
        assert_eq!(err.hints.len(), 1);
        assert_eq!(err.details["available"][0], "ejml-v0.31");
    }

    #[test]
    fn vcs_command_failed_message_includes_stderr() {
        let err = Error::vcs_command_failed(VcsCommandFailedDetails {
            command: "git mv a b".to_string(),
            exit_code: Some(128),
            stderr: "fatal: not under version control".to_string(),
        });
        assert!(err.message.contains("not under version control"));
        assert_eq!(err.details["exitCode"], 128);
    }
}
