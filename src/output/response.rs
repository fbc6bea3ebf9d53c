//! The JSON envelope every command prints, and the exit code it implies.

use migrator::error::Hint;
use migrator::{Error, ErrorCode, Result};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
struct Envelope<'a> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorBody<'a>>,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    code: &'static str,
    message: &'a str,
    details: &'a Value,
    #[serde(skip_serializing_if = "<[Hint]>::is_empty")]
    hints: &'a [Hint],
}

impl<'a> Envelope<'a> {
    fn new(result: &'a Result<Value>) -> Self {
        match result {
            Ok(data) => Self {
                success: true,
                data: Some(data),
                error: None,
            },
            Err(err) => Self {
                success: false,
                data: None,
                error: Some(ErrorBody {
                    code: err.code.as_str(),
                    message: &err.message,
                    details: &err.details,
                    hints: &err.hints,
                }),
            },
        }
    }
}

/// Serialize a command's output up front so the exit code accounts for
/// serialization failures too.
pub fn map_cmd_result_to_json<T: Serialize>(result: Result<(T, i32)>) -> (Result<Value>, i32) {
    match result {
        Ok((data, exit_code)) => match serde_json::to_value(data) {
            Ok(value) => (Ok(value), exit_code),
            Err(e) => (
                Err(Error::internal_json(
                    e.to_string(),
                    Some("serialize response".to_string()),
                )),
                1,
            ),
        },
        Err(err) => {
            let exit_code = exit_code_for_error(err.code);
            (Err(err), exit_code)
        }
    }
}

fn exit_code_for_error(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::ConfigInvalidToml
        | ErrorCode::ConfigInvalidJson
        | ErrorCode::ConfigInvalidValue
        | ErrorCode::ValidationInvalidArgument => 2,
        ErrorCode::PresetNotFound => 4,
        ErrorCode::VcsNotAWorkingCopy | ErrorCode::VcsCommandFailed => 20,
        ErrorCode::InternalIoError | ErrorCode::InternalJsonError => 1,
    }
}

pub fn print_json_result(result: Result<Value>) -> Result<()> {
    use std::io::{self, Write};

    let payload = serde_json::to_string_pretty(&Envelope::new(&result))
        .map_err(|e| Error::internal_json(e.to_string(), Some("serialize response".to_string())))?;

    match writeln!(io::stdout().lock(), "{}", payload) {
        Ok(()) => Ok(()),
        // Reader went away (`| head`); nothing left to report to.
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        Err(e) => Err(Error::internal_io(
            e.to_string(),
            Some("write stdout".to_string()),
        )),
    }
}
