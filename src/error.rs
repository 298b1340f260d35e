//! Tool error taxonomy and its mapping onto the JSON-RPC error channel.

use rmcp::model::ErrorCode;
use rmcp::ErrorData;
use serde_json::{json, Value};
use thiserror::Error;

use crate::eval::EvalError;

/// Argument missing or of the wrong type
pub const INVALID_PARAMETER: i32 = -32602;
/// Expression does not parse
pub const SYNTAX_ERROR: i32 = -32000;
/// Division operand is zero
pub const DIVISION_BY_ZERO: i32 = -32001;
/// Working directory absent or not a directory
pub const WORKING_DIRECTORY_INVALID: i32 = -32002;
/// Shell process could not be launched
pub const EXECUTION_ERROR: i32 = -32000;
/// Anything the tool did not anticipate
pub const INTERNAL_ERROR: i32 = -32603;

/// A classified tool failure, surfaced through the RPC error channel
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Invalid input: {message}")]
    InvalidParameter { message: String },

    #[error("{message}")]
    Syntax { message: String, expression: String },

    #[error("{message}")]
    DivisionByZero { message: String, expression: String },

    #[error("{message}")]
    WorkingDirectoryInvalid {
        message: String,
        command: String,
        working_dir: String,
        details: String,
    },

    #[error("An unexpected error occurred while executing the command: {details}")]
    Execution {
        command: String,
        working_dir: Option<String>,
        details: String,
    },

    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

impl ToolError {
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        ToolError::InvalidParameter {
            message: message.into(),
        }
    }

    /// Stable numeric code reported to the caller
    pub fn code(&self) -> i32 {
        match self {
            ToolError::InvalidParameter { .. } => INVALID_PARAMETER,
            ToolError::Syntax { .. } => SYNTAX_ERROR,
            ToolError::DivisionByZero { .. } => DIVISION_BY_ZERO,
            ToolError::WorkingDirectoryInvalid { .. } => WORKING_DIRECTORY_INVALID,
            ToolError::Execution { .. } => EXECUTION_ERROR,
            ToolError::Internal(_) => INTERNAL_ERROR,
        }
    }

    /// Diagnostic payload attached to the RPC error
    pub fn data(&self) -> Option<Value> {
        match self {
            ToolError::InvalidParameter { .. } | ToolError::Internal(_) => None,
            ToolError::Syntax { expression, .. } | ToolError::DivisionByZero { expression, .. } => {
                Some(json!({ "input_expression": expression }))
            }
            ToolError::WorkingDirectoryInvalid {
                command,
                working_dir,
                details,
                ..
            } => Some(json!({
                "command": command,
                "working_dir": working_dir,
                "error_details": details,
            })),
            ToolError::Execution {
                command,
                working_dir,
                details,
            } => {
                let mut data = json!({ "command": command, "error_details": details });
                if let Some(dir) = working_dir {
                    data["working_dir"] = json!(dir);
                }
                Some(data)
            }
        }
    }
}

impl From<EvalError> for ToolError {
    fn from(err: EvalError) -> Self {
        let message = err.to_string();
        match err {
            EvalError::Syntax { expression, .. } => ToolError::Syntax { message, expression },
            EvalError::DivisionByZero { expression } => {
                ToolError::DivisionByZero { message, expression }
            }
        }
    }
}

impl From<ToolError> for ErrorData {
    fn from(err: ToolError) -> Self {
        ErrorData::new(ErrorCode(err.code()), err.to_string(), err.data())
    }
}
