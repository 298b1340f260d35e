use rmcp::model::JsonObject;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ToolError;

/// Execution context extracted from a request for command execution
#[derive(Debug, Clone, Default)]
pub struct ExecutionContext {
    pub working_dir: Option<String>,
}

/// Trait for request types that need validation before execution
pub trait Validatable {
    /// Validate the request, returning an error if invalid
    fn validate(&self) -> Result<(), ToolError>;
}

/// Turn a raw `tools/call` argument object into a typed request.
///
/// Missing fields and type mismatches become `InvalidParameter`, never a
/// failure of the operation itself. The servers do not call this: `rmcp`'s
/// `Parameters` extractor applies the same contract (code -32602) before a
/// tool runs. It is a library helper for embedding the adapters elsewhere.
pub fn parse_arguments<T: DeserializeOwned>(arguments: Option<JsonObject>) -> Result<T, ToolError> {
    let value = Value::Object(arguments.unwrap_or_default());
    serde_json::from_value(value).map_err(|e| ToolError::invalid_parameter(e.to_string()))
}
