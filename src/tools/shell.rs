use std::path::Path;

use rmcp::schemars;
use serde::{Deserialize, Serialize};

use crate::error::ToolError;
use crate::executor::{run_shell, CommandOutput, ExecutionError};
use crate::request::{ExecutionContext, Validatable};

/// Request parameters for the shell tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ShellRequest {
    /// The command line to execute through the shell
    pub command: String,
    /// Directory to run the command in. Defaults to the server's current directory.
    #[serde(default)]
    pub working_dir: Option<String>,
}

/// Captured output of a command that ran
#[derive(Debug, Clone, PartialEq, Serialize, schemars::JsonSchema)]
pub struct ShellOutcome {
    /// Standard output, trimmed
    pub stdout: String,
    /// Standard error, trimmed
    pub stderr: String,
    /// Exit code of the command; non-zero does not make the call fail
    pub returncode: i32,
}

impl From<CommandOutput> for ShellOutcome {
    fn from(output: CommandOutput) -> Self {
        Self {
            stdout: output.stdout,
            stderr: output.stderr,
            returncode: output.returncode,
        }
    }
}

impl ShellRequest {
    /// The requested working directory; an empty string counts as not given
    pub fn working_dir(&self) -> Option<&str> {
        self.working_dir.as_deref().filter(|dir| !dir.is_empty())
    }

    pub fn execution_context(&self) -> ExecutionContext {
        ExecutionContext {
            working_dir: self.working_dir().map(String::from),
        }
    }

    fn execution_failed(&self, err: ExecutionError) -> ToolError {
        ToolError::Execution {
            command: self.command.clone(),
            working_dir: self.working_dir().map(String::from),
            details: err.0.to_string(),
        }
    }

    fn invalid_working_dir(&self, dir: &str, message: String, details: String) -> ToolError {
        ToolError::WorkingDirectoryInvalid {
            message,
            command: self.command.clone(),
            working_dir: dir.to_string(),
            details,
        }
    }
}

impl Validatable for ShellRequest {
    fn validate(&self) -> Result<(), ToolError> {
        let Some(dir) = self.working_dir() else {
            return Ok(());
        };
        match Path::new(dir).metadata() {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(self.invalid_working_dir(
                dir,
                format!("Specified working_dir is not a directory: \"{}\"", dir),
                "Not a directory".to_string(),
            )),
            Err(e) => Err(self.invalid_working_dir(
                dir,
                format!("Working directory not found: \"{}\"", dir),
                e.to_string(),
            )),
        }
    }
}

/// Execute a shell command with a validated request
pub async fn execute(req: &ShellRequest) -> Result<ShellOutcome, ToolError> {
    tracing::info!(command = %req.command, working_dir = ?req.working_dir, "shell tool called");

    if let Err(e) = req.validate() {
        tracing::warn!(command = %req.command, error = %e, "rejected working directory");
        return Err(e);
    }

    match run_shell(&req.command, &req.execution_context()).await {
        Ok(output) => {
            tracing::info!(
                command = %req.command,
                returncode = output.returncode,
                stdout = %output.stdout,
                stderr = %output.stderr,
                "command executed"
            );
            Ok(output.into())
        }
        Err(e) => {
            tracing::error!(command = %req.command, working_dir = ?req.working_dir, error = %e, "command failed to launch");
            Err(req.execution_failed(e))
        }
    }
}
