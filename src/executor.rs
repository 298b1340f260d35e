use std::process::{ExitStatus, Output, Stdio};

use thiserror::Error;
use tokio::process::Command;

use crate::request::ExecutionContext;

/// Captured result of a finished shell command
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub returncode: i32,
}

/// The shell process could not be started or awaited
#[derive(Debug, Error)]
#[error("Failed to execute command: {0}")]
pub struct ExecutionError(#[from] pub std::io::Error);

/// Build a command that runs `command_line` through the host shell
fn shell_command(command_line: &str) -> Command {
    if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", command_line]);
        cmd
    } else {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", command_line]);
        cmd
    }
}

/// Run a shell command line with the given execution context.
///
/// The child is awaited on the runtime, so a long-running command only holds
/// up its own invocation. There is no timeout: the child runs to completion.
pub async fn run_shell(command_line: &str, ctx: &ExecutionContext) -> Result<CommandOutput, ExecutionError> {
    let mut cmd = shell_command(command_line);

    if let Some(ref dir) = ctx.working_dir {
        cmd.current_dir(dir);
    }

    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let output = cmd.output().await?;
    Ok(output_to_result(output))
}

fn output_to_result(output: Output) -> CommandOutput {
    CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        returncode: exit_code(output.status),
    }
}

/// Exit code, or the negated signal number for a signalled process
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }
    -1
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_shell_simple() {
        let output = run_shell("echo hello", &ExecutionContext::default()).await.unwrap();
        assert_eq!(output.stdout, "hello");
        assert_eq!(output.stderr, "");
        assert_eq!(output.returncode, 0);
    }

    #[tokio::test]
    async fn test_run_shell_with_working_dir() {
        let ctx = ExecutionContext {
            working_dir: Some("/tmp".to_string()),
        };
        let output = run_shell("pwd", &ctx).await.unwrap();
        assert!(output.stdout.contains("tmp"));
    }

    #[tokio::test]
    async fn test_run_shell_captures_stderr() {
        let output = run_shell("echo oops >&2", &ExecutionContext::default()).await.unwrap();
        assert_eq!(output.stdout, "");
        assert_eq!(output.stderr, "oops");
    }

    #[tokio::test]
    async fn test_run_shell_nonzero_exit() {
        let output = run_shell("exit 3", &ExecutionContext::default()).await.unwrap();
        assert_eq!(output.returncode, 3);
    }

    #[tokio::test]
    async fn test_run_shell_signal() {
        let output = run_shell("kill -9 $$", &ExecutionContext::default()).await.unwrap();
        assert_eq!(output.returncode, -9);
    }

    #[tokio::test]
    async fn test_run_shell_pipes_and_wildcards() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.txt"), "x").unwrap();
        std::fs::write(dir.path().join("b.txt"), "y").unwrap();
        let ctx = ExecutionContext {
            working_dir: Some(dir.path().to_string_lossy().to_string()),
        };
        let output = run_shell("ls *.txt | wc -l", &ctx).await.unwrap();
        assert_eq!(output.stdout, "2");
    }

    #[tokio::test]
    async fn test_run_shell_missing_working_dir_fails_to_launch() {
        let ctx = ExecutionContext {
            working_dir: Some("/nonexistent/path/that/does/not/exist".to_string()),
        };
        let err = run_shell("true", &ctx).await.unwrap_err();
        assert!(err.to_string().contains("Failed to execute command"));
    }
}
