use async_trait::async_trait;
use domain::models::ExecutionResult;
use domain::services::CommandRunner;
use shared::error::{Error, Result};
use std::io::ErrorKind;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Placeholder output for the streaming path, where the real output already
/// went to the user's terminal.
pub const STREAMED_OUTPUT_NOTE: &str = "(output was streamed above)";

/// Runs commands through the platform shell. The streaming path inherits
/// the standard streams so prompts, colors and partial progress behave
/// exactly as they would in a plain shell; no timeout is imposed on the
/// command itself.
pub struct ShellExecutor;

fn shell_command(command: &str) -> Command {
    let mut shell = if cfg!(windows) {
        let mut shell = Command::new("cmd.exe");
        shell.arg("/C");
        shell
    } else {
        let mut shell = Command::new("sh");
        shell.arg("-c");
        shell
    };
    shell.arg(command);
    shell
}

impl ShellExecutor {
    pub async fn execute(&self, command: &str) -> ExecutionResult {
        debug!(command, "executing in platform shell");

        let status = shell_command(command)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await;

        match status {
            Ok(status) if status.success() => ExecutionResult::succeeded(STREAMED_OUTPUT_NOTE),
            Ok(status) => {
                let code = status.code().unwrap_or(-1);
                ExecutionResult::failed(format!("Command exited with code {code}"))
            }
            Err(err) => {
                let message = if err.kind() == ErrorKind::PermissionDenied {
                    Error::AdminRequired(err.to_string()).to_string()
                } else {
                    Error::Spawn(err.to_string()).to_string()
                };
                ExecutionResult::failed(message)
            }
        }
    }

    /// Silent capture mode for callers that need the text instead of the
    /// live stream. Fails with stderr on non-zero exit.
    pub async fn capture_output(&self, command: &str) -> Result<String> {
        let output = shell_command(command)
            .output()
            .await
            .map_err(|err| Error::Spawn(err.to_string()))?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(Error::NonZeroExit {
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        }
    }
}

#[async_trait]
impl CommandRunner for ShellExecutor {
    async fn run(&self, command: &str) -> ExecutionResult {
        self.execute(command).await
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clean_exit_reports_streamed_success() {
        let result = ShellExecutor.execute("true").await;
        assert!(result.success);
        assert_eq!(result.output.as_deref(), Some(STREAMED_OUTPUT_NOTE));
        assert!(result.error.is_none());
    }

    #[tokio::test]
    async fn test_non_zero_exit_reports_the_code() {
        let result = ShellExecutor.execute("exit 3").await;
        assert!(!result.success);
        assert_eq!(result.output.as_deref(), Some(""));
        assert_eq!(result.error.as_deref(), Some("Command exited with code 3"));
    }

    #[tokio::test]
    async fn test_capture_output_returns_stdout() {
        let out = ShellExecutor.capture_output("printf hello").await.unwrap();
        assert_eq!(out, "hello");
    }

    #[tokio::test]
    async fn test_capture_output_fails_with_stderr_on_non_zero_exit() {
        let err = ShellExecutor
            .capture_output("printf oops >&2; exit 2")
            .await
            .unwrap_err();
        match err {
            Error::NonZeroExit { code, stderr } => {
                assert_eq!(code, 2);
                assert_eq!(stderr, "oops");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
