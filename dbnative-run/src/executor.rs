//! Tokio-based process executor.

use std::process::Stdio;

use async_trait::async_trait;
use dbnative_core::{InvocationArgs, NativeToolError, ProcessExecutor, ProcessOutcome};
use tracing::debug;

use crate::config::{DATABASE_URL_ENV, TOOL_PASSWORD_ENV};

/// Runner variables that hold secrets and never reach a tool.
const SCRUBBED_ENV: [&str; 2] = [DATABASE_URL_ENV, TOOL_PASSWORD_ENV];

/// Spawns native tools with `tokio::process`.
///
/// Standard input comes from the invocation's input file or `/dev/null`, so a
/// tool that wants to prompt for a password fails instead of hanging. Output
/// is inherited. The child is killed if the executing future is dropped.
///
/// The child inherits the runner's environment minus the runner's own
/// secrets and any variable the invocation marks as unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioProcessExecutor;

#[async_trait]
impl ProcessExecutor for TokioProcessExecutor {
    async fn execute(&self, invocation: &InvocationArgs) -> dbnative_core::Result<ProcessOutcome> {
        let tool = invocation.tool_name();
        let program = invocation
            .program()
            .ok_or_else(|| NativeToolError::preparation("Empty command line"))?;

        let stdin = match invocation.stdin_file() {
            Some(path) => Stdio::from(std::fs::File::open(path).map_err(|e| {
                NativeToolError::execution(
                    &tool,
                    format!("Failed to open input {}", path.display()),
                    e,
                )
            })?),
            None => Stdio::null(),
        };

        let mut command = tokio::process::Command::new(program);
        for name in SCRUBBED_ENV {
            command.env_remove(name);
        }
        for name in invocation.unset_env_names() {
            command.env_remove(name);
        }
        command
            .args(invocation.arguments())
            .envs(invocation.env())
            .stdin(stdin)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        debug!(
            "Spawning {} with {} arguments and {} environment overrides",
            tool,
            invocation.arguments().len(),
            invocation.env().count()
        );

        let mut child = command
            .spawn()
            .map_err(|e| NativeToolError::execution(&tool, "Failed to spawn process", e))?;
        let status = child
            .wait()
            .await
            .map_err(|e| NativeToolError::execution(&tool, "Failed to wait for process", e))?;

        debug!("{} exited with {}", tool, status);
        Ok(if status.success() {
            ProcessOutcome::success()
        } else {
            ProcessOutcome::failure(status.code())
        })
    }
}
