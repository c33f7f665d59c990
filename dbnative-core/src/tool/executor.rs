//! Seam to the framework that actually spawns native tools.

use async_trait::async_trait;

use super::invocation::InvocationArgs;

/// Exit information of a finished tool process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessOutcome {
    /// Exit code; `None` when the process was terminated by a signal
    pub code: Option<i32>,
    /// Whether the tool reported success
    pub success: bool,
}

impl ProcessOutcome {
    /// Successful exit with code 0.
    pub const fn success() -> Self {
        Self {
            code: Some(0),
            success: true,
        }
    }

    /// Unsuccessful exit.
    pub const fn failure(code: Option<i32>) -> Self {
        Self {
            code,
            success: false,
        }
    }
}

/// Runs a prepared command line to completion.
///
/// Implementations own spawning, output streaming and progress reporting.
/// They must apply every environment override and must not log environment
/// values.
#[async_trait]
pub trait ProcessExecutor: Send + Sync {
    /// Spawns the tool described by `invocation` and waits for it.
    ///
    /// # Errors
    /// Returns [`crate::NativeToolError::Execution`] if the process cannot be
    /// spawned or awaited. A tool that runs and fails is reported through
    /// [`ProcessOutcome`], not as an error.
    async fn execute(&self, invocation: &InvocationArgs) -> crate::Result<ProcessOutcome>;
}
