//! Secure invocation of native database command-line tools.
//!
//! This crate prepares command lines for backup, restore, import and export
//! utilities such as `mysqldump` and `mysql` without putting passwords where
//! other users on the host can read them.
//!
//! # Security Guarantees
//! - Passwords never appear in a tool's argument list
//! - Credential files are `0600`, live in a process-private `0700` folder and
//!   are deleted on every exit path, including cancellation
//! - Secrets are held in zeroizing containers and never logged
//!
//! # Architecture
//! - [`NativeToolHandler`] builds the command line; a [`ToolCommandDelegate`]
//!   per tool supplies the tool-specific arguments
//! - [`CredentialArtifactManager`] writes credential files owned by a
//!   [`CredentialArtifact`] guard
//! - [`ProcessExecutor`] and [`TempFolderProvider`] are the seams to the
//!   surrounding process framework and platform

pub mod connection;
pub mod error;
pub mod logging;
pub mod security;
pub mod tool;

// Re-export commonly used types
pub use connection::ConnectionConfiguration;
pub use error::{NativeToolError, Result};
pub use logging::init_logging;
pub use tool::{
    CredentialArtifact, CredentialArtifactManager, InvocationArgs, NativeToolHandler,
    PreparedInvocation, ProcessExecutor, ProcessOutcome, ProcessTempFolders, TempFolderProvider,
    ToolCommandDelegate, ToolFamily, ToolInvocationSettings,
};
