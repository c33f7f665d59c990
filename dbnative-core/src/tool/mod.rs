//! Native tool invocation.
//!
//! - `family`: credential conventions shared by a family of tools
//! - `settings`: per-invocation settings and the effective-credentials rule
//! - `temp`: process-private temp folders
//! - `artifact`: credential files with guaranteed deletion
//! - `invocation`: prepared command lines and environment
//! - `executor`: seam to the process-spawning framework
//! - `handler`: the invocation builder tying it together
//!
//! # Security Guarantees
//! - Passwords never appear in an argument list
//! - Credential files are private to the owning user and exist only for the
//!   duration of one invocation

mod artifact;
mod executor;
mod family;
mod handler;
mod invocation;
mod settings;
mod temp;

pub use artifact::{CredentialArtifact, CredentialArtifactManager};
pub use executor::{ProcessExecutor, ProcessOutcome};
pub use family::ToolFamily;
pub use handler::{NativeToolHandler, ToolCommandDelegate};
pub use invocation::{InvocationArgs, PreparedInvocation};
pub use settings::ToolInvocationSettings;
pub use temp::{ProcessTempFolders, TempFolderProvider};
