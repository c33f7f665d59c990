//! Prepared command lines.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};

use zeroize::Zeroizing;

use super::artifact::CredentialArtifact;

/// Ordered command-line tokens plus environment overrides for one tool run.
///
/// Token 0 is the tool executable. Environment values may hold secrets and
/// are never rendered by `Debug`. Variables listed as unset must be removed
/// from whatever environment the tool would otherwise inherit.
#[derive(Clone, Default)]
pub struct InvocationArgs {
    args: Vec<String>,
    env: BTreeMap<String, Zeroizing<String>>,
    unset_env: BTreeSet<String>,
    stdin: Option<PathBuf>,
}

impl InvocationArgs {
    /// Wraps a complete token list.
    pub fn new(args: Vec<String>) -> Self {
        Self {
            args,
            ..Self::default()
        }
    }

    /// All tokens, executable first.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Tool executable.
    pub fn program(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }

    /// Tokens after the executable.
    pub fn arguments(&self) -> &[String] {
        self.args.get(1..).unwrap_or_default()
    }

    /// File name of the executable, for logs and errors.
    pub fn tool_name(&self) -> String {
        self.program()
            .map(|program| {
                Path::new(program)
                    .file_name()
                    .map_or_else(|| program.to_string(), |name| name.to_string_lossy().into_owned())
            })
            .unwrap_or_default()
    }

    /// Adds or replaces an environment override.
    pub fn set_env(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.unset_env.remove(&name);
        self.env.insert(name, Zeroizing::new(value.into()));
    }

    /// Keeps `name` out of the tool's environment, dropping any override.
    pub fn unset_env(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.env.remove(&name);
        self.unset_env.insert(name);
    }

    /// Variables the tool must not inherit.
    pub fn unset_env_names(&self) -> impl Iterator<Item = &str> {
        self.unset_env.iter().map(String::as_str)
    }

    /// Looks up an environment override.
    pub fn env_value(&self, name: &str) -> Option<&str> {
        self.env.get(name).map(|value| value.as_str())
    }

    /// All environment overrides, ordered by name.
    pub fn env(&self) -> impl Iterator<Item = (&str, &str)> {
        self.env
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// File the tool reads its standard input from, if any.
    pub fn stdin_file(&self) -> Option<&Path> {
        self.stdin.as_deref()
    }

    /// Redirects the tool's standard input from `path`.
    pub fn set_stdin_file(&mut self, path: impl Into<PathBuf>) {
        self.stdin = Some(path.into());
    }
}

impl fmt::Debug for InvocationArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvocationArgs")
            .field("args", &self.args)
            .field("env", &self.env.keys().collect::<Vec<_>>())
            .field("unset_env", &self.unset_env)
            .field("stdin", &self.stdin)
            .finish()
    }
}

/// Command line together with the credential file it references.
///
/// Dropping a prepared invocation deletes its credential file.
#[derive(Debug)]
pub struct PreparedInvocation {
    args: InvocationArgs,
    artifact: Option<CredentialArtifact>,
}

impl PreparedInvocation {
    pub(crate) const fn new(args: InvocationArgs, artifact: Option<CredentialArtifact>) -> Self {
        Self { args, artifact }
    }

    /// Command line and environment.
    pub const fn args(&self) -> &InvocationArgs {
        &self.args
    }

    /// Path of the credential file, when credential-file mode is active.
    pub fn artifact_path(&self) -> Option<&Path> {
        self.artifact.as_ref().map(CredentialArtifact::path)
    }

    /// Splits into the command line and the credential file guard.
    pub fn into_parts(self) -> (InvocationArgs, Option<CredentialArtifact>) {
        (self.args, self.artifact)
    }

    /// Deletes the credential file, if any.
    pub fn finish(self) {
        if let Some(artifact) = self.artifact {
            artifact.release();
        }
    }
}
