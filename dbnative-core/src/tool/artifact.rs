//! Ephemeral credential files.
//!
//! A [`CredentialArtifact`] is a guard: the file it owns is deleted when the
//! artifact is released or dropped, whichever comes first. Dropping covers
//! the paths explicit release cannot reach, such as a cancelled future or an
//! unwinding panic.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::NamedTempFile;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use super::family::ToolFamily;
use super::temp::TempFolderProvider;
use crate::error::NativeToolError;

/// Creates credential files for one tool family.
#[derive(Clone)]
pub struct CredentialArtifactManager {
    temp_folders: Arc<dyn TempFolderProvider>,
    family: ToolFamily,
}

impl std::fmt::Debug for CredentialArtifactManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialArtifactManager")
            .field("family", &self.family.name)
            .finish_non_exhaustive()
    }
}

impl CredentialArtifactManager {
    /// Creates a manager writing into `temp_folders`.
    pub fn new(temp_folders: Arc<dyn TempFolderProvider>, family: ToolFamily) -> Self {
        Self {
            temp_folders,
            family,
        }
    }

    /// Writes a new credential file for `username`/`password`.
    ///
    /// Each call creates a distinct file, so concurrent invocations against
    /// the same connection never share one. On unix the file is `0600`.
    ///
    /// # Errors
    /// Returns [`NativeToolError::Io`] if the temp folder cannot be resolved or
    /// the file cannot be written; no file is left behind in that case.
    pub fn create_artifact(&self, username: &str, password: &str) -> crate::Result<CredentialArtifact> {
        let folder = self
            .temp_folders
            .temp_folder(self.family.temp_namespace)
            .map_err(|e| NativeToolError::io("Failed to resolve credential temp folder", e))?;
        let folder = std::path::absolute(&folder)
            .map_err(|e| NativeToolError::io("Failed to resolve credential temp folder", e))?;

        let mut file = tempfile::Builder::new()
            .prefix(self.family.credential_file_prefix)
            .suffix(self.family.credential_file_suffix)
            .tempfile_in(&folder)
            .map_err(|e| NativeToolError::io("Failed to create credential file", e))?;

        let contents = Zeroizing::new(self.family.credential_file_contents(username, password));
        file.write_all(contents.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| NativeToolError::io("Failed to write credential file", e))?;

        let path = file.path().to_path_buf();
        debug!("Created {} credential file {}", self.family.name, path.display());

        Ok(CredentialArtifact {
            file: Some(file),
            path,
        })
    }
}

/// A credential file owned by exactly one invocation.
#[derive(Debug)]
pub struct CredentialArtifact {
    file: Option<NamedTempFile>,
    path: PathBuf,
}

impl CredentialArtifact {
    /// Absolute path of the credential file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Deletes the credential file.
    ///
    /// Deletion failures are logged and otherwise ignored: a stale file is
    /// already unreadable to other users and must not change the outcome of
    /// the invocation it belonged to.
    pub fn release(mut self) {
        self.delete();
    }

    fn delete(&mut self) {
        if let Some(file) = self.file.take() {
            match file.close() {
                Ok(()) => debug!("Deleted credential file {}", self.path.display()),
                Err(e) => warn!(
                    "Failed to delete credential file {}: {}",
                    self.path.display(),
                    e
                ),
            }
        }
    }
}

impl Drop for CredentialArtifact {
    fn drop(&mut self) {
        self.delete();
    }
}
