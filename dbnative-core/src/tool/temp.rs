//! Process-private temp folders.
//!
//! Credential files live in a namespaced folder below a root that belongs to
//! the running process. On unix every folder is created `0700`.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::debug;

use crate::error::NativeToolError;

/// Resolves namespaced temp folders.
pub trait TempFolderProvider: Send + Sync {
    /// Returns an existing folder reserved for `namespace`, creating it if needed.
    ///
    /// # Errors
    /// Returns error if the namespace is not a plain folder name or the folder
    /// cannot be created
    fn temp_folder(&self, namespace: &str) -> io::Result<PathBuf>;
}

/// Temp folders rooted in a directory owned by this process.
///
/// The root and everything below it is removed when the value is dropped.
#[derive(Debug)]
pub struct ProcessTempFolders {
    root: TempDir,
}

impl ProcessTempFolders {
    /// Creates a fresh root under the system temp directory.
    ///
    /// # Errors
    /// Returns error if the root folder cannot be created
    pub fn new() -> crate::Result<Self> {
        Self::in_dir(std::env::temp_dir())
    }

    /// Creates a fresh root under `parent`.
    ///
    /// # Errors
    /// Returns error if the root folder cannot be created
    pub fn in_dir(parent: impl AsRef<Path>) -> crate::Result<Self> {
        let root = tempfile::Builder::new()
            .prefix(&format!("dbnative-{}-", std::process::id()))
            .tempdir_in(parent)
            .map_err(|e| NativeToolError::io("Failed to create temp folder root", e))?;
        debug!("Temp folder root: {}", root.path().display());
        Ok(Self { root })
    }

    /// Root folder path.
    pub fn root(&self) -> &Path {
        self.root.path()
    }
}

impl TempFolderProvider for ProcessTempFolders {
    fn temp_folder(&self, namespace: &str) -> io::Result<PathBuf> {
        if !is_plain_name(namespace) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid temp folder namespace '{}'", namespace),
            ));
        }

        let folder = self.root.path().join(namespace);
        create_private_dir(&folder)?;
        Ok(folder)
    }
}

fn is_plain_name(namespace: &str) -> bool {
    !namespace.is_empty()
        && namespace != "."
        && namespace != ".."
        && !namespace.contains(['/', '\\'])
}

#[cfg(unix)]
fn create_private_dir(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;

    std::fs::DirBuilder::new()
        .recursive(true)
        .mode(0o700)
        .create(path)
}

#[cfg(not(unix))]
fn create_private_dir(path: &Path) -> io::Result<()> {
    std::fs::create_dir_all(path)
}
