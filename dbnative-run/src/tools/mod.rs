//! MySQL native tool delegates.
//!
//! Each delegate contributes the executable and the tool's own options;
//! credentials, host and port are appended by the core handler.

mod dump;
mod script;

use std::path::PathBuf;

use dbnative_core::NativeToolError;

pub use dump::{DumpOptions, ExportTarget, LockMode, MySqlDumpDelegate};
pub use script::{MySqlScriptDelegate, ScriptTarget};

/// Location of the MySQL client executables.
#[derive(Debug, Clone, Default)]
pub struct MySqlClientHome {
    bin_dir: Option<PathBuf>,
}

impl MySqlClientHome {
    /// Executables resolved through `PATH`.
    pub const fn from_path() -> Self {
        Self { bin_dir: None }
    }

    /// Executables taken from `bin_dir`.
    pub fn new(bin_dir: impl Into<PathBuf>) -> Self {
        Self {
            bin_dir: Some(bin_dir.into()),
        }
    }

    /// Full path (or bare name for `PATH` lookup) of a client executable.
    pub fn executable(&self, name: &str) -> String {
        let file_name = format!("{}{}", name, std::env::consts::EXE_SUFFIX);
        match &self.bin_dir {
            Some(dir) => dir.join(file_name).to_string_lossy().into_owned(),
            None => file_name,
        }
    }
}

/// Rejects names the tool would parse as options or that are empty.
fn positional(kind: &str, value: &str) -> dbnative_core::Result<String> {
    if value.trim().is_empty() {
        return Err(NativeToolError::preparation(format!("{} name is empty", kind)));
    }
    if value.starts_with('-') {
        return Err(NativeToolError::preparation(format!(
            "{} name '{}' would be read as an option",
            kind, value
        )));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_executable_from_path() {
        let home = MySqlClientHome::from_path();
        assert_eq!(
            home.executable("mysqldump"),
            format!("mysqldump{}", std::env::consts::EXE_SUFFIX)
        );
    }

    #[test]
    fn test_executable_from_bin_dir() {
        let home = MySqlClientHome::new("/opt/mysql/bin");
        let exe = home.executable("mysql");
        assert!(exe.starts_with("/opt/mysql/bin"));
        assert!(exe.contains("mysql"));
    }

    #[test]
    fn test_positional_validation() {
        assert_eq!(positional("Database", "shop").unwrap(), "shop");
        assert!(positional("Database", "").is_err());
        assert!(positional("Database", "  ").is_err());
        assert!(positional("Table", "--all-databases").is_err());
    }
}
