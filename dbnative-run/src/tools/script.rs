//! `mysql` script execution delegate.

use std::path::PathBuf;

use dbnative_core::{NativeToolError, ToolCommandDelegate, ToolInvocationSettings};

use super::{MySqlClientHome, positional};

/// Script to run and the database it runs against.
#[derive(Debug, Clone)]
pub struct ScriptTarget {
    /// Default database for the script
    pub database: String,
    /// SQL script fed on stdin
    pub input: PathBuf,
}

/// Builds `mysql` command lines that execute a script from stdin.
#[derive(Debug, Clone, Default)]
pub struct MySqlScriptDelegate {
    client: MySqlClientHome,
    default_character_set: Option<String>,
    verbose: bool,
}

impl MySqlScriptDelegate {
    /// Creates a delegate using the given client executables.
    pub const fn new(client: MySqlClientHome) -> Self {
        Self {
            client,
            default_character_set: None,
            verbose: false,
        }
    }

    /// Sets `--default-character-set`.
    #[must_use]
    pub fn with_default_character_set(mut self, charset: impl Into<String>) -> Self {
        self.default_character_set = Some(charset.into());
        self
    }

    /// Adds `--verbose` so mysql echoes statements.
    #[must_use]
    pub const fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

impl ToolCommandDelegate for MySqlScriptDelegate {
    type Target = ScriptTarget;

    fn tool_name(&self) -> &str {
        "mysql"
    }

    fn fill_process_parameters(
        &self,
        _settings: &ToolInvocationSettings,
        target: &ScriptTarget,
        cmd: &mut Vec<String>,
    ) -> dbnative_core::Result<()> {
        let database = positional("Database", &target.database)?;
        if !target.input.is_file() {
            return Err(NativeToolError::preparation(format!(
                "Script file {} does not exist",
                target.input.display()
            )));
        }

        cmd.push(self.client.executable("mysql"));
        if let Some(charset) = &self.default_character_set {
            cmd.push(format!("--default-character-set={}", charset));
        }
        if self.verbose {
            cmd.push("--verbose".to_string());
        }
        cmd.push(database);
        Ok(())
    }

    fn process_input(&self, target: &ScriptTarget) -> Option<PathBuf> {
        Some(target.input.clone())
    }
}
