//! `mysqldump` export delegate.

use std::path::PathBuf;

use dbnative_core::{ToolCommandDelegate, ToolInvocationSettings};

use super::{MySqlClientHome, positional};

/// How mysqldump keeps the export consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockMode {
    /// `--single-transaction`
    #[default]
    SingleTransaction,
    /// `--lock-all-tables`
    LockAllTables,
    /// No consistency option
    None,
}

/// Export options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpOptions {
    /// `--no-data`
    pub no_data: bool,
    /// `--routines`
    pub routines: bool,
    /// `--add-drop-table`
    pub add_drop_table: bool,
    /// Multi-row INSERTs; `false` adds `--skip-extended-insert`
    pub extended_insert: bool,
    /// Consistency strategy
    pub lock: LockMode,
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self {
            no_data: false,
            routines: false,
            add_drop_table: false,
            extended_insert: true,
            lock: LockMode::default(),
        }
    }
}

/// What to export and where to.
#[derive(Debug, Clone)]
pub struct ExportTarget {
    /// Database to export
    pub database: String,
    /// Tables to export; empty exports all
    pub tables: Vec<String>,
    /// Dump file
    pub output: PathBuf,
}

/// Builds `mysqldump` command lines.
#[derive(Debug, Clone, Default)]
pub struct MySqlDumpDelegate {
    client: MySqlClientHome,
    options: DumpOptions,
}

impl MySqlDumpDelegate {
    /// Creates a delegate using the given client executables and options.
    pub const fn new(client: MySqlClientHome, options: DumpOptions) -> Self {
        Self { client, options }
    }
}

impl ToolCommandDelegate for MySqlDumpDelegate {
    type Target = ExportTarget;

    fn tool_name(&self) -> &str {
        "mysqldump"
    }

    fn fill_process_parameters(
        &self,
        _settings: &ToolInvocationSettings,
        target: &ExportTarget,
        cmd: &mut Vec<String>,
    ) -> dbnative_core::Result<()> {
        let database = positional("Database", &target.database)?;
        let tables = target
            .tables
            .iter()
            .map(|table| positional("Table", table))
            .collect::<dbnative_core::Result<Vec<_>>>()?;

        cmd.push(self.client.executable("mysqldump"));

        match self.options.lock {
            LockMode::SingleTransaction => cmd.push("--single-transaction".to_string()),
            LockMode::LockAllTables => cmd.push("--lock-all-tables".to_string()),
            LockMode::None => {}
        }
        if self.options.no_data {
            cmd.push("--no-data".to_string());
        }
        if self.options.routines {
            cmd.push("--routines".to_string());
        }
        if self.options.add_drop_table {
            cmd.push("--add-drop-table".to_string());
        }
        if !self.options.extended_insert {
            cmd.push("--skip-extended-insert".to_string());
        }
        cmd.push(format!("--result-file={}", target.output.display()));

        cmd.push(database);
        cmd.extend(tables);
        Ok(())
    }
}
