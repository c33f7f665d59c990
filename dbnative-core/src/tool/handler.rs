//! Invocation builder for native tools.
//!
//! A [`NativeToolHandler`] knows how credentials, host and port reach a tool
//! family. Everything else about the command line comes from a
//! [`ToolCommandDelegate`] implemented per tool (`mysqldump`, `mysql`, ...).

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use super::artifact::CredentialArtifactManager;
use super::executor::{ProcessExecutor, ProcessOutcome};
use super::family::ToolFamily;
use super::invocation::{InvocationArgs, PreparedInvocation};
use super::settings::ToolInvocationSettings;
use super::temp::TempFolderProvider;
use crate::error::NativeToolError;

/// Tool-specific part of a command line.
pub trait ToolCommandDelegate: Send + Sync {
    /// Object the tool operates on (a database, a script, ...).
    type Target: Send + Sync;

    /// Short tool name used in logs and errors.
    fn tool_name(&self) -> &str;

    /// Appends the executable followed by the tool's own arguments.
    ///
    /// # Errors
    /// Returns [`NativeToolError::Preparation`] if the target cannot be
    /// expressed as tool arguments
    fn fill_process_parameters(
        &self,
        settings: &ToolInvocationSettings,
        target: &Self::Target,
        cmd: &mut Vec<String>,
    ) -> crate::Result<()>;

    /// File fed to the tool's standard input.
    fn process_input(&self, _target: &Self::Target) -> Option<PathBuf> {
        None
    }
}

/// Builds and runs command lines for one tool of a family.
#[derive(Debug)]
pub struct NativeToolHandler<D> {
    delegate: D,
    family: ToolFamily,
    artifacts: CredentialArtifactManager,
}

impl<D: ToolCommandDelegate> NativeToolHandler<D> {
    /// Creates a handler whose credential files go to `temp_folders`.
    pub fn new(delegate: D, family: ToolFamily, temp_folders: Arc<dyn TempFolderProvider>) -> Self {
        Self {
            delegate,
            family,
            artifacts: CredentialArtifactManager::new(temp_folders, family),
        }
    }

    /// Tool delegate.
    pub const fn delegate(&self) -> &D {
        &self.delegate
    }

    /// Tool family conventions in use.
    pub const fn family(&self) -> ToolFamily {
        self.family
    }

    /// Builds the complete command line and environment for `target`.
    ///
    /// In credential-file mode the returned invocation owns the credential
    /// file; dropping or finishing it deletes the file.
    ///
    /// # Errors
    /// Returns [`NativeToolError::Preparation`] when the connection has no
    /// host or the delegate produced no executable, and
    /// [`NativeToolError::Io`] when the credential file cannot be written.
    pub fn build_command_line(
        &self,
        settings: &ToolInvocationSettings,
        target: &D::Target,
    ) -> crate::Result<PreparedInvocation> {
        let connection = settings.connection();
        let host = connection.host_name().ok_or_else(|| {
            NativeToolError::preparation(format!(
                "No host configured for {}",
                self.delegate.tool_name()
            ))
        })?;

        let mut cmd = Vec::new();
        self.delegate
            .fill_process_parameters(settings, target, &mut cmd)?;
        if cmd.is_empty() {
            return Err(NativeToolError::preparation(format!(
                "{} produced no executable",
                self.delegate.tool_name()
            )));
        }

        let credentials = settings.effective_credentials();
        let mut artifact = None;
        let mut password_env = None;

        if settings.is_override_credentials() {
            let created = self
                .artifacts
                .create_artifact(credentials.username(), credentials.password_or_empty())?;
            cmd.insert(1, self.family.defaults_file_arg(created.path()));
            artifact = Some(created);
        } else {
            cmd.push(self.family.user_flag.to_string());
            cmd.push(credentials.username().to_string());
            password_env = Some(credentials.password_or_empty().to_string());
        }

        cmd.push(format!("--host={}", host));
        if let Some(port) = connection.host_port() {
            cmd.push(format!("--port={}", port));
        }

        let mut args = InvocationArgs::new(cmd);
        match password_env {
            Some(password) => args.set_env(self.family.password_env_var, password),
            None => args.unset_env(self.family.password_env_var),
        }
        if let Some(input) = self.delegate.process_input(target) {
            args.set_stdin_file(input);
        }

        debug!(
            "Prepared {} command line with {} arguments ({})",
            self.delegate.tool_name(),
            args.arguments().len(),
            if artifact.is_some() {
                "credential file"
            } else {
                "inline user, password in environment"
            }
        );

        Ok(PreparedInvocation::new(args, artifact))
    }

    /// Prepares, runs and cleans up one invocation.
    ///
    /// The credential file is released once the executor returns, whatever
    /// it returned. If this future is dropped before completion the file is
    /// deleted by the artifact's own drop.
    ///
    /// # Errors
    /// Returns preparation errors before anything is spawned, executor errors
    /// as-is, and [`NativeToolError::ProcessFailed`] for a non-zero exit.
    pub async fn execute<E>(
        &self,
        executor: &E,
        settings: &ToolInvocationSettings,
        target: &D::Target,
    ) -> crate::Result<ProcessOutcome>
    where
        E: ProcessExecutor + ?Sized,
    {
        let prepared = self.build_command_line(settings, target)?;
        let (args, artifact) = prepared.into_parts();

        info!("Running {}", self.delegate.tool_name());
        let result = executor.execute(&args).await;

        if let Some(artifact) = artifact {
            artifact.release();
        }

        let outcome = result?;
        if !outcome.success {
            return Err(NativeToolError::process_failed(
                self.delegate.tool_name(),
                outcome.code,
            ));
        }

        info!("✓ {} completed", self.delegate.tool_name());
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::connection::ConnectionConfiguration;
    use crate::security::Credentials;
    use crate::tool::temp::ProcessTempFolders;

    struct DumpDelegate;

    impl ToolCommandDelegate for DumpDelegate {
        type Target = String;

        fn tool_name(&self) -> &str {
            "mysqldump"
        }

        fn fill_process_parameters(
            &self,
            _settings: &ToolInvocationSettings,
            target: &String,
            cmd: &mut Vec<String>,
        ) -> crate::Result<()> {
            cmd.push("mysqldump".to_string());
            cmd.push("--routines".to_string());
            cmd.push(target.clone());
            Ok(())
        }
    }

    /// Records what the tool would have seen while it was running.
    #[derive(Default)]
    struct RecordingExecutor {
        exit_code: i32,
        seen: Mutex<Option<(InvocationArgs, Option<String>)>>,
    }

    #[async_trait]
    impl ProcessExecutor for RecordingExecutor {
        async fn execute(&self, invocation: &InvocationArgs) -> crate::Result<ProcessOutcome> {
            let credential_file = invocation
                .args()
                .iter()
                .find_map(|arg| arg.strip_prefix("--defaults-file="))
                .map(|path| std::fs::read_to_string(path).unwrap());
            *self.seen.lock().unwrap() = Some((invocation.clone(), credential_file));

            Ok(if self.exit_code == 0 {
                ProcessOutcome::success()
            } else {
                ProcessOutcome::failure(Some(self.exit_code))
            })
        }
    }

    fn handler() -> (Arc<ProcessTempFolders>, NativeToolHandler<DumpDelegate>) {
        let folders = Arc::new(ProcessTempFolders::new().unwrap());
        let handler = NativeToolHandler::new(DumpDelegate, ToolFamily::MYSQL, folders.clone());
        (folders, handler)
    }

    fn connection(port: &str) -> Arc<ConnectionConfiguration> {
        Arc::new(
            ConnectionConfiguration::new("db1")
                .with_port(port)
                .with_credentials(Credentials::new(
                    "root".to_string(),
                    Some("s3cr3t".to_string()),
                )),
        )
    }

    #[test]
    fn test_override_mode_uses_credential_file() {
        let (_folders, handler) = handler();
        let settings = ToolInvocationSettings::new(connection("")).with_override_credentials(true);

        let prepared = handler
            .build_command_line(&settings, &"shop".to_string())
            .unwrap();
        let args = prepared.args().args();
        let path = prepared.artifact_path().unwrap().to_path_buf();

        assert_eq!(args[0], "mysqldump");
        assert_eq!(args[1], format!("--defaults-file={}", path.display()));
        assert_eq!(args[2..], ["--routines", "shop", "--host=db1"]);
        assert!(!args.iter().any(|arg| arg.starts_with("--port=")));
        assert!(!args.iter().any(|arg| arg == "-u"));
        assert_eq!(prepared.args().env_value("MYSQL_PWD"), None);
        assert_eq!(
            prepared.args().unset_env_names().collect::<Vec<_>>(),
            ["MYSQL_PWD"]
        );

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "[client]\nuser=root\npassword=s3cr3t"
        );

        prepared.finish();
        assert!(!path.exists());
    }

    #[test]
    fn test_inline_mode_uses_flag_and_environment() {
        let (_folders, handler) = handler();
        let settings = ToolInvocationSettings::new(connection("3307"))
            .with_tool_user("admin", Some(String::new()));

        let prepared = handler
            .build_command_line(&settings, &"shop".to_string())
            .unwrap();
        let args = prepared.args().args();

        assert_eq!(
            args,
            [
                "mysqldump",
                "--routines",
                "shop",
                "-u",
                "admin",
                "--host=db1",
                "--port=3307"
            ]
        );
        assert_eq!(prepared.args().env_value("MYSQL_PWD"), Some(""));
        assert!(prepared.artifact_path().is_none());
    }

    #[test]
    fn test_inline_mode_keeps_password_out_of_args() {
        let (_folders, handler) = handler();
        let settings = ToolInvocationSettings::new(connection("3306"));

        let prepared = handler
            .build_command_line(&settings, &"shop".to_string())
            .unwrap();

        assert!(
            !prepared
                .args()
                .args()
                .iter()
                .any(|arg| arg.contains("s3cr3t"))
        );
        assert_eq!(prepared.args().env_value("MYSQL_PWD"), Some("s3cr3t"));
    }

    #[test]
    fn test_override_mode_writes_empty_password_explicitly() {
        let (_folders, handler) = handler();
        for password in [None, Some(String::new())] {
            let connection = Arc::new(
                ConnectionConfiguration::new("db1")
                    .with_credentials(Credentials::new("reader".to_string(), password)),
            );
            let settings = ToolInvocationSettings::new(connection).with_override_credentials(true);

            let prepared = handler
                .build_command_line(&settings, &"shop".to_string())
                .unwrap();
            let contents = std::fs::read_to_string(prepared.artifact_path().unwrap()).unwrap();

            assert_eq!(contents, "[client]\nuser=reader\npassword=");
            prepared.finish();
        }
    }

    #[test]
    fn test_missing_host_fails_before_writing_a_file() {
        let (folders, handler) = handler();
        let connection = Arc::new(ConnectionConfiguration::new(""));
        let settings = ToolInvocationSettings::new(connection).with_override_credentials(true);

        let err = handler
            .build_command_line(&settings, &"shop".to_string())
            .unwrap_err();

        assert!(matches!(err, NativeToolError::Preparation { .. }));
        assert!(!folders.root().join("mysql-native-handler").exists());
    }

    #[tokio::test]
    async fn test_execute_releases_artifact_after_success() {
        let (folders, handler) = handler();
        let executor = RecordingExecutor::default();
        let settings = ToolInvocationSettings::new(connection("")).with_override_credentials(true);

        handler
            .execute(&executor, &settings, &"shop".to_string())
            .await
            .unwrap();

        let (_args, contents) = executor.seen.lock().unwrap().take().unwrap();
        assert_eq!(
            contents.as_deref(),
            Some("[client]\nuser=root\npassword=s3cr3t")
        );
        let namespace = folders.root().join("mysql-native-handler");
        assert_eq!(std::fs::read_dir(namespace).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_execute_releases_artifact_after_failure() {
        let (folders, handler) = handler();
        let executor = RecordingExecutor {
            exit_code: 2,
            ..RecordingExecutor::default()
        };
        let settings = ToolInvocationSettings::new(connection("")).with_override_credentials(true);

        let err = handler
            .execute(&executor, &settings, &"shop".to_string())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            NativeToolError::ProcessFailed { code: Some(2), .. }
        ));
        let namespace = folders.root().join("mysql-native-handler");
        assert_eq!(std::fs::read_dir(namespace).unwrap().count(), 0);
    }
}
