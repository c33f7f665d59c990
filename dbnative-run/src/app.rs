//! Command execution for the CLI.

use std::sync::Arc;

use dbnative_core::error::redact_database_url;
use dbnative_core::{
    ConnectionConfiguration, InvocationArgs, NativeToolError, NativeToolHandler, ProcessExecutor,
    ProcessTempFolders, ToolCommandDelegate, ToolFamily, ToolInvocationSettings,
};
use tracing::{info, warn};
use zeroize::Zeroizing;

use crate::cli::{Cli, Command, ToolArgs};
use crate::config::{
    CredentialSource, ResolvedToolConfig, ToolTaskFile, connection_from_url, get_database_url,
    tool_password_from_env,
};
use crate::executor::TokioProcessExecutor;
use crate::tools::{
    ExportTarget, MySqlClientHome, MySqlDumpDelegate, MySqlScriptDelegate, ScriptTarget,
};

/// Runs the command selected on the command line.
///
/// # Errors
/// Returns configuration, preparation, execution and tool failures
pub async fn run(cli: &Cli) -> dbnative_core::Result<()> {
    let task = match &cli.tool.task_file {
        Some(path) => ToolTaskFile::load(path)?,
        None => ToolTaskFile::default(),
    };
    let config = ResolvedToolConfig::resolve(&cli.tool, task);

    let (url, source) = get_database_url(cli.tool.database_url_file.as_deref())?;
    info!(
        "Target: {} ({})",
        redact_database_url(&url),
        match &source {
            CredentialSource::Environment => "from DATABASE_URL".to_string(),
            CredentialSource::File(path) => format!("from {}", path.display()),
        }
    );
    let connection = Arc::new(connection_from_url(&url)?);
    let settings = tool_settings(&cli.tool, &config, connection)?;

    let client = config
        .mysql_bin_dir
        .clone()
        .map_or_else(MySqlClientHome::from_path, MySqlClientHome::new);
    let temp_folders = Arc::new(ProcessTempFolders::new()?);
    let executor = TokioProcessExecutor;

    match &cli.command {
        Command::Dump(args) => {
            let handler = NativeToolHandler::new(
                MySqlDumpDelegate::new(client, args.options()),
                ToolFamily::MYSQL,
                temp_folders,
            );
            let target = ExportTarget {
                database: args.database.clone(),
                tables: args.tables.clone(),
                output: args.output.clone(),
            };
            run_tool(&handler, &executor, &settings, &target, cli.tool.dry_run).await
        }
        Command::Restore(args) => {
            let mut delegate =
                MySqlScriptDelegate::new(client).with_verbose(args.echo_statements);
            if let Some(charset) = &args.default_character_set {
                delegate = delegate.with_default_character_set(charset);
            }
            let handler = NativeToolHandler::new(delegate, ToolFamily::MYSQL, temp_folders);
            let target = ScriptTarget {
                database: args.database.clone(),
                input: args.input.clone(),
            };
            run_tool(&handler, &executor, &settings, &target, cli.tool.dry_run).await
        }
    }
}

/// Builds invocation settings from resolved configuration.
///
/// # Errors
/// Returns error if the password prompt fails
pub fn tool_settings(
    args: &ToolArgs,
    config: &ResolvedToolConfig,
    connection: Arc<ConnectionConfiguration>,
) -> dbnative_core::Result<ToolInvocationSettings> {
    let settings = ToolInvocationSettings::new(connection)
        .with_override_credentials(config.override_credentials);

    let Some(user) = &config.tool_user_name else {
        return Ok(settings);
    };

    let password = if args.ask_tool_password {
        Some(prompt_tool_password(user)?)
    } else {
        tool_password_from_env()
    };

    Ok(settings.with_tool_user(user.clone(), password.map(|p| p.to_string())))
}

fn prompt_tool_password(user: &str) -> dbnative_core::Result<Zeroizing<String>> {
    rpassword::prompt_password(format!("Password for tool user {}: ", user))
        .map(Zeroizing::new)
        .map_err(|e| NativeToolError::io("Failed to read tool password", e))
}

/// Runs one tool invocation, or prints it when `dry_run` is set.
///
/// Ctrl-C cancels the invocation; its credential file is deleted and the
/// child process killed before this returns.
///
/// # Errors
/// Returns the invocation's error, or [`NativeToolError::Cancelled`]
pub async fn run_tool<D, E>(
    handler: &NativeToolHandler<D>,
    executor: &E,
    settings: &ToolInvocationSettings,
    target: &D::Target,
    dry_run: bool,
) -> dbnative_core::Result<()>
where
    D: ToolCommandDelegate,
    E: ProcessExecutor,
{
    if dry_run {
        let prepared = handler.build_command_line(settings, target)?;
        println!("{}", render_command_line(prepared.args()));
        prepared.finish();
        return Ok(());
    }

    let tool = handler.delegate().tool_name().to_string();
    tokio::select! {
        result = handler.execute(executor, settings, target) => result.map(|_| ()),
        () = interrupted() => {
            warn!("Interrupted, stopping {}", tool);
            Err(NativeToolError::cancelled(tool))
        }
    }
}

async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        warn!("Ctrl-C handler unavailable; invocation cannot be interrupted");
        std::future::pending::<()>().await;
    }
}

/// Renders a command line for display. Environment values are hidden.
pub fn render_command_line(args: &InvocationArgs) -> String {
    let mut parts: Vec<String> = args
        .env()
        .map(|(name, _)| format!("{}=<hidden>", name))
        .collect();
    parts.extend(args.args().iter().map(|arg| shell_quote(arg)));
    if let Some(input) = args.stdin_file() {
        parts.push(format!("< {}", shell_quote(&input.display().to_string())));
    }
    parts.join(" ")
}

fn shell_quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_=./:@%+,".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}
