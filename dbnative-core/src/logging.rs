//! Logging setup for dbnative.
//!
//! Diagnostics go to stderr. Stdout belongs to the tools and to `--dry-run`
//! output, so a rendered command line can be piped without log noise.
//! `DBNATIVE_LOG` takes `tracing` filter directives and applies only when
//! no verbosity flag was given.

use tracing_subscriber::EnvFilter;

use crate::Result;

/// Environment variable holding filter directives
pub const LOG_ENV: &str = "DBNATIVE_LOG";

/// Maps CLI verbosity flags to a tracing level.
///
/// `quiet` wins over any verbosity; otherwise 0 = INFO, 1 = DEBUG, 2+ = TRACE.
pub const fn level_for(verbose: u8, quiet: bool) -> tracing::Level {
    match (quiet, verbose) {
        (true, _) => tracing::Level::ERROR,
        (false, 0) => tracing::Level::INFO,
        (false, 1) => tracing::Level::DEBUG,
        (false, _) => tracing::Level::TRACE,
    }
}

/// Picks the filter directives: explicit flags beat `DBNATIVE_LOG`.
fn filter_directives(verbose: u8, quiet: bool, from_env: Option<String>) -> String {
    match from_env {
        Some(directives) if !quiet && verbose == 0 && !directives.trim().is_empty() => directives,
        _ => level_for(verbose, quiet).as_str().to_ascii_lowercase(),
    }
}

/// Initializes structured logging based on verbosity level.
///
/// # Example
/// ```rust,no_run
/// use dbnative_core::logging::init_logging;
///
/// init_logging(1, false).expect("Failed to initialize logging");
/// ```
pub fn init_logging(verbose: u8, quiet: bool) -> Result<()> {
    let directives = filter_directives(verbose, quiet, std::env::var(LOG_ENV).ok());
    let filter = EnvFilter::try_new(&directives).map_err(|e| {
        crate::error::NativeToolError::configuration(format!(
            "Invalid {} directives: {}",
            LOG_ENV, e
        ))
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init()
        .map_err(|e| {
            crate::error::NativeToolError::configuration(format!(
                "Failed to initialize logging: {}",
                e
            ))
        })?;

    Ok(())
}
