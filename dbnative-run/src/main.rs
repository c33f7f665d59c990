//! MySQL native tool runner.
//!
//! Runs `mysqldump` and `mysql` against a configured connection while
//! keeping passwords out of argument lists and process listings.
//!
//! # Security Guarantees
//! - Passwords are passed through a private option file or MYSQL_PWD
//! - Credential files are deleted on success, failure and Ctrl-C
//! - Connection URLs are redacted in logs

use clap::Parser;
use dbnative_core::init_logging;
use dbnative_run::{Cli, run};
use tracing::error;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.global.verbose, cli.global.quiet)?;

    run(&cli).await.map_err(|e| {
        error!("{}", e);
        e
    })?;

    Ok(())
}
