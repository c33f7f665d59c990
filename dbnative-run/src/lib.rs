//! Library module for dbnative-run
//!
//! Exposes the CLI definition, configuration resolution, tool delegates and
//! the tokio process executor for testing. The binary entry point is main.rs.

pub mod app;
pub mod cli;
pub mod config;
pub mod executor;
pub mod tools;

pub use app::{render_command_line, run, run_tool};
pub use cli::Cli;
pub use executor::TokioProcessExecutor;
