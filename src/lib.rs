//! Core library entry for the `area-status` CLI.
//!
//! Reports uncommitted changes per top-level area of a git repository,
//! optionally with name-status diffs since a revision and a drift comparison
//! against a second checkout. Nothing is ever written to either repository.

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod ports;
pub mod report;

use std::io::Write;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

pub use error::AppError;

use crate::context::ServiceContext;

/// Run the CLI with the provided arguments against live adapters and the
/// process environment.
///
/// # Errors
///
/// Returns an [`AppError`] whose [`AppError::exit_code`] is the process exit
/// status.
pub fn run<I, T>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> Result<(), AppError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    run_with_context(args, &ServiceContext::live(), |key| std::env::var(key).ok(), out, err)
}

/// Run the CLI with explicit adapters and environment lookup.
///
/// `--help` and `--version` are written to `out` and succeed; any other
/// argument error becomes [`AppError::Usage`] carrying the full help text.
///
/// # Errors
///
/// Returns an [`AppError`] for usage errors, invalid roots, or write failures.
pub fn run_with_context<I, T>(
    args: I,
    ctx: &ServiceContext,
    env: impl Fn(&str) -> Option<String>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), AppError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            write!(out, "{}", e.render())?;
            return Ok(());
        }
        Err(e) => {
            let help = cli::Cli::command().render_help();
            return Err(AppError::Usage(format!("{}\n{help}", e.render())));
        }
    };
    commands::dispatch(&cli, ctx, env, out, err)
}
