//! Command dispatch and handlers.

pub mod report;

use std::io::{self, Write};
use std::path::PathBuf;

use tracing::debug;

use crate::cli::Cli;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::AppError;

/// Resolve configuration for the parsed flags and run the report.
///
/// `env` looks up configuration environment variables; the current directory
/// seeds the default repository root. The root is validated before the
/// config file inside it is read.
///
/// # Errors
///
/// Returns an error if the root is invalid, configuration fails, or the
/// report cannot run.
pub fn dispatch(
    cli: &Cli,
    ctx: &ServiceContext,
    env: impl Fn(&str) -> Option<String>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), AppError> {
    let root = Config::resolve_root(cli, &env, || default_root(ctx, std::env::current_dir()));
    report::validate_root(ctx, &root)?;
    let config = Config::resolve(cli, env, ctx.fs.as_ref(), &root)?;
    report::run(ctx, &config, out, err)
}

/// The working copy enclosing `cwd`, or `cwd` itself when it is not inside
/// one. An unreadable current directory falls back to `.`.
fn default_root(ctx: &ServiceContext, cwd: io::Result<PathBuf>) -> PathBuf {
    let cwd = cwd.unwrap_or_else(|e| {
        debug!(error = %e, "current directory unavailable; using '.'");
        PathBuf::from(".")
    });
    ctx.git.top_level(&cwd).unwrap_or(cwd)
}
