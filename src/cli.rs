//! CLI argument definitions.

use std::path::PathBuf;

use clap::Parser;

use crate::config::OutputFormat;

/// Top-level CLI parser for `area-status`.
#[derive(Debug, Parser)]
#[command(
    name = "area-status",
    version,
    about = "Summarize uncommitted changes and drift across repository areas",
    long_about = "Prints working-tree changes for each named top-level directory (area) of a \
    git repository, optionally the name-status diff since a revision, and optionally a \
    file-presence/hash drift comparison against a second checkout. Never modifies either \
    repository.",
    after_help = "Exit codes: 0 success, 1 invalid or non-git repo root, 2 usage error."
)]
pub struct Cli {
    /// Repository to scan. Defaults to the repository enclosing the current directory.
    #[arg(long, value_name = "PATH")]
    pub repo_root: Option<PathBuf>,

    /// Also show the name-status diff of each area since this revision.
    #[arg(long, value_name = "REV")]
    pub since: Option<String>,

    /// Comma-separated list of areas to report, in order [default: prompts,workflows,scripts].
    #[arg(long, value_name = "CSV")]
    pub areas: Option<String>,

    /// Second checkout to compare area file sets and contents against.
    #[arg(long, value_name = "PATH")]
    pub drift_root: Option<PathBuf>,

    /// Accepted for explicitness; the tool never writes to either repository.
    #[arg(long)]
    pub dry_run: bool,

    /// Output rendering.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}
