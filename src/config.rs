//! Run configuration and its resolution.
//!
//! Each field is taken from the first source that provides it:
//!
//! 1. command-line flag
//! 2. environment variable (`AREA_STATUS_*`, `.env` honoured)
//! 3. `.area-status.yaml` in the repository root
//! 4. built-in default

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::cli::Cli;
use crate::error::AppError;
use crate::ports::filesystem::FileSystem;

/// Areas reported when none are configured.
pub const DEFAULT_AREAS: &[&str] = &["prompts", "workflows", "scripts"];

/// Links a mirror-flavoured README is expected to carry.
pub const DEFAULT_README_LINKS: &[&str] = &["START-HERE.md", "../../README.md", "SYNC-NOTES.md"];

/// Name of the optional per-repository config file.
pub const CONFIG_FILE_NAME: &str = ".area-status.yaml";

/// Environment variable overriding the repository root.
pub const ENV_REPO_ROOT: &str = "AREA_STATUS_REPO_ROOT";
/// Environment variable overriding the area list (CSV).
pub const ENV_AREAS: &str = "AREA_STATUS_AREAS";
/// Environment variable overriding the drift root.
pub const ENV_DRIFT_ROOT: &str = "AREA_STATUS_DRIFT_ROOT";
/// Environment variable overriding the since-revision.
pub const ENV_SINCE: &str = "AREA_STATUS_SINCE";

/// How the report is rendered on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// A single JSON document.
    Json,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Repository to scan.
    pub repo_root: PathBuf,
    /// Revision to diff each area against.
    pub since: Option<String>,
    /// Areas in report order, trimmed.
    pub areas: Vec<String>,
    /// Second checkout for drift comparison.
    pub drift_root: Option<PathBuf>,
    /// Always `true`; the reporter never writes.
    pub dry_run: bool,
    /// Output rendering.
    pub format: OutputFormat,
    /// Literal links the README heuristic looks for.
    pub readme_links: Vec<String>,
}

impl Config {
    /// A config for `repo_root` with every other field at its default.
    #[must_use]
    pub fn for_root(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
            since: None,
            areas: DEFAULT_AREAS.iter().map(ToString::to_string).collect(),
            drift_root: None,
            dry_run: true,
            format: OutputFormat::Text,
            readme_links: DEFAULT_README_LINKS.iter().map(ToString::to_string).collect(),
        }
    }

    /// Picks the repository root: flag, then environment, then
    /// `default_root`, which is only called when neither names one.
    #[must_use]
    pub fn resolve_root(
        cli: &Cli,
        env: impl Fn(&str) -> Option<String>,
        default_root: impl FnOnce() -> PathBuf,
    ) -> PathBuf {
        cli.repo_root
            .clone()
            .or_else(|| non_empty(env(ENV_REPO_ROOT)).map(PathBuf::from))
            .unwrap_or_else(default_root)
    }

    /// Resolves the remaining fields for an already validated `repo_root`
    /// from parsed flags, an environment lookup, and the optional config file
    /// found through `fs`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] if the config file exists but cannot be
    /// read or parsed.
    pub fn resolve(
        cli: &Cli,
        env: impl Fn(&str) -> Option<String>,
        fs: &dyn FileSystem,
        repo_root: &Path,
    ) -> Result<Self, AppError> {
        let file = ConfigFile::load(fs, repo_root)?.unwrap_or_default();
        let mut config = Self::for_root(repo_root);

        if let Some(csv) = cli.areas.clone().or_else(|| non_empty(env(ENV_AREAS))) {
            config.areas = parse_areas(&csv);
        } else if let Some(areas) = file.areas {
            config.areas = areas.iter().map(|a| a.trim().to_string()).collect();
        }

        config.since = cli.since.clone().or_else(|| non_empty(env(ENV_SINCE))).or(file.since);

        config.drift_root = cli
            .drift_root
            .clone()
            .or_else(|| non_empty(env(ENV_DRIFT_ROOT)).map(PathBuf::from))
            .or_else(|| file.drift_root.map(|p| repo_root.join(p)));

        if let Some(links) = file.readme_links {
            config.readme_links = links;
        }

        config.format = cli.format;
        debug!(?config, "resolved configuration");
        Ok(config)
    }
}

/// Splits a comma-separated area list, trimming each entry. Order and
/// duplicates are preserved.
#[must_use]
pub fn parse_areas(csv: &str) -> Vec<String> {
    csv.split(',').map(|a| a.trim().to_string()).collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// On-disk shape of `.area-status.yaml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    areas: Option<Vec<String>>,
    since: Option<String>,
    drift_root: Option<PathBuf>,
    readme_links: Option<Vec<String>>,
}

impl ConfigFile {
    fn load(fs: &dyn FileSystem, repo_root: &Path) -> Result<Option<Self>, AppError> {
        let path = repo_root.join(CONFIG_FILE_NAME);
        if !fs.is_file(&path) {
            return Ok(None);
        }
        let contents = fs
            .read_to_string(&path)
            .map_err(|e| AppError::Config { path: path.clone(), message: e.to_string() })?;
        if contents.trim().is_empty() {
            return Ok(None);
        }
        serde_yaml::from_str(&contents)
            .map(Some)
            .map_err(|e| AppError::Config { path, message: e.to_string() })
    }
}
