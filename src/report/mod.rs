//! Report model and collection.
//!
//! Collection runs every query up front and produces a [`Report`]; rendering
//! it as text or JSON is a separate, pure step (see [`render`]).

pub mod drift;
pub mod links;
pub mod render;
pub mod status;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

pub use drift::{AreaDrift, DriftCounts, DriftOutcome};

use crate::config::Config;
use crate::context::ServiceContext;
use crate::ports::git::{ChangedFile, NameStatus};

/// Working-tree status of one area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaReport {
    /// Trimmed area name.
    pub name: String,
    /// Whether `<root>/<name>` is a directory.
    pub present: bool,
    /// Uncommitted changes under the area.
    pub changes: Vec<ChangedFile>,
    /// Number of entries in `changes`.
    pub count: usize,
    /// Name-status diff since the configured revision, if one was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<Vec<NameStatus>>,
    /// Set when the status query failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_error: Option<String>,
}

impl AreaReport {
    /// A report for an area whose directory does not exist.
    #[must_use]
    pub fn missing(name: String) -> Self {
        Self { name, present: false, changes: Vec::new(), count: 0, diff: None, status_error: None }
    }

    /// A report for an existing area, with no changes recorded yet.
    #[must_use]
    pub fn present(name: String) -> Self {
        Self { present: true, ..Self::missing(name) }
    }

    /// Records the changed files and keeps `count` in step.
    pub fn set_changes(&mut self, changes: Vec<ChangedFile>) {
        self.count = changes.len();
        self.changes = changes;
    }
}

/// Drift comparison against a second root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriftSection {
    /// The root compared against.
    pub drift_root: PathBuf,
    /// Whether the drift root is a git working copy.
    pub is_repository: bool,
    /// Per-area outcomes in configured order.
    pub areas: Vec<AreaDrift>,
}

/// Everything one run found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// When the report was collected.
    pub generated_at: DateTime<Utc>,
    /// Repository that was scanned.
    pub repo_root: PathBuf,
    /// Revision diffs were taken against.
    pub since: Option<String>,
    /// Always `true`.
    pub dry_run: bool,
    /// Per-area status in configured order.
    pub areas: Vec<AreaReport>,
    /// Sum of per-area counts.
    pub total: usize,
    /// README cross-links that are expected but absent.
    pub missing_links: Vec<String>,
    /// Present only when a drift root was configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drift: Option<DriftSection>,
    /// Non-fatal problems, also printed to stderr.
    pub warnings: Vec<String>,
}

/// Collects a full report. The repository root must already be validated.
#[must_use]
pub fn collect(ctx: &ServiceContext, config: &Config) -> Report {
    let root = &config.repo_root;
    let mut warnings = Vec::new();

    let areas = status::collect_areas(
        ctx.git.as_ref(),
        ctx.fs.as_ref(),
        root,
        &config.areas,
        config.since.as_deref(),
        &mut warnings,
    );
    let total = status::total_changes(&areas);

    let missing_links = links::check_readme(ctx.fs.as_ref(), root, &config.readme_links);
    if !missing_links.is_empty() {
        let message = links::format_missing_links(&missing_links);
        warn!("{message}");
        warnings.push(message);
    }

    let drift = config.drift_root.as_ref().map(|drift_root| {
        let is_repository = ctx.git.is_repository(drift_root);
        if !is_repository {
            let message = format!(
                "drift-root is not a git repository: {} (continuing)",
                drift_root.display()
            );
            warn!("{message}");
            warnings.push(message);
        }
        let areas =
            drift::compare_areas(ctx.fs.as_ref(), root, drift_root, &config.areas, &mut warnings);
        DriftSection { drift_root: drift_root.clone(), is_repository, areas }
    });

    Report {
        generated_at: ctx.clock.now(),
        repo_root: root.clone(),
        since: config.since.clone(),
        dry_run: config.dry_run,
        areas,
        total,
        missing_links,
        drift,
        warnings,
    }
}
