//! Per-area working-tree status.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::AreaReport;
use crate::ports::filesystem::FileSystem;
use crate::ports::git::{is_option_like, StatusProvider};

/// Resolves `<root>/<area>`; `None` for a blank area name so that it reports
/// as missing instead of aliasing the root itself.
#[must_use]
pub fn area_dir(root: &Path, area: &str) -> Option<PathBuf> {
    let area = area.trim();
    if area.is_empty() {
        return None;
    }
    Some(root.join(area))
}

/// Builds the report for a single area.
///
/// Status and diff failures never abort: a failing status query is recorded
/// on the report and pushed to `warnings`, a failing diff is treated as empty.
/// A revision starting with `-` counts as a failed diff and is never run.
pub fn collect_area(
    git: &dyn StatusProvider,
    fs: &dyn FileSystem,
    root: &Path,
    area: &str,
    since: Option<&str>,
    warnings: &mut Vec<String>,
) -> AreaReport {
    let name = area.trim().to_string();
    let present = area_dir(root, &name).is_some_and(|dir| fs.is_dir(&dir));
    if !present {
        debug!(area = %name, "area missing");
        return AreaReport::missing(name);
    }

    let mut report = AreaReport::present(name);
    match git.changed_files(root, &report.name) {
        Ok(changes) => report.set_changes(changes),
        Err(e) => {
            let message = format!("status failed for {}/: {e}", report.name);
            warn!("{message}");
            warnings.push(message.clone());
            report.status_error = Some(message);
        }
    }

    if let Some(rev) = since {
        let diff = if is_option_like(rev) {
            debug!(area = %report.name, rev, "revision looks like an option; skipping diff");
            Vec::new()
        } else {
            git.diff_name_status(root, &report.name, rev).unwrap_or_else(|e| {
                debug!(area = %report.name, rev, error = %e, "diff failed; treating as empty");
                Vec::new()
            })
        };
        report.diff = Some(diff);
    }

    debug!(area = %report.name, count = report.count, "area collected");
    report
}

/// Collects every configured area in order.
pub fn collect_areas(
    git: &dyn StatusProvider,
    fs: &dyn FileSystem,
    root: &Path,
    areas: &[String],
    since: Option<&str>,
    warnings: &mut Vec<String>,
) -> Vec<AreaReport> {
    areas.iter().map(|area| collect_area(git, fs, root, area, since, warnings)).collect()
}

/// Sum of per-area change counts.
#[must_use]
pub fn total_changes(reports: &[AreaReport]) -> usize {
    reports.iter().fold(0, |acc, r| acc + r.count)
}
