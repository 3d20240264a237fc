//! Drift detection: compares area file sets and contents between two roots.

use std::collections::BTreeSet;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use super::status::area_dir;
use crate::ports::filesystem::FileSystem;

/// File-level differences for one area present in at least one root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DriftCounts {
    /// Files under the area only in the primary root.
    pub only_in_repo: usize,
    /// Files under the area only in the drift root.
    pub only_in_drift_root: usize,
    /// Files present in both whose contents hash differently.
    pub hash_diffs: usize,
}

/// Drift outcome for one area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DriftOutcome {
    /// Neither root has the area directory.
    MissingInBoth,
    /// At least one root has it; counts were computed.
    Compared(DriftCounts),
}

/// Drift for a single area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaDrift {
    /// Area name.
    pub area: String,
    /// What was found.
    #[serde(flatten)]
    pub outcome: DriftOutcome,
}

/// Compares one area between `repo_root` and `drift_root`.
///
/// Listing or hashing failures are pushed to `warnings`; an unlistable side
/// counts as empty and an unhashable common file counts as a difference.
pub fn compare_area(
    fs: &dyn FileSystem,
    repo_root: &Path,
    drift_root: &Path,
    area: &str,
    warnings: &mut Vec<String>,
) -> AreaDrift {
    let area = area.trim().to_string();
    let (Some(repo_dir), Some(drift_dir)) =
        (area_dir(repo_root, &area), area_dir(drift_root, &area))
    else {
        return AreaDrift { area, outcome: DriftOutcome::MissingInBoth };
    };
    if !fs.is_dir(&repo_dir) && !fs.is_dir(&drift_dir) {
        return AreaDrift { area, outcome: DriftOutcome::MissingInBoth };
    }

    let repo_files = list_or_warn(fs, &repo_dir, warnings);
    let drift_files = list_or_warn(fs, &drift_dir, warnings);

    let only_in_repo = repo_files.difference(&drift_files).count();
    let only_in_drift_root = drift_files.difference(&repo_files).count();
    let hash_diffs = repo_files
        .intersection(&drift_files)
        .filter(|rel| !same_contents(fs, &repo_dir.join(rel), &drift_dir.join(rel), warnings))
        .count();

    let counts = DriftCounts { only_in_repo, only_in_drift_root, hash_diffs };
    debug!(%area, ?counts, "area drift computed");
    AreaDrift { area, outcome: DriftOutcome::Compared(counts) }
}

/// Compares every area in order.
pub fn compare_areas(
    fs: &dyn FileSystem,
    repo_root: &Path,
    drift_root: &Path,
    areas: &[String],
    warnings: &mut Vec<String>,
) -> Vec<AreaDrift> {
    areas.iter().map(|area| compare_area(fs, repo_root, drift_root, area, warnings)).collect()
}

fn list_or_warn(fs: &dyn FileSystem, dir: &Path, warnings: &mut Vec<String>) -> BTreeSet<String> {
    match fs.list_files(dir) {
        Ok(files) => files.into_iter().collect(),
        Err(e) => {
            let message = format!("could not list {}: {e}", dir.display());
            warn!("{message}");
            warnings.push(message);
            BTreeSet::new()
        }
    }
}

fn same_contents(fs: &dyn FileSystem, a: &Path, b: &Path, warnings: &mut Vec<String>) -> bool {
    match (fs.hash_file(a), fs.hash_file(b)) {
        (Ok(left), Ok(right)) => left == right,
        (Err(e), _) | (_, Err(e)) => {
            let message = format!("could not hash {} or {}: {e}", a.display(), b.display());
            warn!("{message}");
            warnings.push(message);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryFileSystem;

    fn two_roots() -> MemoryFileSystem {
        MemoryFileSystem::new()
            .with_file("/repo/scripts/same.sh", "echo same")
            .with_file("/repo/scripts/changed.sh", "echo one")
            .with_file("/repo/scripts/only-repo.sh", "x")
            .with_file("/repo/scripts/nested/deep.sh", "deep")
            .with_file("/mirror/scripts/same.sh", "echo same")
            .with_file("/mirror/scripts/changed.sh", "echo two")
            .with_file("/mirror/scripts/only-mirror.sh", "y")
            .with_file("/mirror/scripts/nested/deep.sh", "deep")
            .with_file("/mirror/scripts/nested/extra.sh", "z")
    }

    #[test]
    fn counts_presence_and_content_differences() {
        let fs = two_roots();
        let mut warnings = Vec::new();
        let drift =
            compare_area(&fs, Path::new("/repo"), Path::new("/mirror"), "scripts", &mut warnings);
        assert_eq!(
            drift.outcome,
            DriftOutcome::Compared(DriftCounts {
                only_in_repo: 1,
                only_in_drift_root: 2,
                hash_diffs: 1,
            })
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn swapping_roots_swaps_only_counts() {
        let fs = two_roots();
        let mut warnings = Vec::new();
        let forward =
            compare_area(&fs, Path::new("/repo"), Path::new("/mirror"), "scripts", &mut warnings);
        let backward =
            compare_area(&fs, Path::new("/mirror"), Path::new("/repo"), "scripts", &mut warnings);
        let (DriftOutcome::Compared(f), DriftOutcome::Compared(b)) =
            (forward.outcome, backward.outcome)
        else {
            panic!("both directions should compare");
        };
        assert_eq!(f.only_in_repo, b.only_in_drift_root);
        assert_eq!(f.only_in_drift_root, b.only_in_repo);
        assert_eq!(f.hash_diffs, b.hash_diffs);
    }

    #[test]
    fn area_missing_in_both_roots() {
        let fs = two_roots();
        let mut warnings = Vec::new();
        let drift =
            compare_area(&fs, Path::new("/repo"), Path::new("/mirror"), "prompts", &mut warnings);
        assert_eq!(drift.outcome, DriftOutcome::MissingInBoth);
    }

    #[test]
    fn area_present_on_one_side_counts_everything_as_only() {
        let fs = MemoryFileSystem::new()
            .with_file("/repo/workflows/a.yml", "a")
            .with_file("/repo/workflows/b.yml", "b")
            .with_dir("/mirror");
        let mut warnings = Vec::new();
        let drift =
            compare_area(&fs, Path::new("/repo"), Path::new("/mirror"), "workflows", &mut warnings);
        assert_eq!(
            drift.outcome,
            DriftOutcome::Compared(DriftCounts {
                only_in_repo: 2,
                only_in_drift_root: 0,
                hash_diffs: 0,
            })
        );
    }

    #[test]
    fn identical_trees_have_no_drift() {
        let fs = MemoryFileSystem::new()
            .with_file("/repo/prompts/a.md", "a")
            .with_file("/mirror/prompts/a.md", "a");
        let mut warnings = Vec::new();
        let drift =
            compare_area(&fs, Path::new("/repo"), Path::new("/mirror"), "prompts", &mut warnings);
        assert_eq!(drift.outcome, DriftOutcome::Compared(DriftCounts::default()));
    }

    #[test]
    fn blank_area_is_missing_in_both() {
        let fs = two_roots();
        let mut warnings = Vec::new();
        let drift = compare_area(&fs, Path::new("/repo"), Path::new("/mirror"), " ", &mut warnings);
        assert_eq!(drift.outcome, DriftOutcome::MissingInBoth);
    }
}
