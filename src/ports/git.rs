//! Version-control port for working-tree status queries.

use std::path::{Path, PathBuf};

/// Result type shared by the port traits.
pub type PortResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// One entry of `git status --porcelain` output.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ChangedFile {
    /// The two-character XY status code (e.g. `??`, ` M`, `A `).
    pub code: String,
    /// Path relative to the repository root. Renames keep `old -> new`.
    pub path: String,
}

impl ChangedFile {
    /// Parses a single porcelain v1 line. Returns `None` for lines too short
    /// to carry a status code and a path.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        if line.len() < 4 || !line.is_char_boundary(2) || !line.is_char_boundary(3) {
            return None;
        }
        let (code, rest) = line.split_at(2);
        let path = rest.strip_prefix(' ')?;
        if path.is_empty() {
            return None;
        }
        Some(Self { code: code.to_string(), path: path.to_string() })
    }
}

impl std::fmt::Display for ChangedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.code, self.path)
    }
}

/// One entry of `git diff --name-status` output.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct NameStatus {
    /// Status letter, possibly with a similarity score (e.g. `M`, `R100`).
    pub status: String,
    /// Tab-separated path(s) following the status.
    pub path: String,
}

impl NameStatus {
    /// Parses a single tab-separated name-status line.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let (status, path) = line.split_once('\t')?;
        if status.is_empty() || path.is_empty() {
            return None;
        }
        Some(Self { status: status.to_string(), path: path.to_string() })
    }
}

impl std::fmt::Display for NameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\t{}", self.status, self.path)
    }
}

/// Returns `true` if `rev` would be read by git as an option rather than a
/// revision. Such values are never passed to git.
#[must_use]
pub fn is_option_like(rev: &str) -> bool {
    rev.starts_with('-')
}

/// Answers working-tree questions about a repository.
///
/// Reporting logic only talks to this trait so that it can be exercised
/// against in-memory fixtures instead of a real repository.
pub trait StatusProvider: Send + Sync {
    /// Returns the top-level directory of the working copy containing `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` is not inside a working copy.
    fn top_level(&self, root: &Path) -> PortResult<PathBuf>;

    /// Lists uncommitted changes under `path` (relative to `root`), with
    /// untracked files listed individually.
    ///
    /// # Errors
    ///
    /// Returns an error if the status query fails.
    fn changed_files(&self, root: &Path, path: &str) -> PortResult<Vec<ChangedFile>>;

    /// Lists name-status differences between `rev` and the working tree,
    /// restricted to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the revision is unknown, looks like an option,
    /// or the diff fails.
    fn diff_name_status(&self, root: &Path, path: &str, rev: &str)
        -> PortResult<Vec<NameStatus>>;

    /// Returns `true` if `root` is inside a working copy.
    fn is_repository(&self, root: &Path) -> bool {
        self.top_level(root).is_ok()
    }
}
