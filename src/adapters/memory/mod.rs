//! In-memory adapters for exercising the reporter without disk or `git`.
//!
//! These stand in for the live adapters in unit tests and in any caller that
//! wants a deterministic report from a synthetic tree.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;
use crate::ports::git::{ChangedFile, NameStatus, PortResult, StatusProvider};

/// A filesystem made of absolute paths mapped to file contents.
///
/// Directories exist implicitly for every ancestor of a file, plus any added
/// with [`MemoryFileSystem::with_dir`].
#[derive(Debug, Default, Clone)]
pub struct MemoryFileSystem {
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
}

impl MemoryFileSystem {
    /// Creates an empty filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file with the given contents.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl AsRef<[u8]>) -> Self {
        let path = path.into();
        for ancestor in path.ancestors().skip(1) {
            self.dirs.insert(ancestor.to_path_buf());
        }
        self.files.insert(path, contents.as_ref().to_vec());
        self
    }

    /// Adds an empty directory.
    #[must_use]
    pub fn with_dir(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        for ancestor in path.ancestors() {
            self.dirs.insert(ancestor.to_path_buf());
        }
        self
    }

    fn contents(&self, path: &Path) -> PortResult<&[u8]> {
        self.files
            .get(path)
            .map(Vec::as_slice)
            .ok_or_else(|| format!("no such file: {}", path.display()).into())
    }
}

impl FileSystem for MemoryFileSystem {
    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn read_to_string(&self, path: &Path) -> PortResult<String> {
        Ok(String::from_utf8_lossy(self.contents(path)?).into_owned())
    }

    fn list_files(&self, dir: &Path) -> PortResult<Vec<String>> {
        let mut files: Vec<String> = self
            .files
            .keys()
            .filter_map(|p| p.strip_prefix(dir).ok())
            .map(|rel| {
                rel.components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/")
            })
            .collect();
        files.sort_unstable_by(|a, b| a.as_bytes().cmp(b.as_bytes()));
        Ok(files)
    }

    fn hash_file(&self, path: &Path) -> PortResult<String> {
        Ok(hex::encode(Sha256::digest(self.contents(path)?)))
    }
}

/// A status provider answering from canned data.
#[derive(Debug, Default, Clone)]
pub struct FixedStatusProvider {
    repositories: BTreeSet<PathBuf>,
    changes: HashMap<(PathBuf, String), Vec<ChangedFile>>,
    diffs: HashMap<(PathBuf, String, String), Vec<NameStatus>>,
    failing_status: BTreeSet<(PathBuf, String)>,
}

impl FixedStatusProvider {
    /// Creates a provider that knows no repositories.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `root` as a working copy.
    #[must_use]
    pub fn with_repository(mut self, root: impl Into<PathBuf>) -> Self {
        self.repositories.insert(root.into());
        self
    }

    /// Sets the porcelain status lines reported for `area` under `root`.
    ///
    /// Lines that do not parse as porcelain entries are ignored.
    #[must_use]
    pub fn with_changes(mut self, root: impl Into<PathBuf>, area: &str, lines: &[&str]) -> Self {
        let entries = lines.iter().filter_map(|l| ChangedFile::parse(l)).collect();
        self.changes.insert((root.into(), area.to_string()), entries);
        self
    }

    /// Sets the name-status lines reported for `area` since `rev`. Revisions
    /// without an entry fail like an unknown revision would.
    #[must_use]
    pub fn with_diff(
        mut self,
        root: impl Into<PathBuf>,
        area: &str,
        rev: &str,
        lines: &[&str],
    ) -> Self {
        let entries = lines.iter().filter_map(|l| NameStatus::parse(l)).collect();
        self.diffs.insert((root.into(), area.to_string(), rev.to_string()), entries);
        self
    }

    /// Makes the status query for `area` fail.
    #[must_use]
    pub fn with_failing_status(mut self, root: impl Into<PathBuf>, area: &str) -> Self {
        self.failing_status.insert((root.into(), area.to_string()));
        self
    }
}

impl StatusProvider for FixedStatusProvider {
    fn top_level(&self, root: &Path) -> PortResult<PathBuf> {
        if self.repositories.contains(root) {
            Ok(root.to_path_buf())
        } else {
            Err(format!("not a git repository: {}", root.display()).into())
        }
    }

    fn changed_files(&self, root: &Path, path: &str) -> PortResult<Vec<ChangedFile>> {
        let key = (root.to_path_buf(), path.to_string());
        if self.failing_status.contains(&key) {
            return Err(format!("status failed for {path}").into());
        }
        Ok(self.changes.get(&key).cloned().unwrap_or_default())
    }

    fn diff_name_status(
        &self,
        root: &Path,
        path: &str,
        rev: &str,
    ) -> PortResult<Vec<NameStatus>> {
        self.diffs
            .get(&(root.to_path_buf(), path.to_string(), rev.to_string()))
            .cloned()
            .ok_or_else(|| format!("bad revision '{rev}'").into())
    }
}

/// A clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directories_exist_for_file_ancestors() {
        let fs = MemoryFileSystem::new().with_file("/r/scripts/deep/a.sh", "x");
        assert!(fs.is_dir(Path::new("/r/scripts")));
        assert!(fs.is_dir(Path::new("/r/scripts/deep")));
        assert!(fs.is_file(Path::new("/r/scripts/deep/a.sh")));
        assert!(!fs.is_dir(Path::new("/r/prompts")));
    }

    #[test]
    fn list_files_is_relative_and_scoped() {
        let fs = MemoryFileSystem::new()
            .with_file("/r/scripts/b.sh", "b")
            .with_file("/r/scripts/a/x.sh", "x")
            .with_file("/r/scriptsx/other.sh", "o");
        let files = fs.list_files(Path::new("/r/scripts")).unwrap();
        assert_eq!(files, vec!["a/x.sh", "b.sh"]);
    }

    #[test]
    fn unknown_revision_fails() {
        let git = FixedStatusProvider::new().with_repository("/r");
        assert!(git.diff_name_status(Path::new("/r"), "scripts", "nope").is_err());
    }
}
