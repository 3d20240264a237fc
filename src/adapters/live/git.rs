//! Live status provider using `git` CLI commands.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::ports::git::{is_option_like, ChangedFile, NameStatus, PortResult, StatusProvider};

/// Live status provider that shells out to the `git` CLI.
pub struct LiveStatusProvider;

impl LiveStatusProvider {
    /// Runs `git -C <root> <args>` and returns stdout, failing on a non-zero
    /// exit status. Repository overrides inherited from the environment are
    /// cleared so that `-C` decides which repository is read.
    fn git(root: &Path, args: &[&str]) -> PortResult<String> {
        debug!(root = %root.display(), ?args, "running git");
        let output = Command::new("git")
            .arg("-C")
            .arg(root)
            .args(args)
            .env_remove("GIT_DIR")
            .env_remove("GIT_WORK_TREE")
            .env_remove("GIT_INDEX_FILE")
            .output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!("git {} failed: {}", args.join(" "), stderr.trim()).into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl StatusProvider for LiveStatusProvider {
    fn top_level(&self, root: &Path) -> PortResult<PathBuf> {
        let stdout = Self::git(root, &["rev-parse", "--show-toplevel"])?;
        let top = stdout.trim();
        if top.is_empty() {
            return Err(format!("{} is not inside a git working copy", root.display()).into());
        }
        Ok(PathBuf::from(top))
    }

    fn changed_files(&self, root: &Path, path: &str) -> PortResult<Vec<ChangedFile>> {
        let stdout =
            Self::git(root, &["status", "--porcelain", "--untracked-files=all", "--", path])?;
        Ok(stdout.lines().filter_map(ChangedFile::parse).collect())
    }

    fn diff_name_status(
        &self,
        root: &Path,
        path: &str,
        rev: &str,
    ) -> PortResult<Vec<NameStatus>> {
        if is_option_like(rev) {
            return Err(format!("refusing option-like revision '{rev}'").into());
        }
        let stdout =
            Self::git(root, &["diff", "--name-status", "--end-of-options", rev, "--", path])?;
        Ok(stdout.lines().filter_map(NameStatus::parse).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_level_fails_outside_a_repository() {
        let dir = assert_fs::TempDir::new().unwrap();
        // Skip quietly if the temp dir happens to live inside a working copy.
        let inside = Command::new("git").arg("-C").arg(dir.path()).arg("rev-parse").output();
        if inside.is_ok_and(|o| o.status.success()) {
            return;
        }
        assert!(!LiveStatusProvider.is_repository(dir.path()));
    }

    #[test]
    fn missing_directory_is_not_a_repository() {
        let provider = LiveStatusProvider;
        assert!(provider.top_level(Path::new("/nonexistent/area-status/root")).is_err());
    }

    #[test]
    fn option_like_revision_fails_without_running_git() {
        let dir = assert_fs::TempDir::new().unwrap();
        let target = dir.path().join("written");
        let rev = format!("--output={}", target.display());
        let result = LiveStatusProvider.diff_name_status(dir.path(), "scripts", &rev);
        assert!(result.is_err());
        assert!(!target.exists());
    }
}
