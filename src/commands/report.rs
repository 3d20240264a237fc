//! The area report command.

use std::io::Write;
use std::path::Path;

use tracing::{debug, info};

use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::AppError;
use crate::report::{self, render};

/// Validate the root, collect the report, print it to `out` and warnings to
/// `err`.
///
/// # Errors
///
/// Returns [`AppError::InvalidRoot`] or [`AppError::NotARepository`] before
/// anything is printed, or [`AppError::Io`] if writing fails.
pub fn run(
    ctx: &ServiceContext,
    config: &Config,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), AppError> {
    validate_root(ctx, &config.repo_root)?;
    info!(root = %config.repo_root.display(), areas = config.areas.len(), "collecting report");

    let report = report::collect(ctx, config);
    render::write_report(&report, config.format, out)?;
    for warning in &report.warnings {
        writeln!(err, "warning: {warning}")?;
    }
    Ok(())
}

/// Checks that `root` is an existing directory inside a git working copy.
///
/// # Errors
///
/// Returns [`AppError::InvalidRoot`] for a missing directory and
/// [`AppError::NotARepository`] when git does not recognise it.
pub fn validate_root(ctx: &ServiceContext, root: &Path) -> Result<(), AppError> {
    if !ctx.fs.is_dir(root) {
        return Err(AppError::InvalidRoot(root.to_path_buf()));
    }
    match ctx.git.top_level(root) {
        Ok(top) => {
            debug!(top = %top.display(), "repository root validated");
            Ok(())
        }
        Err(e) => {
            debug!(error = %e, "top-level query failed");
            Err(AppError::NotARepository(root.to_path_buf()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{FixedClock, FixedStatusProvider, MemoryFileSystem};
    use chrono::{DateTime, Utc};

    fn context(fs: MemoryFileSystem, git: FixedStatusProvider) -> ServiceContext {
        ServiceContext::new(
            Box::new(FixedClock(DateTime::<Utc>::UNIX_EPOCH)),
            Box::new(fs),
            Box::new(git),
        )
    }

    fn run_to_strings(
        ctx: &ServiceContext,
        config: &Config,
    ) -> (Result<(), AppError>, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = run(ctx, config, &mut out, &mut err);
        (result, String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[test]
    fn missing_root_is_invalid_and_prints_nothing() {
        let ctx = context(MemoryFileSystem::new(), FixedStatusProvider::new());
        let (result, out, _) = run_to_strings(&ctx, &Config::for_root("/nope"));
        assert!(matches!(result, Err(AppError::InvalidRoot(_))));
        assert!(out.is_empty());
    }

    #[test]
    fn non_repository_root_is_rejected() {
        let ctx = context(MemoryFileSystem::new().with_dir("/r"), FixedStatusProvider::new());
        let (result, out, _) = run_to_strings(&ctx, &Config::for_root("/r"));
        let err = result.unwrap_err();
        assert!(matches!(err, AppError::NotARepository(_)));
        assert_eq!(err.exit_code(), 1);
        assert!(out.is_empty());
    }

    #[test]
    fn two_missing_areas_report_zero_total() {
        let ctx = context(
            MemoryFileSystem::new().with_dir("/r"),
            FixedStatusProvider::new().with_repository("/r"),
        );
        let mut config = Config::for_root("/r");
        config.areas = vec!["a".into(), "b".into()];
        let (result, out, err) = run_to_strings(&ctx, &config);
        assert!(result.is_ok());
        assert!(out.contains("--- a/ (missing)\n--- b/ (missing)\n"));
        assert!(out.contains("Total changes across areas: 0"));
        assert!(err.is_empty());
    }

    #[test]
    fn untracked_file_scenario() {
        let ctx = context(
            MemoryFileSystem::new()
                .with_file("/r/scripts/a.txt", "a")
                .with_file("/r/scripts/b.txt", "b"),
            FixedStatusProvider::new()
                .with_repository("/r")
                .with_changes("/r", "scripts", &["?? scripts/b.txt"]),
        );
        let mut config = Config::for_root("/r");
        config.areas = vec!["scripts".into()];
        let (result, out, _) = run_to_strings(&ctx, &config);
        assert!(result.is_ok());
        assert!(out.contains("--- scripts/\n?? scripts/b.txt\n(1 change(s))\n"));
        assert!(out.contains("Total changes across areas: 1"));
    }

    #[test]
    fn warnings_go_to_err_stream() {
        let ctx = context(
            MemoryFileSystem::new().with_file("/r/README.md", "meta-project mirror"),
            FixedStatusProvider::new().with_repository("/r"),
        );
        let (result, out, err) = run_to_strings(&ctx, &Config::for_root("/r"));
        assert!(result.is_ok());
        assert!(!out.contains("warning:"));
        assert!(err.starts_with("warning: README.md"));
        assert!(err.contains("START-HERE.md, ../../README.md, SYNC-NOTES.md"));
    }
}
