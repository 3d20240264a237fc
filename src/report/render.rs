//! Text and JSON rendering of a [`Report`].

use std::io::{self, Write};

use super::{AreaReport, DriftOutcome, DriftSection, Report};
use crate::config::OutputFormat;

/// Writes the report in the requested format.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_report(report: &Report, format: OutputFormat, out: &mut dyn Write) -> io::Result<()> {
    match format {
        OutputFormat::Text => write_text(report, out),
        OutputFormat::Json => write_json(report, out),
    }
}

/// Writes the human-readable report.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_text(report: &Report, out: &mut dyn Write) -> io::Result<()> {
    let mode = if report.dry_run { " (dry-run)" } else { "" };
    writeln!(out, "Repo root: {}{mode}", report.repo_root.display())?;

    for area in &report.areas {
        write_area(area, report.since.as_deref(), out)?;
    }
    writeln!(out, "Total changes across areas: {}", report.total)?;

    if let Some(drift) = &report.drift {
        write_drift(drift, out)?;
    }
    Ok(())
}

fn write_area(area: &AreaReport, since: Option<&str>, out: &mut dyn Write) -> io::Result<()> {
    if !area.present {
        return writeln!(out, "--- {}/ (missing)", area.name);
    }
    writeln!(out, "--- {}/", area.name)?;
    if area.status_error.is_some() {
        writeln!(out, "(status unavailable)")?;
    } else if area.changes.is_empty() {
        writeln!(out, "(clean)")?;
    } else {
        for change in &area.changes {
            writeln!(out, "{change}")?;
        }
        writeln!(out, "({} change(s))", area.count)?;
    }

    if let (Some(rev), Some(diff)) = (since, &area.diff) {
        writeln!(out, "Diff since {rev}:")?;
        for entry in diff {
            writeln!(out, "{entry}")?;
        }
    }
    Ok(())
}

fn write_drift(drift: &DriftSection, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Drift against {}:", drift.drift_root.display())?;
    for area in &drift.areas {
        writeln!(out, "--- {}/", area.area)?;
        match &area.outcome {
            DriftOutcome::MissingInBoth => writeln!(out, "(missing in both)")?,
            DriftOutcome::Compared(counts) => {
                writeln!(out, "Only in repo: {}", counts.only_in_repo)?;
                writeln!(out, "Only in drift-root: {}", counts.only_in_drift_root)?;
                writeln!(out, "Hash diffs on common files: {}", counts.hash_diffs)?;
            }
        }
    }
    Ok(())
}

/// Writes the report as one pretty-printed JSON document.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(report: &Report, out: &mut dyn Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)
}
