//! Fatal error taxonomy and exit-code mapping.

use std::path::PathBuf;

/// Errors that stop a run before or during reporting.
///
/// Anything not listed here is non-fatal and degrades to a warning.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Unrecognized or malformed command-line arguments. Carries the rendered
    /// message including help text.
    #[error("{0}")]
    Usage(String),

    /// The repository root does not exist or is not a directory.
    #[error("repo root does not exist or is not a directory: {}", .0.display())]
    InvalidRoot(PathBuf),

    /// The repository root is not a git working copy.
    #[error("not a git repository: {}", .0.display())]
    NotARepository(PathBuf),

    /// The optional config file could not be parsed.
    #[error("invalid config file {}: {message}", .path.display())]
    Config {
        /// Path of the offending file.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// Writing the report failed.
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Process exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) => 2,
            Self::InvalidRoot(_) | Self::NotARepository(_) | Self::Config { .. } | Self::Io(_) => 1,
        }
    }
}
