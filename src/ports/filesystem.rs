//! Filesystem port for the read-only queries the reporter performs.

use std::path::Path;

use super::git::PortResult;

/// Read-only filesystem access.
///
/// The reporter never writes; every query it needs lives here so tests can
/// swap in an in-memory tree.
pub trait FileSystem: Send + Sync {
    /// Returns `true` if the path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Returns `true` if the path exists and is a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Reads the entire contents of a file, replacing invalid UTF-8.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    fn read_to_string(&self, path: &Path) -> PortResult<String>;

    /// Lists regular files below `dir`, recursively, as `/`-separated paths
    /// relative to `dir`, sorted byte-wise. A missing directory yields an
    /// empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the walk fails partway.
    fn list_files(&self, dir: &Path) -> PortResult<Vec<String>>;

    /// Returns a hex digest of the file's full binary contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    fn hash_file(&self, path: &Path) -> PortResult<String>;
}
