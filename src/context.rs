//! Service context bundling all port trait objects.

use crate::adapters::live::{LiveClock, LiveFileSystem, LiveStatusProvider};
use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;
use crate::ports::git::StatusProvider;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors wire up
/// different adapter implementations.
pub struct ServiceContext {
    /// Clock for stamping JSON reports.
    pub clock: Box<dyn Clock>,
    /// Filesystem for existence checks, walks and hashing.
    pub fs: Box<dyn FileSystem>,
    /// Version-control queries.
    pub git: Box<dyn StatusProvider>,
}

impl ServiceContext {
    /// Creates a live context backed by the system clock, disk and `git`.
    #[must_use]
    pub fn live() -> Self {
        Self {
            clock: Box::new(LiveClock),
            fs: Box::new(LiveFileSystem),
            git: Box::new(LiveStatusProvider),
        }
    }

    /// Creates a context from explicit adapters.
    #[must_use]
    pub fn new(
        clock: Box<dyn Clock>,
        fs: Box<dyn FileSystem>,
        git: Box<dyn StatusProvider>,
    ) -> Self {
        Self { clock, fs, git }
    }
}
