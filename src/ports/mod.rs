//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the reporter and something it
//! does not own (time, the filesystem, the `git` client). Implementations
//! live in `src/adapters/`.

pub mod clock;
pub mod filesystem;
pub mod git;

pub use clock::Clock;
pub use filesystem::FileSystem;
pub use git::{ChangedFile, NameStatus, PortResult, StatusProvider};
