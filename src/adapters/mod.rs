//! Adapter implementations for port traits.
//!
//! - `live`: real implementations backed by disk, the system clock and `git`.
//! - `memory`: deterministic in-memory stand-ins.

pub mod live;
pub mod memory;
