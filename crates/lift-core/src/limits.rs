//! Hard simulation limits.
//!
//! The building geometry is resizable at runtime but bounded: per-floor flag
//! arrays (`RequestBoard` rows, car stop sets) are allocated at `MAX_FLOORS`
//! once so resizing never reallocates or invalidates indices.

/// Maximum number of floors a building can be resized to.
pub const MAX_FLOORS: usize = 128;

/// Maximum number of elevator shafts.
pub const MAX_SHAFTS: usize = 32;

/// Maximum number of concurrently active passenger agents.
pub const MAX_AGENTS: usize = 128;
