//! Framework error type.
//!
//! Very little in this simulation is an error: a full car refuses boarding
//! with a boolean, a failed target search idles the car, and stale
//! floor/shaft references are silently repaired by the resize revalidation
//! pass.  What remains is the configuration boundary — invalid dimensions
//! are rejected here before any state mutation.

use thiserror::Error;

/// The top-level error type for all `lift-*` crates.
#[derive(Debug, Error)]
pub enum LiftError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("shaft {shaft} out of range (current shaft count {count})")]
    ShaftOutOfRange { shaft: usize, count: usize },

    #[error("floor {floor} out of range (current floor count {count})")]
    FloorOutOfRange { floor: usize, count: usize },
}

/// Shorthand result type for all `lift-*` crates.
pub type LiftResult<T> = Result<T, LiftError>;
