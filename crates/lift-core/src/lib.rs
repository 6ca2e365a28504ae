//! `lift-core` — foundational types for the `rust_lift` elevator-bank
//! simulation framework.
//!
//! This crate is a dependency of every other `lift-*` crate.  It intentionally
//! has no `lift-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`direction`] | `Direction` — the shared travel-direction enum        |
//! | [`limits`]    | `MAX_FLOORS`, `MAX_SHAFTS`, `MAX_AGENTS`              |
//! | [`rng`]       | `SimRng` — seedable simulation RNG                    |
//! | [`error`]     | `LiftError`, `LiftResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                   |
//! |---------|----------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.      |

pub mod direction;
pub mod error;
pub mod limits;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use direction::Direction;
pub use error::{LiftError, LiftResult};
pub use limits::{MAX_AGENTS, MAX_FLOORS, MAX_SHAFTS};
pub use rng::SimRng;
