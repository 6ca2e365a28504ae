//! `lift-dispatch` — the call-to-car assignment layer.
//!
//! Runs once per tick, after every car and agent has updated.  All three
//! policies share the same outer scan — floors in increasing order, the
//! up call checked before the down call at each floor, calls already
//! marked pending skipped — and the same assignment action: mark the call
//! pending, push the floor onto the chosen car's panel, and report the
//! assignment so the driver can let waiting passengers re-pick a door.
//!
//! | Policy       | Heuristic                                             |
//! |--------------|-------------------------------------------------------|
//! | `Greedy`     | Prefer cars already moving toward the call; idle cars |
//! |              | are the fallback (minimizes idle use).                |
//! | `Aggressive` | Prefer idle cars; moving cars are the fallback        |
//! |              | (maximizes idle use).                                 |
//! | `Balanced`   | Scores every eligible car by distance, with a +0.5    |
//! |              | handicap on idle cars; lowest score wins.             |
//!
//! A car at capacity is never eligible, under any policy.

pub mod policy;
pub mod scheduler;

#[cfg(test)]
mod tests;

pub use policy::DispatchPolicy;
pub use scheduler::{dispatch, Assignment};
