//! `lift-board` — the floor-request board.
//!
//! One `RequestBoard` per building: a pair of per-floor call flags (`up`,
//! `down`) set by passengers or manual input, plus a pair of *pending*
//! shadow flags marking calls that a dispatch policy has already assigned
//! to a car but that no car has physically serviced yet.  The pending
//! shadows are what stop every policy from re-assigning the same call on
//! every tick.
//!
//! Pure data with invariant guards — no references to cars or agents.

pub mod board;


pub use board::RequestBoard;
