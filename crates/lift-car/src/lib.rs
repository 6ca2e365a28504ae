//! `lift-car` — the per-shaft elevator car state machine.
//!
//! # Crate layout
//!
//! | Module     | Contents                                               |
//! |------------|--------------------------------------------------------|
//! | [`state`]  | `CarState` — the seven-state door/movement machine     |
//! | [`params`] | `CarParams` — per-tick derived kinematic parameters    |
//! | [`car`]    | `Car` — state, stops, boarding, kinematics             |
//!
//! # Update contract
//!
//! The tick driver calls the `step_*` methods in a fixed order every tick:
//!
//! ```text
//! refresh_params → step_state → step_timer → step_door
//!                → step_position → step_direction → clear_flags
//! ```
//!
//! Several transitions read state written earlier in the same tick by a
//! different step (e.g. `step_direction` sees the `Opening` state that
//! `step_state` just entered), so the order is a correctness contract,
//! not a convention.

pub mod car;
pub mod params;
pub mod state;

#[cfg(test)]
mod tests;

pub use car::Car;
pub use params::CarParams;
pub use state::CarState;
