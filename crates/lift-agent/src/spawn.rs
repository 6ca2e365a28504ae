//! Spawn parameter sampling.

use lift_core::SimRng;

use crate::Side;

/// Slowest allowed walking speed, in shaft units per second.
const MIN_WALK_SPEED: f32 = 0.3;

/// Number of cosmetic color tags.
const COLOR_COUNT: u8 = 10;

/// Everything random about a freshly spawned agent.
///
/// Sampled from the simulation RNG in normal operation; tests and external
/// drivers construct it directly to pin a fully deterministic passenger.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnParams {
    /// Floor the agent appears on.
    pub initial_floor: usize,
    /// Floor the agent travels to.  Always distinct from `initial_floor`.
    pub target_floor: usize,
    /// Edge the agent walks in from.
    pub entry_side: Side,
    /// Edge the agent walks out through after the ride.
    pub exit_side: Side,
    /// Walking speed in shaft units per second, at least [`MIN_WALK_SPEED`].
    pub speed: f32,
    /// Personal standing spot beside the waited shaft, `0..1`.
    pub wait_offset: f32,
    /// Personal standing spot inside the car, `0..1`.
    pub car_offset: f32,
    /// Cosmetic color tag, `0..10`.
    pub color: u8,
}

impl SpawnParams {
    /// Draw a random passenger for a building with `floor_count` floors.
    ///
    /// Needs `floor_count >= 2` so a distinct target floor exists.
    pub fn sample(rng: &mut SimRng, floor_count: usize) -> Self {
        let initial_floor = rng.gen_range(0..floor_count);
        let mut target_floor = rng.gen_range(0..floor_count);
        while target_floor == initial_floor {
            target_floor = rng.gen_range(0..floor_count);
        }

        let entry_side = if rng.gen_bool(0.5) { Side::Right } else { Side::Left };
        let exit_side = if rng.gen_bool(0.5) { Side::Right } else { Side::Left };

        Self {
            initial_floor,
            target_floor,
            entry_side,
            exit_side,
            speed:       rng.gen_range(0.0_f32..1.0).max(MIN_WALK_SPEED),
            wait_offset: rng.gen_range(0.0_f32..1.0),
            car_offset:  rng.gen_range(0.0_f32..1.0),
            color:       rng.gen_range(0..COLOR_COUNT),
        }
    }
}
