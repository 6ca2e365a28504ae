//! Run configuration.

use lift_car::CarParams;
use lift_core::{LiftError, LiftResult, MAX_AGENTS, MAX_FLOORS, MAX_SHAFTS};
use lift_dispatch::DispatchPolicy;

/// Automatic passenger spawn rate.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpawnRate {
    /// Spawn `n` agents every simulated second.
    AgentsPerSec(u32),
    /// Spawn one agent every `n` simulated seconds.
    SecsPerAgent(u32),
}

/// Full simulation configuration.
///
/// Validated before any state is built; a live [`Simulation`][crate::Simulation]
/// re-reads most of these every tick, so they can be changed at runtime
/// through [`configure`][crate::Simulation::configure].  `seed` is the one
/// exception: it only matters at construction.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Number of floors, `2..=MAX_FLOORS`.
    pub floors: usize,
    /// Number of shafts (one car each), `1..=MAX_SHAFTS`.
    pub shafts: usize,
    /// Passenger capacity per car.
    pub capacity: usize,
    /// Car speed in floors per second.
    pub car_speed: f32,
    /// Door speed in full openings per second.
    pub door_speed: f32,
    /// Seconds a car dwells open before auto-closing.
    pub dwell_secs: u32,
    /// Minimum lead distance for a moving car to accept a new stop.
    pub catch_threshold: f32,
    /// Simulation ticks per second.
    pub tick_rate: u32,
    /// Call-to-car assignment policy.
    pub policy: DispatchPolicy,
    /// RNG seed for spawn sampling.
    pub seed: u64,
    /// Cap on concurrently active agents, `1..=MAX_AGENTS`.
    pub max_agents: usize,
    /// Automatic spawn rate; `None` disables auto-spawn.
    pub spawn_rate: Option<SpawnRate>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            floors:          2,
            shafts:          1,
            capacity:        8,
            car_speed:       1.0,
            door_speed:      1.5,
            dwell_secs:      5,
            catch_threshold: 0.5,
            tick_rate:       24,
            policy:          DispatchPolicy::default(),
            seed:            0,
            max_agents:      MAX_AGENTS,
            spawn_rate:      None,
        }
    }
}

impl SimConfig {
    /// Check every field before the configuration touches live state.
    pub fn validate(&self) -> LiftResult<()> {
        if !(2..=MAX_FLOORS).contains(&self.floors) {
            return Err(LiftError::InvalidConfig(format!(
                "floors must be in 2..={MAX_FLOORS}, got {}",
                self.floors
            )));
        }
        if !(1..=MAX_SHAFTS).contains(&self.shafts) {
            return Err(LiftError::InvalidConfig(format!(
                "shafts must be in 1..={MAX_SHAFTS}, got {}",
                self.shafts
            )));
        }
        if self.capacity == 0 {
            return Err(LiftError::InvalidConfig("capacity must be positive".into()));
        }
        if self.car_speed <= 0.0 {
            return Err(LiftError::InvalidConfig(format!(
                "car_speed must be positive, got {}",
                self.car_speed
            )));
        }
        if self.door_speed <= 0.0 {
            return Err(LiftError::InvalidConfig(format!(
                "door_speed must be positive, got {}",
                self.door_speed
            )));
        }
        if self.catch_threshold < 0.0 {
            return Err(LiftError::InvalidConfig(format!(
                "catch_threshold must be non-negative, got {}",
                self.catch_threshold
            )));
        }
        if self.tick_rate == 0 {
            return Err(LiftError::InvalidConfig("tick_rate must be positive".into()));
        }
        if !(1..=MAX_AGENTS).contains(&self.max_agents) {
            return Err(LiftError::InvalidConfig(format!(
                "max_agents must be in 1..={MAX_AGENTS}, got {}",
                self.max_agents
            )));
        }
        match self.spawn_rate {
            Some(SpawnRate::AgentsPerSec(0)) | Some(SpawnRate::SecsPerAgent(0)) => {
                return Err(LiftError::InvalidConfig("spawn rate must be positive".into()));
            }
            _ => {}
        }
        Ok(())
    }

    /// The per-tick parameter block pushed into every car.
    pub fn car_params(&self) -> CarParams {
        CarParams {
            dwell_secs:      self.dwell_secs,
            car_speed:       self.car_speed,
            door_speed:      self.door_speed,
            catch_threshold: self.catch_threshold,
            tick_rate:       self.tick_rate,
            floor_count:     self.floors,
            capacity:        self.capacity,
        }
    }
}
