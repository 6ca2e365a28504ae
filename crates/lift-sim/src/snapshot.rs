//! Plain-data views of the simulation state.
//!
//! A snapshot copies everything a renderer or external driver needs out of
//! the live state; nothing in it borrows the simulation.

use lift_agent::AgentState;
use lift_car::CarState;
use lift_core::Direction;

/// One car, as seen from outside.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarSnapshot {
    pub shaft:       usize,
    pub state:       CarState,
    pub direction:   Direction,
    /// Continuous position in floor units.
    pub position:    f32,
    /// Canonical floor (what a shaft display would show).
    pub floor:       usize,
    /// Door fraction, 0 = closed, 1 = open.
    pub door:        f32,
    pub occupancy:   usize,
    pub capacity:    usize,
    pub deactivated: bool,
}

/// Call-button state of one floor.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloorSnapshot {
    pub up:           bool,
    pub down:         bool,
    pub pending_up:   bool,
    pub pending_down: bool,
}

/// One active agent, as seen from outside.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentSnapshot {
    pub state:   AgentState,
    /// Horizontal position in shaft units.
    pub xpos:    f32,
    /// Vertical position in floor units.
    pub ypos:    f32,
    pub boarded: bool,
    /// Live-agent flag.  A snapshot covers only agents still in the
    /// building, so within one snapshot this is always `true`; it marks
    /// rows persisted across ticks.
    pub active:  bool,
    /// Cosmetic color tag, `0..10`.
    pub color:   u8,
}

/// Aggregate passenger statistics.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimStats {
    /// Agents currently in the building.
    pub active_agents: usize,
    /// Agents that completed their trip and left.
    pub completed_agents: u64,
    /// Sum of completed agents' lifetimes, in ticks.
    pub total_life_ticks: u64,
    /// Mean completed lifetime in simulated seconds (0 when none completed).
    pub average_life_secs: f32,
}

/// The whole world at one tick.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimSnapshot {
    pub tick:   u64,
    pub floors: usize,
    pub shafts: usize,
    /// Active cars, in shaft order.  Tombstoned cars are not included.
    pub cars: Vec<CarSnapshot>,
    /// Per-floor call flags, ground floor first.
    pub floor_calls: Vec<FloorSnapshot>,
    /// Active agents, in slot order.
    pub agents: Vec<AgentSnapshot>,
    pub stats: SimStats,
}
