//! Agent lifecycle states and building sides.

use std::fmt;

/// The passenger lifecycle, in order.  `Leaving` ends with the agent
/// stepping past a building edge and reporting its lifetime.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentState {
    /// Walking to the nearer call button.
    #[default]
    Pressing,
    /// Standing at a personal spot beside the chosen shaft.
    Waiting,
    /// Walking into an open (or opening) car.
    Pursuing,
    /// Riding; vertical position tracks the car.
    Boarded,
    /// Walking off the target floor toward the exit edge.
    Leaving,
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AgentState::Pressing => "pressing",
            AgentState::Waiting  => "waiting",
            AgentState::Pursuing => "pursuing",
            AgentState::Boarded  => "boarded",
            AgentState::Leaving  => "leaving",
        };
        f.write_str(s)
    }
}

/// Which edge of the building an agent enters or exits through.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Left  => "left",
            Side::Right => "right",
        })
    }
}
