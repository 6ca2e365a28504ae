//! The car's door/movement state machine states.

use std::fmt;

/// The seven states of a car.
///
/// A car passes through at most one transition per tick.  `Idle` and
/// `IdleClosing` are the parked variants (no stops outstanding); the
/// `Opening → Open → Closing → Closed → Moving` cycle is one service leg.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CarState {
    /// Parked with doors closed, no stops outstanding.
    #[default]
    Idle,
    /// Doors closing with nowhere to go; ends in `Idle`.
    IdleClosing,
    /// Doors fully open, boarding/alighting in progress.
    Open,
    /// Doors closing ahead of a move.
    Closing,
    /// Doors fully closed, holding half the dwell before departing.
    Closed,
    /// Doors opening.
    Opening,
    /// Travelling toward the current stop.
    Moving,
}

impl fmt::Display for CarState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CarState::Idle        => "idle",
            CarState::IdleClosing => "idle-closing",
            CarState::Open        => "open",
            CarState::Closing     => "closing",
            CarState::Closed      => "closed",
            CarState::Opening     => "opening",
            CarState::Moving      => "moving",
        };
        f.write_str(s)
    }
}
