//! The shared travel-direction enum.

use std::fmt;

/// Direction of travel for a car (and, by extension, for a floor call).
///
/// `None` means the car is free to accept a stop in either direction — it is
/// the state dispatch policies treat as "idle", and the state a car returns
/// to whenever it opens at a building extreme or runs out of stops.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Down,
    Up,
    #[default]
    None,
}

impl Direction {
    /// The direction that moves a car from `from` toward `to`.
    ///
    /// Returns `Direction::None` when `from == to`.
    #[inline]
    pub fn toward(from: usize, to: usize) -> Direction {
        use std::cmp::Ordering::*;
        match to.cmp(&from) {
            Greater => Direction::Up,
            Less    => Direction::Down,
            Equal   => Direction::None,
        }
    }

    /// `true` when the car has no committed direction.
    #[inline]
    pub fn is_none(self) -> bool {
        self == Direction::None
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Down => "down",
            Direction::Up   => "up",
            Direction::None => "none",
        };
        f.write_str(s)
    }
}
