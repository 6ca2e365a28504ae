//! The policy selector.

use std::fmt;

/// Which assignment heuristic the scheduler runs each tick.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DispatchPolicy {
    /// Minimize idle use: moving cars catch calls ahead of them first,
    /// idle cars are the fallback.
    #[default]
    Greedy,
    /// Maximize idle use: idle cars are woken first, moving cars are the
    /// fallback.
    Aggressive,
    /// Score every eligible car by distance to the call (idle cars carry a
    /// +0.5 handicap so a moving car wins ties); lowest score wins.
    Balanced,
}

impl fmt::Display for DispatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DispatchPolicy::Greedy     => "greedy",
            DispatchPolicy::Aggressive => "aggressive",
            DispatchPolicy::Balanced   => "balanced",
        };
        f.write_str(s)
    }
}
