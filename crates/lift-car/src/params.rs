//! Per-tick kinematic parameters.
//!
//! The driver rebuilds a `CarParams` from the live configuration and pushes
//! it into every car at the top of each tick.  Nothing is cached across
//! ticks, so a runtime change to the tick rate, speeds, or dwell takes
//! effect immediately — in-flight timers compare against the freshly
//! derived per-tick values rather than stale ones.

/// Configuration-derived parameters a car needs for one tick of updates.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarParams {
    /// Seconds the doors dwell open before auto-closing.
    pub dwell_secs: u32,
    /// Nominal car speed in floors per second.
    pub car_speed: f32,
    /// Door speed in full openings per second.
    pub door_speed: f32,
    /// Minimum lead distance (in floors) a moving car must have before a
    /// floor ahead of it may be accepted as a new stop.
    pub catch_threshold: f32,
    /// Simulation ticks per second.
    pub tick_rate: u32,
    /// Current number of floors (the top floor is `floor_count - 1`).
    pub floor_count: usize,
    /// Passenger capacity per car.
    pub capacity: usize,
}

impl CarParams {
    /// Dwell duration in ticks at the current tick rate.
    #[inline]
    pub fn dwell_ticks(&self) -> u32 {
        self.dwell_secs * self.tick_rate
    }

    /// Door fraction delta per tick.
    #[inline]
    pub fn door_step(&self) -> f32 {
        self.door_speed / self.tick_rate as f32
    }
}
