//! Simulation observer trait for diagnostics and data collection.

use lift_dispatch::Assignment;

/// Callbacks invoked by [`Simulation::tick_with`][crate::Simulation::tick_with]
/// at key points in the tick.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — assignment counter
///
/// ```rust,ignore
/// #[derive(Default)]
/// struct AssignmentCounter(u64);
///
/// impl SimObserver for AssignmentCounter {
///     fn on_assignment(&mut self, _tick: u64, _assignment: Assignment) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: u64) {}

    /// Called for every call-to-car assignment the dispatch pass makes.
    fn on_assignment(&mut self, _tick: u64, _assignment: Assignment) {}

    /// Called when a car's target search comes up empty and it falls back
    /// to idle.
    fn on_search_failure(&mut self, _tick: u64, _shaft: usize) {}

    /// Called when an agent walks out of the building, with its lifetime
    /// in ticks.
    fn on_agent_completed(&mut self, _tick: u64, _life_ticks: u32) {}

    /// Called at the end of each tick.
    fn on_tick_end(&mut self, _tick: u64) {}
}

/// A [`SimObserver`] that does nothing.  Use when stepping the simulation
/// without callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
