//! `lift-sim` — the simulation driver.
//!
//! Owns every piece of shared state (cars, agents, the request board, the
//! RNG) and advances them in a fixed order each tick:
//!
//! 1. sweep impossible calls off the request board;
//! 2. update every car (params, state, timer, door, position, direction,
//!    flags — in that order, one car at a time in shaft order);
//! 3. update every agent (state, then position);
//! 4. auto-spawn if a spawn rate is configured;
//! 5. run the dispatch policy; each new assignment lets waiting agents
//!    re-pick the shaft they stand at;
//! 6. clear calls satisfied by fully open cars.
//!
//! | Module     | Contents                                         |
//! |------------|--------------------------------------------------|
//! | `config`   | [`SimConfig`], [`SpawnRate`], validation         |
//! | `sim`      | [`Simulation`] — state, the tick loop, inputs    |
//! | `snapshot` | Plain-data views of the world for callers        |
//! | `observer` | [`SimObserver`] hooks, [`NoopObserver`]          |

pub mod config;
pub mod observer;
pub mod sim;
pub mod snapshot;


pub use config::{SimConfig, SpawnRate};
pub use lift_agent::{Side, SpawnParams};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Simulation;
pub use snapshot::{AgentSnapshot, CarSnapshot, FloorSnapshot, SimSnapshot, SimStats};
