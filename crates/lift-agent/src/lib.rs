//! `lift-agent` — passenger agents.
//!
//! An agent spawns at a building edge, walks to a call button, waits for a
//! car, boards, rides, and walks off on its target floor.  Agents live on a
//! horizontal axis measured in shaft units (shaft `s` is centered at
//! `x = s`; the building edges are at `-0.5` and `shafts - 0.5`).
//!
//! | Module  | Contents                                             |
//! |---------|------------------------------------------------------|
//! | `state` | [`AgentState`], [`Side`]                             |
//! | `spawn` | [`SpawnParams`] — sampled or pinned spawn parameters |
//! | `agent` | [`Agent`] — the state machine itself                 |

pub mod agent;
pub mod spawn;
pub mod state;


pub use agent::Agent;
pub use spawn::SpawnParams;
pub use state::{AgentState, Side};
