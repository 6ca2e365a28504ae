//! The `Agent`: one passenger from spawn to exit.

use lift_board::RequestBoard;
use lift_car::Car;
use lift_core::{Direction, SimRng};
use log::debug;

use crate::{AgentState, Side, SpawnParams};

// Horizontal geometry, in shaft units.  The left call button sits just
// outside shaft 0; the right button (only present with multiple shafts)
// just outside the last shaft.  Building edges are half a shaft beyond
// the outermost shaft centers.
const LEFT_BUTTON: f32 = -0.4;
const RIGHT_BUTTON_OVERHANG: f32 = 0.4;
const BUTTON_RADIUS: f32 = 0.05;
const EDGE_OVERHANG: f32 = 0.5;

/// Distance from the shaft center at which a pursuer can step aboard.
const BOARD_TOLERANCE: f32 = 0.1;
/// Distance from the shaft center at which a pursuer holds the door.
const OPEN_PRESS_RANGE: f32 = 0.15;
/// Walking dead-band: closer than this counts as arrived.
const DEAD_BAND: f32 = 0.02;

/// Seconds a waiting agent holds out before trying the doors again.
const PATIENCE_SECS: u32 = 4;

/// One passenger.
///
/// The driver owns all shared state and passes it in by reference each
/// tick: the car slice, the request board, and (for repairs) the RNG.
/// Update order within a tick is [`update_state`][Agent::update_state]
/// then [`update_pos`][Agent::update_pos].
#[derive(Clone, Debug)]
pub struct Agent {
    state: AgentState,

    initial_floor: usize,
    target_floor:  usize,
    /// Shaft the agent is currently waiting at (or riding in).
    wait_shaft: usize,

    /// Horizontal position in shaft units.
    xpos: f32,
    /// Vertical position in floor units; tracks the car while boarded.
    ypos: f32,

    entry_side: Side,
    exit_side:  Side,

    /// Latches once the agent first reaches a call button.
    at_button: bool,

    speed:       f32,
    wait_offset: f32,
    car_offset:  f32,
    color:       u8,

    life_ticks:     u32,
    patience_ticks: u32,
}

impl Agent {
    pub fn new(params: SpawnParams, shaft_count: usize) -> Self {
        let (xpos, wait_shaft) = match params.entry_side {
            Side::Left  => (-EDGE_OVERHANG, 0),
            Side::Right => ((shaft_count - 1) as f32 + EDGE_OVERHANG, shaft_count - 1),
        };
        Self {
            state:          AgentState::Pressing,
            initial_floor:  params.initial_floor,
            target_floor:   params.target_floor,
            wait_shaft,
            xpos,
            ypos:           params.initial_floor as f32,
            entry_side:     params.entry_side,
            exit_side:      params.exit_side,
            at_button:      false,
            speed:          params.speed,
            wait_offset:    params.wait_offset,
            car_offset:     params.car_offset,
            color:          params.color,
            life_ticks:     0,
            patience_ticks: 0,
        }
    }

    // ── Read access (snapshot surface) ────────────────────────────────────

    #[inline]
    pub fn state(&self) -> AgentState {
        self.state
    }

    #[inline]
    pub fn xpos(&self) -> f32 {
        self.xpos
    }

    #[inline]
    pub fn ypos(&self) -> f32 {
        self.ypos
    }

    #[inline]
    pub fn is_boarded(&self) -> bool {
        self.state == AgentState::Boarded
    }

    #[inline]
    pub fn color(&self) -> u8 {
        self.color
    }

    #[inline]
    pub fn initial_floor(&self) -> usize {
        self.initial_floor
    }

    #[inline]
    pub fn target_floor(&self) -> usize {
        self.target_floor
    }

    #[inline]
    pub fn wait_shaft(&self) -> usize {
        self.wait_shaft
    }

    #[inline]
    pub fn life_ticks(&self) -> u32 {
        self.life_ticks
    }

    // ── Per-tick updates ──────────────────────────────────────────────────

    /// Advance the lifecycle state machine.  Returns the agent's lifetime
    /// in ticks once it has walked out of the building; the caller retires
    /// the slot on `Some`.
    pub fn update_state(
        &mut self,
        cars:        &mut [Car],
        shaft_count: usize,
        tick_rate:   u32,
    ) -> Option<u32> {
        match self.state {
            AgentState::Pressing => {
                if self.at_button {
                    self.set_state(AgentState::Waiting);
                }
            }
            AgentState::Waiting => {
                let car = &cars[self.wait_shaft];
                if car.floor() == self.initial_floor && car.door() >= 1.0 {
                    self.set_state(AgentState::Pursuing);
                }
                if self.patience_ticks / tick_rate >= PATIENCE_SECS {
                    // Out of patience: go rattle the doors again.
                    self.patience_ticks = 0;
                    self.set_state(AgentState::Pursuing);
                }
            }
            AgentState::Pursuing => {
                if (self.xpos - self.wait_shaft as f32).abs() < BOARD_TOLERANCE {
                    if cars[self.wait_shaft].board() {
                        self.set_state(AgentState::Boarded);
                        cars[self.wait_shaft].hit_floor(self.target_floor);
                    }
                } else if cars[self.wait_shaft].door() <= 0.0 {
                    // Missed it.  Start over from the nearer button.
                    self.set_state(AgentState::Pressing);
                    self.wait_shaft = if self.xpos < (shaft_count as f32 - 0.5) / 2.0 {
                        0
                    } else {
                        shaft_count - 1
                    };
                }
            }
            AgentState::Boarded => {
                let car = &mut cars[self.wait_shaft];
                if car.floor() == self.target_floor && car.door() >= 1.0 {
                    car.unboard();
                    self.set_state(AgentState::Leaving);
                }
            }
            AgentState::Leaving => {
                let out = match self.exit_side {
                    Side::Left  => self.xpos <= -EDGE_OVERHANG,
                    Side::Right => self.xpos >= shaft_count as f32 - EDGE_OVERHANG,
                };
                if out {
                    debug!("agent done after {} ticks", self.life_ticks);
                    return Some(self.life_ticks);
                }
            }
        }
        None
    }

    /// Advance the timers and walk.  Presses call buttons, holds doors, and
    /// re-issues the in-car floor request as a side effect of the current
    /// state.
    pub fn update_pos(
        &mut self,
        cars:        &mut [Car],
        board:       &mut RequestBoard,
        shaft_count: usize,
        tick_rate:   u32,
    ) {
        self.life_ticks += 1;
        self.patience_ticks += 1;

        let right_button = (shaft_count - 1) as f32 + RIGHT_BUTTON_OVERHANG;
        if shaft_count > 1 && (self.xpos - right_button).abs() < BUTTON_RADIUS {
            self.at_button = true;
        }
        if (self.xpos - LEFT_BUTTON).abs() < BUTTON_RADIUS {
            self.at_button = true;
        }

        let step = self.speed / tick_rate as f32;

        match self.state {
            AgentState::Pressing => {
                let mut button = LEFT_BUTTON;
                if shaft_count > 1
                    && (self.xpos - right_button).abs() < (self.xpos - LEFT_BUTTON).abs()
                {
                    button = right_button;
                }
                if self.xpos > button {
                    self.xpos -= step;
                } else {
                    self.xpos += step;
                }
                if self.at_button {
                    if self.initial_floor < self.target_floor {
                        board.press_up(self.initial_floor);
                    }
                    if self.initial_floor > self.target_floor {
                        board.press_down(self.initial_floor);
                    }
                }
            }
            AgentState::Waiting => {
                let target = self.wait_target(shaft_count);
                self.walk_toward(target, step);
            }
            AgentState::Pursuing => {
                self.walk_toward(self.wait_shaft as f32, step);
                if (self.xpos - self.wait_shaft as f32).abs() < OPEN_PRESS_RANGE
                    && cars[self.wait_shaft].can_board()
                {
                    cars[self.wait_shaft].open_press();
                }
            }
            AgentState::Boarded => {
                let car = &mut cars[self.wait_shaft];
                if car.floor() == self.target_floor {
                    car.open_press();
                } else {
                    // Covers a request that bounced off a direction-less car
                    // at boarding time.
                    car.hit_floor(self.target_floor);
                }
                let target = self.board_target();
                self.walk_toward(target, step);
                self.ypos = cars[self.wait_shaft].position();
            }
            AgentState::Leaving => {
                // Pin to the floor: the ride accumulates small vertical error.
                self.ypos = self.target_floor as f32;
                match self.exit_side {
                    Side::Left  => self.xpos -= step,
                    Side::Right => self.xpos += step,
                }
            }
        }
    }

    /// Re-pick which shaft to wait at.  The driver calls this on every
    /// `Waiting` agent after each new dispatch assignment.
    ///
    /// Shafts are checked in index order and the first qualifying car wins:
    /// at an extreme floor any fully open car, then any busy car; otherwise
    /// a car climbing from below (applied to both travel directions), then
    /// a free car sitting on this floor.
    pub fn update_wait_shaft(&mut self, cars: &[Car], shaft_count: usize, floor_count: usize) {
        if self.state != AgentState::Waiting {
            return;
        }
        let extreme = if self.initial_floor < self.target_floor {
            0
        } else {
            floor_count - 1
        };
        let at_extreme = self.initial_floor == extreme;
        for car in cars.iter().take(shaft_count) {
            if at_extreme && car.door() >= 1.0 {
                self.wait_shaft = car.shaft();
                return;
            }
            if at_extreme && !car.is_idle() {
                self.wait_shaft = car.shaft();
                return;
            }
            if car.direction() == Direction::Up && car.position() < self.ypos {
                self.wait_shaft = car.shaft();
                return;
            }
            if car.direction().is_none() && car.floor() == self.initial_floor {
                self.wait_shaft = car.shaft();
                return;
            }
        }
    }

    // ── Resize repair ─────────────────────────────────────────────────────

    /// Repair floor references after the building shrank.  A waiting or
    /// pressing agent re-draws its target; a pursuer backs off to waiting;
    /// a rider gets off at the ground floor; a leaver steps down one floor.
    pub fn validate_floor(&mut self, floor_count: usize, rng: &mut SimRng) {
        if self.target_floor > floor_count - 1 {
            match self.state {
                AgentState::Pressing | AgentState::Waiting => {
                    self.redraw_target(floor_count, rng);
                }
                AgentState::Pursuing => {
                    self.set_state(AgentState::Waiting);
                    self.target_floor = rng.gen_range(0..floor_count);
                }
                AgentState::Boarded => {
                    self.target_floor = 0;
                    // Keep initial distinct from the new target.
                    self.initial_floor = 1;
                }
                AgentState::Leaving => {
                    self.target_floor -= 1;
                    self.ypos -= 1.0;
                }
            }
        }
        if self.initial_floor > floor_count - 1
            && matches!(self.state, AgentState::Pressing | AgentState::Waiting)
        {
            self.initial_floor -= 1;
            self.ypos -= 1.0;
        }
    }

    /// Repair shaft references after the bank shrank: shift one shaft left.
    /// A rider in the removed shaft is released to leave from the ground
    /// floor.
    pub fn validate_shaft(&mut self, shaft_count: usize) {
        if self.wait_shaft <= shaft_count - 1 {
            return;
        }
        match self.state {
            AgentState::Pressing | AgentState::Waiting => {
                self.wait_shaft -= 1;
                self.xpos -= 1.0;
            }
            AgentState::Pursuing => {
                self.set_state(AgentState::Waiting);
                self.wait_shaft -= 1;
                self.xpos -= 1.0;
            }
            AgentState::Boarded => {
                self.set_state(AgentState::Leaving);
                self.wait_shaft -= 1;
                self.xpos -= 1.0;
                self.ypos = 0.0;
                self.target_floor = 0;
            }
            AgentState::Leaving => {
                self.xpos -= 1.0;
            }
        }
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn set_state(&mut self, next: AgentState) {
        if self.state != next {
            debug!("agent: {} -> {}", self.state, next);
        }
        self.state = next;
    }

    fn walk_toward(&mut self, target: f32, step: f32) {
        if (self.xpos - target).abs() <= DEAD_BAND {
            return;
        }
        if self.xpos > target {
            self.xpos -= step;
        } else {
            self.xpos += step;
        }
    }

    /// Personal standing spot beside the waited shaft, offset toward the
    /// side the agent came from.
    fn wait_target(&self, shaft_count: usize) -> f32 {
        let center = self.wait_shaft as f32;
        if self.entry_side == Side::Left || shaft_count == 1 {
            center - self.wait_offset / 2.0
        } else {
            center + self.wait_offset / 2.0
        }
    }

    /// Personal standing spot inside the car.
    fn board_target(&self) -> f32 {
        let center = self.wait_shaft as f32;
        if self.car_offset > 0.5 {
            center - self.car_offset * 0.2
        } else if self.car_offset < 0.5 {
            center + (self.car_offset - 0.5) * 0.2
        } else {
            center
        }
    }

    fn redraw_target(&mut self, floor_count: usize, rng: &mut SimRng) {
        self.target_floor = rng.gen_range(0..floor_count);
        while self.target_floor == self.initial_floor {
            self.target_floor = rng.gen_range(0..floor_count);
        }
    }
}
