//! The `Car`: one elevator per shaft.

use lift_board::RequestBoard;
use lift_core::{Direction, MAX_FLOORS};
use log::{debug, warn};

use crate::{CarParams, CarState};

/// Arrival tolerance on the continuous position, in floors.  The ease curve
/// decelerates toward zero at the stop, so the position converges on the
/// target rather than landing on it exactly.
const POS_EPSILON: f32 = 0.005;

impl Default for CarParams {
    fn default() -> Self {
        Self {
            dwell_secs:      5,
            car_speed:       1.0,
            door_speed:      1.5,
            catch_threshold: 0.5,
            tick_rate:       24,
            floor_count:     2,
            capacity:        8,
        }
    }
}

/// One elevator car, bound to a shaft for its whole life.
///
/// A car starts parked at floor 0 with doors closed, primed to go up.
/// Removing a shaft never reuses its car: [`deactivate`][Car::deactivate]
/// is a one-way tombstone, and re-adding the shaft creates a fresh `Car`.
#[derive(Clone, Debug)]
pub struct Car {
    shaft:     usize,
    state:     CarState,
    direction: Direction,

    /// Continuous position in floor units, `0.0 ..= floor_count - 1`.
    position: f32,
    /// Canonical floor: `position.floor()` ascending, `position.ceil()`
    /// descending.  This is what displays and boarding logic use.
    floor: usize,
    /// Door fraction, 0 = closed, 1 = open.
    door: f32,

    /// Per-floor stop membership (the car's internal button panel).
    stops: Vec<bool>,
    /// Floor the car last departed from — the acceleration reference.
    prev_stop: usize,
    /// The stop currently being travelled to.
    current_stop: Option<usize>,

    dwell_timer: u32,

    // Transient per-tick input flags, swept by `clear_flags`.
    open_pressed:  bool,
    close_pressed: bool,
    search_failed: bool,

    deactivated: bool,
    occupancy:   usize,

    params: CarParams,
}

impl Car {
    pub fn new(shaft: usize) -> Self {
        Self {
            shaft,
            state:         CarState::Idle,
            direction:     Direction::Up,
            position:      0.0,
            floor:         0,
            door:          0.0,
            stops:         vec![false; MAX_FLOORS],
            prev_stop:     0,
            current_stop:  None,
            dwell_timer:   0,
            open_pressed:  false,
            close_pressed: false,
            search_failed: false,
            deactivated:   false,
            occupancy:     0,
            params:        CarParams::default(),
        }
    }

    // ── Read access (snapshot surface) ────────────────────────────────────

    #[inline]
    pub fn shaft(&self) -> usize {
        self.shaft
    }

    #[inline]
    pub fn state(&self) -> CarState {
        self.state
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub fn position(&self) -> f32 {
        self.position
    }

    #[inline]
    pub fn floor(&self) -> usize {
        self.floor
    }

    /// Door fraction in `[0, 1]`.
    #[inline]
    pub fn door(&self) -> f32 {
        self.door
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.state == CarState::Idle
    }

    #[inline]
    pub fn is_deactivated(&self) -> bool {
        self.deactivated
    }

    /// `>=`, not `==`: a runtime capacity cut can leave the car
    /// over-occupied, and it must still read as full to the dispatcher.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.occupancy >= self.params.capacity
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.occupancy == 0
    }

    #[inline]
    pub fn occupancy(&self) -> usize {
        self.occupancy
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.params.capacity
    }

    /// `true` if this tick's target search came up empty.
    #[inline]
    pub fn search_failed(&self) -> bool {
        self.search_failed
    }

    #[inline]
    pub fn has_stop(&self, floor: usize) -> bool {
        self.stops[floor]
    }

    // ── Passenger interface ───────────────────────────────────────────────

    /// Try to take one passenger aboard.  Returns `false` at capacity —
    /// the refused passenger keeps waiting and retries later.
    pub fn board(&mut self) -> bool {
        if self.occupancy < self.params.capacity {
            self.occupancy += 1;
            debug!("car {}: occupancy {} / {}", self.shaft, self.occupancy, self.params.capacity);
            true
        } else {
            false
        }
    }

    /// Capacity check without boarding.
    #[inline]
    pub fn can_board(&self) -> bool {
        self.occupancy < self.params.capacity
    }

    /// Release one passenger.
    pub fn unboard(&mut self) {
        self.occupancy = self.occupancy.saturating_sub(1);
        debug!("car {}: occupancy {} / {}", self.shaft, self.occupancy, self.params.capacity);
    }

    // ── Inputs ────────────────────────────────────────────────────────────

    /// The 'open doors' button (also raised by a passenger holding the door).
    /// Cancels a pending close press.
    pub fn open_press(&mut self) {
        if self.deactivated {
            return;
        }
        self.open_pressed = true;
        self.close_pressed = false;
    }

    /// The 'close doors' button.
    pub fn close_press(&mut self) {
        if self.deactivated {
            return;
        }
        self.close_pressed = true;
    }

    /// Request a stop at `requested` (0-indexed), from the in-car panel or
    /// from the dispatch scheduler.
    ///
    /// A car with no committed direction accepts any floor and turns toward
    /// it.  A moving car accepts only floors strictly ahead of it and
    /// farther than the catch threshold from its continuous position — a
    /// stop it has already passed, or is too close to decelerate for, is
    /// ignored.  A request for the car's own floor just re-opens the doors
    /// (capacity permitting).
    pub fn hit_floor(&mut self, requested: usize) {
        if self.deactivated || requested >= MAX_FLOORS {
            return;
        }
        if requested != self.floor {
            if self.state == CarState::Idle || self.direction.is_none() {
                self.stops[requested] = true;
                self.direction = Direction::toward(self.floor, requested);
            } else {
                match self.direction {
                    Direction::Up
                        if requested > self.floor
                            && requested as f32 > self.position + self.params.catch_threshold =>
                    {
                        self.stops[requested] = true;
                    }
                    Direction::Down
                        if requested < self.floor
                            && (requested as f32) < self.position - self.params.catch_threshold =>
                    {
                        self.stops[requested] = true;
                    }
                    _ => {}
                }
            }
        } else if !self.is_full() {
            // Called to its own floor: treat as "already there".
            self.open_press();
            self.dwell_timer = 0;
        }
    }

    /// One-way tombstone.  The car idles forever and ignores all input;
    /// re-adding the shaft creates a fresh `Car` in its place.
    pub fn deactivate(&mut self) {
        self.deactivated = true;
    }

    // ── Resize repair ─────────────────────────────────────────────────────

    /// Repair a car stranded above a shrunken building: reset it to floor 0
    /// with doors opening.  Stops above the new top are dropped so the next
    /// target search cannot pick a removed floor.
    pub fn validate_floor(&mut self, floor_count: usize) {
        for f in floor_count..MAX_FLOORS {
            self.stops[f] = false;
        }
        // A leg in flight toward a removed floor is redirected to the new top.
        if let Some(stop) = self.current_stop {
            if stop >= floor_count {
                self.current_stop = Some(floor_count - 1);
            }
        }
        if self.position > (floor_count - 1) as f32 {
            self.set_state(CarState::Opening);
            self.dwell_timer = 0;
            self.position = 0.0;
            self.floor = 0;
            self.door = 0.0;
        }
    }

    // ── Per-tick updates (driver calls these in order) ────────────────────

    /// ① Refresh configuration-derived parameters.  Re-run every tick so
    /// runtime changes to speed, dwell, or tick rate apply immediately.
    pub fn refresh_params(&mut self, params: CarParams) {
        self.params = params;
    }

    /// ② Advance the state machine by at most one transition.
    ///
    /// Needs the request board to clear the satisfied call on arrival.
    pub fn step_state(&mut self, board: &mut RequestBoard) {
        if self.deactivated {
            self.state = CarState::Idle;
            return;
        }
        match self.state {
            CarState::Idle => {
                self.dwell_timer = 0;
                if self.open_pressed {
                    self.set_state(CarState::Opening);
                } else if self.any_stop() {
                    self.prev_stop = self.floor;
                    if self.select_next_stop() {
                        self.set_state(CarState::Moving);
                    }
                } else if self.occupancy > 0 {
                    // Never idle with passengers aboard.
                    self.set_state(CarState::Opening);
                }
            }
            CarState::IdleClosing => {
                if self.any_stop() {
                    // A target appeared mid-close: redirect into service.
                    self.set_state(CarState::Closing);
                } else if self.door <= 0.0 {
                    self.door = 0.0;
                    self.dwell_timer = 0;
                    self.set_state(CarState::Idle);
                } else if self.open_pressed {
                    self.dwell_timer = 0;
                    self.set_state(CarState::Opening);
                }
            }
            CarState::Open => {
                if self.open_pressed {
                    // Held open: dwell restarts from scratch.
                    self.dwell_timer = 0;
                } else if self.close_pressed {
                    self.set_state(CarState::Closing);
                } else if self.dwell_timer >= self.params.dwell_ticks() {
                    if self.any_stop() {
                        self.set_state(CarState::Closing);
                    } else {
                        self.set_state(CarState::IdleClosing);
                    }
                }
            }
            CarState::Opening => {
                self.dwell_timer = 0;
                if self.door >= 1.0 {
                    self.door = 1.0;
                    self.set_state(CarState::Open);
                }
            }
            CarState::Closing => {
                if self.door <= 0.0 {
                    self.door = 0.0;
                    self.dwell_timer = 0;
                    self.set_state(CarState::Closed);
                } else if self.open_pressed {
                    self.dwell_timer = 0;
                    self.set_state(CarState::Opening);
                }
            }
            CarState::Closed => {
                if self.open_pressed {
                    self.dwell_timer = 0;
                    self.set_state(CarState::Opening);
                } else if self.dwell_timer >= self.params.dwell_ticks() / 2 {
                    self.prev_stop = self.floor;
                    if self.select_next_stop() {
                        self.set_state(CarState::Moving);
                    } else {
                        self.set_state(CarState::Idle);
                    }
                }
            }
            CarState::Moving => {
                if self.search_failed {
                    self.set_state(CarState::Idle);
                } else if let Some(stop) = self.current_stop {
                    if (self.position - stop as f32).abs() <= POS_EPSILON {
                        self.arrive(board);
                    }
                }
            }
        }
    }

    /// ③ Advance the dwell timer.
    pub fn step_timer(&mut self) {
        self.dwell_timer += 1;
    }

    /// ④ Advance the door fraction toward the state's resting point.
    pub fn step_door(&mut self) {
        match self.state {
            CarState::Opening => {
                self.door = (self.door + self.params.door_step()).min(1.0);
            }
            CarState::Closing | CarState::IdleClosing => {
                self.door = (self.door - self.params.door_step()).max(0.0);
            }
            _ => {}
        }
    }

    /// ⑤ Advance the continuous position along the ease curve.
    pub fn step_position(&mut self) {
        if self.state != CarState::Moving || self.search_failed {
            return;
        }
        match self.direction {
            Direction::Up => {
                self.floor = self.position.floor() as usize;
                let v = self.ascend_speed();
                self.position += v / self.params.tick_rate as f32;
            }
            Direction::Down => {
                self.floor = self.position.ceil() as usize;
                let v = self.descend_speed();
                self.position -= v / self.params.tick_rate as f32;
            }
            Direction::None => {}
        }
    }

    /// ⑥ Clear the direction wherever the car is free to go either way
    /// next: opening at a building extreme, or no stops left.
    pub fn step_direction(&mut self) {
        if self.floor == self.params.floor_count - 1 && self.state == CarState::Opening {
            self.direction = Direction::None;
        } else if self.floor == 0 && self.state == CarState::Opening {
            self.direction = Direction::None;
        } else if !self.any_stop() {
            self.direction = Direction::None;
        }
    }

    /// ⑦ Sweep the transient per-tick input flags.
    pub fn clear_flags(&mut self) {
        self.open_pressed = false;
        self.close_pressed = false;
        self.search_failed = false;
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn set_state(&mut self, next: CarState) {
        if self.state != next {
            debug!("car {}: {} -> {}", self.shaft, self.state, next);
        }
        self.state = next;
    }

    fn any_stop(&self) -> bool {
        self.stops.iter().any(|&b| b)
    }

    /// Pick the next stop in the committed direction.  On failure raises
    /// `search_failed`, which freezes movement this tick and lands the car
    /// in `Idle`.
    fn select_next_stop(&mut self) -> bool {
        let found = match self.direction {
            Direction::Up => (self.floor + 1..MAX_FLOORS).find(|&f| self.stops[f]),
            Direction::Down => (0..self.floor).rev().find(|&f| self.stops[f]),
            Direction::None => None,
        };
        match found {
            Some(f) => {
                self.current_stop = Some(f);
                true
            }
            None => {
                self.search_failed = true;
                warn!("car {}: no reachable stop going {}", self.shaft, self.direction);
                false
            }
        }
    }

    /// Arrival at the current stop: snap the position, clear the stop bit,
    /// start opening, and clear the satisfied call on the board.
    fn arrive(&mut self, board: &mut RequestBoard) {
        self.floor = self.position.round() as usize;
        // Re-tare the position so per-leg float error never accumulates.
        self.position = self.floor as f32;
        self.set_state(CarState::Opening);
        self.dwell_timer = 0;
        self.stops[self.floor] = false;
        self.current_stop = None;
        match self.direction {
            Direction::Up => board.clear_up(self.floor),
            Direction::Down => board.clear_down(self.floor),
            // An idle arrival clears nothing: the call direction is only
            // known once a passenger presses and commits the car.
            Direction::None => {}
        }
    }

    /// Ease-curve speed while ascending.  The interval between two floors
    /// splits at its midpoint: the lower half accelerates out of a standing
    /// start (only when departing the immediately preceding stop), the upper
    /// half decelerates into the final stop; everything else runs at the
    /// nominal speed.
    fn ascend_speed(&self) -> f32 {
        let s = self.params.car_speed;
        let mid_offset = self.position - self.floor as f32 - 0.5;
        if self.position < self.floor as f32 + 0.5 {
            if self.prev_stop == self.floor {
                1.1 * s - 4.0 * s * mid_offset * mid_offset
            } else {
                s
            }
        } else if self.current_stop == Some(self.floor + 1) {
            s - 4.0 * s * mid_offset * mid_offset
        } else {
            s
        }
    }

    /// Mirror of [`ascend_speed`][Self::ascend_speed] for descent.
    fn descend_speed(&self) -> f32 {
        let s = self.params.car_speed;
        let mid_offset = self.floor as f32 - self.position - 0.5;
        if self.position > self.floor as f32 - 0.5 {
            if self.prev_stop == self.floor {
                1.1 * s - 4.0 * s * mid_offset * mid_offset
            } else {
                s
            }
        } else if self.floor > 0 && self.current_stop == Some(self.floor - 1) {
            s - 4.0 * s * mid_offset * mid_offset
        } else {
            s
        }
    }
}
