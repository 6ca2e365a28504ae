//! The `Simulation` struct and its tick loop.

use lift_agent::{Agent, SpawnParams};
use log::debug;
use lift_board::RequestBoard;
use lift_car::Car;
use lift_core::{Direction, LiftError, LiftResult, SimRng, MAX_AGENTS, MAX_FLOORS, MAX_SHAFTS};
use lift_dispatch::dispatch;

use crate::snapshot::{AgentSnapshot, CarSnapshot, FloorSnapshot, SimSnapshot, SimStats};
use crate::{NoopObserver, SimConfig, SimObserver, SpawnRate};

/// The elevator bank, the passengers, and the clock.
///
/// All state lives here and is updated strictly in tick order; nothing holds
/// a reference back into the simulation between ticks.  Cars are indexed by
/// shaft and the vector never shrinks: removing a shaft tombstones its car
/// in place so every surviving shaft keeps its index.  Agent slots are
/// reused first-free, so a slot index identifies an agent only while it
/// stays active.
pub struct Simulation {
    config: SimConfig,
    board:  RequestBoard,
    /// Index == shaft.  `config.shafts` is the live prefix; anything past it
    /// is a tombstone from a removed shaft.
    cars:   Vec<Car>,
    agents: Vec<Option<Agent>>,
    rng:    SimRng,

    tick:        u64,
    spawn_timer: u32,

    completed_agents: u64,
    total_life_ticks: u64,
}

impl Simulation {
    pub fn new(config: SimConfig) -> LiftResult<Self> {
        config.validate()?;
        let cars = (0..config.shafts).map(Car::new).collect();
        Ok(Self {
            rng: SimRng::new(config.seed),
            config,
            board: RequestBoard::new(),
            cars,
            agents: Vec::new(),
            tick: 0,
            spawn_timer: 0,
            completed_agents: 0,
            total_life_ticks: 0,
        })
    }

    // ── Read access ───────────────────────────────────────────────────────

    #[inline]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[inline]
    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    #[inline]
    pub fn board(&self) -> &RequestBoard {
        &self.board
    }

    /// The live cars, in shaft order (tombstones excluded).
    #[inline]
    pub fn cars(&self) -> &[Car] {
        &self.cars[..self.config.shafts]
    }

    #[inline]
    pub fn agent(&self, slot: usize) -> Option<&Agent> {
        self.agents.get(slot).and_then(|s| s.as_ref())
    }

    pub fn active_agents(&self) -> usize {
        self.agents.iter().filter(|s| s.is_some()).count()
    }

    pub fn stats(&self) -> SimStats {
        let average_life_secs = if self.completed_agents > 0 {
            self.total_life_ticks as f32
                / (self.completed_agents as f32 * self.config.tick_rate as f32)
        } else {
            0.0
        };
        SimStats {
            active_agents:    self.active_agents(),
            completed_agents: self.completed_agents,
            total_life_ticks: self.total_life_ticks,
            average_life_secs,
        }
    }

    /// Copy the whole world out as plain data.
    pub fn snapshot(&self) -> SimSnapshot {
        SimSnapshot {
            tick:   self.tick,
            floors: self.config.floors,
            shafts: self.config.shafts,
            cars:   self
                .cars()
                .iter()
                .map(|c| CarSnapshot {
                    shaft:       c.shaft(),
                    state:       c.state(),
                    direction:   c.direction(),
                    position:    c.position(),
                    floor:       c.floor(),
                    door:        c.door(),
                    occupancy:   c.occupancy(),
                    capacity:    c.capacity(),
                    deactivated: c.is_deactivated(),
                })
                .collect(),
            floor_calls: (0..self.config.floors)
                .map(|f| FloorSnapshot {
                    up:           self.board.up(f),
                    down:         self.board.down(f),
                    pending_up:   self.board.is_pending_up(f),
                    pending_down: self.board.is_pending_down(f),
                })
                .collect(),
            agents: self
                .agents
                .iter()
                .flatten()
                .map(|a| AgentSnapshot {
                    state:   a.state(),
                    xpos:    a.xpos(),
                    ypos:    a.ypos(),
                    boarded: a.is_boarded(),
                    active:  true,
                    color:   a.color(),
                })
                .collect(),
            stats: self.stats(),
        }
    }

    // ── The tick loop ─────────────────────────────────────────────────────

    /// Advance the world by one tick.
    pub fn tick(&mut self) {
        self.tick_with(&mut NoopObserver);
    }

    /// Advance the world by one tick, reporting through `observer`.
    pub fn tick_with<O: SimObserver>(&mut self, observer: &mut O) {
        observer.on_tick_start(self.tick);
        let params = self.config.car_params();
        let shafts = self.config.shafts;
        let floors = self.config.floors;
        let tick_rate = self.config.tick_rate;

        // Impossible calls (up at the top, down at the ground) and flags
        // left stale by a resize are swept before anything reads the board.
        self.board.enforce_extremes(floors);

        for car in self.cars.iter_mut() {
            car.refresh_params(params);
            car.step_state(&mut self.board);
            car.step_timer();
            car.step_door();
            car.step_position();
            car.step_direction();
            if car.search_failed() {
                observer.on_search_failure(self.tick, car.shaft());
            }
            car.clear_flags();
        }

        for slot in self.agents.iter_mut() {
            if let Some(agent) = slot {
                if let Some(life) = agent.update_state(&mut self.cars, shafts, tick_rate) {
                    self.completed_agents += 1;
                    self.total_life_ticks += u64::from(life);
                    observer.on_agent_completed(self.tick, life);
                    *slot = None;
                    continue;
                }
                agent.update_pos(&mut self.cars, &mut self.board, shafts, tick_rate);
            }
        }

        self.step_spawner();

        let assignments = dispatch(
            self.config.policy,
            &mut self.board,
            &mut self.cars[..shafts],
            floors,
            self.config.catch_threshold,
        );
        for assignment in assignments {
            observer.on_assignment(self.tick, assignment);
            // A fresh assignment can change which door will open first, so
            // every waiting agent re-picks its shaft.
            for agent in self.agents.iter_mut().flatten() {
                agent.update_wait_shaft(&self.cars, shafts, floors);
            }
        }

        // Calls answered by a fully open car come off the board.  A car with
        // no committed direction clears nothing: which call it satisfies is
        // only known once a boarding passenger sets its direction.
        for car in self.cars[..shafts].iter() {
            if car.door() >= 1.0 {
                match car.direction() {
                    Direction::Up => self.board.clear_up(car.floor()),
                    Direction::Down => self.board.clear_down(car.floor()),
                    Direction::None => {}
                }
            }
        }

        observer.on_tick_end(self.tick);
        self.tick += 1;
    }

    // ── Manual inputs ─────────────────────────────────────────────────────

    /// Press the up call button at `floor`.
    pub fn press_up(&mut self, floor: usize) -> LiftResult<()> {
        self.check_floor(floor)?;
        self.board.press_up(floor);
        Ok(())
    }

    /// Press the down call button at `floor`.
    pub fn press_down(&mut self, floor: usize) -> LiftResult<()> {
        self.check_floor(floor)?;
        self.board.press_down(floor);
        Ok(())
    }

    /// Press a floor button on the in-car panel of `shaft`.
    pub fn manual_hit_floor(&mut self, shaft: usize, floor: usize) -> LiftResult<()> {
        self.check_shaft(shaft)?;
        self.check_floor(floor)?;
        self.cars[shaft].hit_floor(floor);
        Ok(())
    }

    /// Press the open-doors button of `shaft`.
    pub fn manual_open(&mut self, shaft: usize) -> LiftResult<()> {
        self.check_shaft(shaft)?;
        self.cars[shaft].open_press();
        Ok(())
    }

    /// Press the close-doors button of `shaft`.
    pub fn manual_close(&mut self, shaft: usize) -> LiftResult<()> {
        self.check_shaft(shaft)?;
        self.cars[shaft].close_press();
        Ok(())
    }

    // ── Spawning ──────────────────────────────────────────────────────────

    /// Spawn a random passenger.  Returns its slot, or `None` when the
    /// agent cap is reached.
    pub fn spawn_agent(&mut self) -> Option<usize> {
        let params = SpawnParams::sample(&mut self.rng, self.config.floors);
        self.insert_agent(params)
    }

    /// Spawn a passenger with pinned parameters (the deterministic form for
    /// tests and external drivers).  Returns its slot, or `Ok(None)` when
    /// the agent cap is reached.
    pub fn spawn_agent_with(&mut self, params: SpawnParams) -> LiftResult<Option<usize>> {
        self.check_floor(params.initial_floor)?;
        self.check_floor(params.target_floor)?;
        if params.initial_floor == params.target_floor {
            return Err(LiftError::InvalidConfig(
                "spawn floors must be distinct".into(),
            ));
        }
        Ok(self.insert_agent(params))
    }

    // ── Building resizes ──────────────────────────────────────────────────

    /// Add a floor on top.
    pub fn add_floor(&mut self) -> LiftResult<()> {
        if self.config.floors >= MAX_FLOORS {
            return Err(LiftError::InvalidConfig(format!(
                "floor limit of {MAX_FLOORS} reached"
            )));
        }
        self.config.floors += 1;
        debug!("building: floor added, {} total", self.config.floors);
        Ok(())
    }

    /// Remove the top floor.  Every car and agent referencing it is
    /// repaired in place.
    pub fn remove_floor(&mut self) -> LiftResult<()> {
        if self.config.floors <= 2 {
            return Err(LiftError::InvalidConfig(
                "a building keeps at least two floors".into(),
            ));
        }
        self.config.floors -= 1;
        let floors = self.config.floors;
        self.board.enforce_extremes(floors);
        for car in self.cars.iter_mut() {
            car.validate_floor(floors);
        }
        for agent in self.agents.iter_mut().flatten() {
            agent.validate_floor(floors, &mut self.rng);
        }
        debug!("building: floor removed, {floors} total");
        Ok(())
    }

    /// Add a shaft on the right, with a fresh car parked at the ground
    /// floor.
    pub fn add_shaft(&mut self) -> LiftResult<()> {
        if self.config.shafts >= MAX_SHAFTS {
            return Err(LiftError::InvalidConfig(format!(
                "shaft limit of {MAX_SHAFTS} reached"
            )));
        }
        let shaft = self.config.shafts;
        if shaft < self.cars.len() {
            // Re-adding a removed shaft replaces its tombstone.
            self.cars[shaft] = Car::new(shaft);
        } else {
            self.cars.push(Car::new(shaft));
        }
        self.config.shafts += 1;
        debug!("building: shaft {shaft} added, {} total", self.config.shafts);
        Ok(())
    }

    /// Remove the rightmost shaft.  Its car is tombstoned in place and
    /// every agent referencing it is repaired.
    pub fn remove_shaft(&mut self) -> LiftResult<()> {
        if self.config.shafts <= 1 {
            return Err(LiftError::InvalidConfig(
                "a bank keeps at least one shaft".into(),
            ));
        }
        self.config.shafts -= 1;
        let shafts = self.config.shafts;
        self.cars[shafts].deactivate();
        for agent in self.agents.iter_mut().flatten() {
            agent.validate_shaft(shafts);
        }
        debug!("building: shaft {shafts} removed, {shafts} remaining");
        Ok(())
    }

    /// Apply a whole new configuration to the live simulation.  Dimension
    /// changes go through the same add/remove paths as the incremental
    /// operations; the RNG keeps its stream (`seed` only matters at
    /// construction).
    pub fn configure(&mut self, config: SimConfig) -> LiftResult<()> {
        config.validate()?;
        while self.config.floors < config.floors {
            self.add_floor()?;
        }
        while self.config.floors > config.floors {
            self.remove_floor()?;
        }
        while self.config.shafts < config.shafts {
            self.add_shaft()?;
        }
        while self.config.shafts > config.shafts {
            self.remove_shaft()?;
        }
        self.config = SimConfig {
            seed: self.config.seed,
            ..config
        };
        Ok(())
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn check_floor(&self, floor: usize) -> LiftResult<()> {
        if floor < self.config.floors {
            Ok(())
        } else {
            Err(LiftError::FloorOutOfRange {
                floor,
                count: self.config.floors,
            })
        }
    }

    fn check_shaft(&self, shaft: usize) -> LiftResult<()> {
        if shaft < self.config.shafts {
            Ok(())
        } else {
            Err(LiftError::ShaftOutOfRange {
                shaft,
                count: self.config.shafts,
            })
        }
    }

    fn insert_agent(&mut self, params: SpawnParams) -> Option<usize> {
        if self.active_agents() >= self.config.max_agents {
            return None;
        }
        let agent = Agent::new(params, self.config.shafts);
        let slot = if let Some(slot) = self.agents.iter().position(|s| s.is_none()) {
            self.agents[slot] = Some(agent);
            slot
        } else if self.agents.len() < MAX_AGENTS {
            self.agents.push(Some(agent));
            self.agents.len() - 1
        } else {
            return None;
        };
        debug!(
            "agent {slot}: spawned, floor {} -> {}",
            params.initial_floor, params.target_floor
        );
        Some(slot)
    }

    fn step_spawner(&mut self) {
        let Some(rate) = self.config.spawn_rate else {
            return;
        };
        let threshold = match rate {
            SpawnRate::AgentsPerSec(n) if n > 0 => self.config.tick_rate / n,
            SpawnRate::SecsPerAgent(n) if n > 0 => n * self.config.tick_rate,
            _ => return,
        };
        if self.spawn_timer >= threshold {
            self.spawn_agent();
            self.spawn_timer = 0;
        }
        self.spawn_timer += 1;
    }
}
