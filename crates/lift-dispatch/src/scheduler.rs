//! The per-tick assignment scan.

use lift_board::RequestBoard;
use lift_car::Car;
use lift_core::Direction;
use log::debug;

use crate::DispatchPolicy;

/// One call handed to one car this tick.
///
/// The driver reacts to each assignment by re-running every waiting
/// passenger's wait-shaft selection.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    pub shaft:     usize,
    pub floor:     usize,
    pub direction: Direction,
}

/// Run `policy` over every unassigned call and commit the chosen cars.
///
/// `cars` is the live prefix of the car arena (one entry per active shaft,
/// in shaft index order).  Tombstoned cars and cars at capacity are never
/// candidates.  Assignments made here become visible to car state machines
/// on the *next* tick — the car updates for this tick have already run.
pub fn dispatch(
    policy:          DispatchPolicy,
    board:           &mut RequestBoard,
    cars:            &mut [Car],
    floor_count:     usize,
    catch_threshold: f32,
) -> Vec<Assignment> {
    let mut assignments = Vec::new();

    for floor in 0..floor_count {
        if board.up(floor) && !board.is_pending_up(floor) {
            let chosen = match policy {
                DispatchPolicy::Greedy     => pick_up_greedy(cars, floor, catch_threshold),
                DispatchPolicy::Aggressive => pick_up_aggressive(cars, floor, catch_threshold),
                DispatchPolicy::Balanced   => pick_up_balanced(cars, floor, catch_threshold),
            };
            if let Some(shaft) = chosen {
                assignments.push(assign(board, cars, shaft, floor, Direction::Up));
            }
        } else if board.down(floor) && !board.is_pending_down(floor) {
            let chosen = match policy {
                DispatchPolicy::Greedy     => pick_down_greedy(cars, floor, catch_threshold),
                DispatchPolicy::Aggressive => pick_down_aggressive(cars, floor, catch_threshold),
                DispatchPolicy::Balanced   => pick_down_balanced(cars, floor, catch_threshold),
            };
            if let Some(shaft) = chosen {
                assignments.push(assign(board, cars, shaft, floor, Direction::Down));
            }
        }
    }

    assignments
}

fn assign(
    board:     &mut RequestBoard,
    cars:      &mut [Car],
    shaft:     usize,
    floor:     usize,
    direction: Direction,
) -> Assignment {
    match direction {
        Direction::Up   => board.mark_pending_up(floor),
        Direction::Down => board.mark_pending_down(floor),
        Direction::None => unreachable!("calls are always directed"),
    }
    cars[shaft].hit_floor(floor);
    debug!("car {shaft} assigned to floor {floor} : {direction}");
    Assignment { shaft, floor, direction }
}

// ── Eligibility predicates ────────────────────────────────────────────────────

/// Can this car take another passenger at all?
#[inline]
fn takeable(car: &Car) -> bool {
    !car.is_deactivated() && !car.is_full()
}

/// The idle-bootstrap case: a free car already parked at floor 0 takes the
/// ground-floor up call ahead of every other candidate.  There is no
/// symmetric top-floor case for down calls.
#[inline]
fn bootstraps_up(car: &Car, floor: usize) -> bool {
    floor == 0 && car.floor() == 0 && car.direction().is_none()
}

#[inline]
fn moving_up_toward(car: &Car, floor: usize, catch: f32) -> bool {
    car.direction() == Direction::Up && car.position() < floor as f32 - catch
}

#[inline]
fn moving_down_toward(car: &Car, floor: usize, catch: f32) -> bool {
    car.direction() == Direction::Down && car.position() > floor as f32 + catch
}

#[inline]
fn free(car: &Car) -> bool {
    car.direction().is_none()
}

/// First takeable car (in shaft order) matching each pass, pass-major.
fn scan(cars: &[Car], passes: &[&dyn Fn(&Car) -> bool]) -> Option<usize> {
    for pass in passes {
        for car in cars.iter() {
            if takeable(car) && pass(car) {
                return Some(car.shaft());
            }
        }
    }
    None
}

// ── Greedy: moving cars first, idle fallback ──────────────────────────────────

fn pick_up_greedy(cars: &[Car], floor: usize, catch: f32) -> Option<usize> {
    scan(cars, &[
        &|c: &Car| bootstraps_up(c, floor),
        &|c: &Car| moving_up_toward(c, floor, catch),
        &|c: &Car| free(c),
    ])
}

fn pick_down_greedy(cars: &[Car], floor: usize, catch: f32) -> Option<usize> {
    scan(cars, &[
        &|c: &Car| moving_down_toward(c, floor, catch),
        &|c: &Car| free(c),
    ])
}

// ── Aggressive: idle cars first, moving fallback ──────────────────────────────

fn pick_up_aggressive(cars: &[Car], floor: usize, catch: f32) -> Option<usize> {
    scan(cars, &[
        &|c: &Car| bootstraps_up(c, floor),
        &|c: &Car| free(c),
        &|c: &Car| moving_up_toward(c, floor, catch),
    ])
}

fn pick_down_aggressive(cars: &[Car], floor: usize, catch: f32) -> Option<usize> {
    scan(cars, &[
        &|c: &Car| free(c),
        &|c: &Car| moving_down_toward(c, floor, catch),
    ])
}

// ── Balanced: score every eligible car, lowest wins ───────────────────────────

fn pick_up_balanced(cars: &[Car], floor: usize, catch: f32) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for car in cars.iter().filter(|c| takeable(c)) {
        let score = if moving_up_toward(car, floor, catch) {
            floor as f32 - car.position()
        } else if free(car) {
            // Idle handicap: a moving car wins ties against an idle one.
            floor as f32 - car.position() + 0.5
        } else {
            continue;
        };
        if best.is_none_or(|(_, s)| score < s) {
            best = Some((car.shaft(), score));
        }
    }
    best.map(|(shaft, _)| shaft)
}

/// Down-call scoring is deliberately not a mirror of the up branch: an
/// eligible moving-down car scores `floor - position`, which is *negative*,
/// so it beats any idle car by construction rather than merely on ties.
/// Pinned by the `down_scoring_is_asymmetric_to_up_scoring` test.
fn pick_down_balanced(cars: &[Car], floor: usize, catch: f32) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for car in cars.iter().filter(|c| takeable(c)) {
        let score = if moving_down_toward(car, floor, catch) {
            floor as f32 - car.position()
        } else if free(car) {
            floor as f32 - car.position() + 0.5
        } else {
            continue;
        };
        if best.is_none_or(|(_, s)| score < s) {
            best = Some((car.shaft(), score));
        }
    }
    best.map(|(shaft, _)| shaft)
}
