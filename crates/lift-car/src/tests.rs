//! Unit tests for the car state machine and kinematics.

use lift_board::RequestBoard;
use lift_core::Direction;

use crate::{Car, CarParams, CarState};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn params(floor_count: usize) -> CarParams {
    CarParams {
        floor_count,
        ..CarParams::default()
    }
}

/// One full car update in driver order (steps ①–⑦).
fn tick(car: &mut Car, board: &mut RequestBoard, p: CarParams) {
    car.refresh_params(p);
    car.step_state(board);
    car.step_timer();
    car.step_door();
    car.step_position();
    car.step_direction();
    car.clear_flags();
}

/// Tick until `pred` holds or `max` ticks elapse; panics on timeout.
fn tick_until(
    car: &mut Car,
    board: &mut RequestBoard,
    p: CarParams,
    max: usize,
    pred: impl Fn(&Car) -> bool,
) {
    for _ in 0..max {
        if pred(car) {
            return;
        }
        tick(car, board, p);
    }
    panic!(
        "condition not reached after {max} ticks (state {}, pos {}, door {})",
        car.state(),
        car.position(),
        car.door()
    );
}

// ── Doors and dwell ───────────────────────────────────────────────────────────

#[cfg(test)]
mod doors {
    use super::*;

    #[test]
    fn open_press_opens_fully_then_dwells() {
        let mut car = Car::new(0);
        let mut board = RequestBoard::new();
        let p = params(4);

        car.open_press();
        tick(&mut car, &mut board, p);
        assert_eq!(car.state(), CarState::Opening);

        tick_until(&mut car, &mut board, p, 200, |c| c.state() == CarState::Open);
        assert_eq!(car.door(), 1.0);
    }

    #[test]
    fn dwell_elapses_into_idle_when_no_stops() {
        let mut car = Car::new(0);
        let mut board = RequestBoard::new();
        let p = params(4);

        car.open_press();
        tick_until(&mut car, &mut board, p, 200, |c| c.state() == CarState::Open);
        // Dwell is 5 s at 24 ticks/s; well under 500 ticks to close and idle.
        tick_until(&mut car, &mut board, p, 500, |c| c.state() == CarState::Idle);
        assert_eq!(car.door(), 0.0);
    }

    #[test]
    fn open_press_reopens_a_closing_door() {
        let mut car = Car::new(0);
        let mut board = RequestBoard::new();
        let p = params(4);

        car.open_press();
        tick_until(&mut car, &mut board, p, 200, |c| c.state() == CarState::Open);
        tick_until(&mut car, &mut board, p, 500, |c| c.state() == CarState::IdleClosing);

        car.open_press();
        tick(&mut car, &mut board, p);
        assert_eq!(car.state(), CarState::Opening);
    }

    #[test]
    fn door_fraction_always_in_bounds() {
        let mut car = Car::new(0);
        let mut board = RequestBoard::new();
        let p = params(4);

        car.hit_floor(3);
        for _ in 0..2000 {
            tick(&mut car, &mut board, p);
            assert!((0.0..=1.0).contains(&car.door()), "door {}", car.door());
        }
    }

    #[test]
    fn held_open_never_times_out() {
        let mut car = Car::new(0);
        let mut board = RequestBoard::new();
        let p = params(4);

        car.open_press();
        tick_until(&mut car, &mut board, p, 200, |c| c.state() == CarState::Open);
        // Hold the door for far longer than the dwell.
        for _ in 0..p.dwell_ticks() * 3 {
            car.open_press();
            tick(&mut car, &mut board, p);
            assert_eq!(car.state(), CarState::Open);
        }
    }
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod movement {
    use super::*;

    #[test]
    fn travels_to_a_pressed_floor_and_opens() {
        let mut car = Car::new(0);
        let mut board = RequestBoard::new();
        let p = params(4);

        board.press_up(2);
        car.hit_floor(2);
        assert_eq!(car.direction(), Direction::Up);

        tick_until(&mut car, &mut board, p, 2000, |c| {
            c.floor() == 2 && c.state() == CarState::Open
        });
        assert_eq!(car.position(), 2.0);
        assert!(!car.has_stop(2));
        // The satisfied up call was cleared on arrival.
        assert!(!board.up(2));
    }

    #[test]
    fn position_is_monotone_per_leg() {
        let mut car = Car::new(0);
        let mut board = RequestBoard::new();
        let p = params(4);

        car.hit_floor(3);
        tick_until(&mut car, &mut board, p, 500, |c| c.state() == CarState::Moving);

        let mut prev = car.position();
        while car.state() == CarState::Moving {
            tick(&mut car, &mut board, p);
            assert!(car.position() >= prev, "reversal: {} -> {}", prev, car.position());
            prev = car.position();
        }
        assert_eq!(car.floor(), 3);
    }

    #[test]
    fn canonical_floor_rounds_with_travel_direction() {
        let mut car = Car::new(0);
        let mut board = RequestBoard::new();
        let p = params(4);

        car.hit_floor(3);
        tick_until(&mut car, &mut board, p, 2000, |c| c.position() > 1.2 && c.position() < 1.9);
        // Ascending: floor is the one below the car.
        assert_eq!(car.floor(), 1);

        tick_until(&mut car, &mut board, p, 2000, |c| c.floor() == 3 && c.state() == CarState::Open);
        tick_until(&mut car, &mut board, p, 2000, |c| c.is_idle());
        car.hit_floor(0);
        tick_until(&mut car, &mut board, p, 2000, |c| c.position() > 1.2 && c.position() < 1.9);
        // Descending: floor is the one above the car.
        assert_eq!(car.floor(), 2);
    }

    #[test]
    fn intermediate_floor_is_taken_at_nominal_speed() {
        // A 6-floor run: the curve only shapes the first and last interval.
        let mut car = Car::new(0);
        let mut board = RequestBoard::new();
        let p = params(8);

        car.hit_floor(5);
        tick_until(&mut car, &mut board, p, 500, |c| c.state() == CarState::Moving);

        let nominal = p.car_speed / p.tick_rate as f32;
        let mut mid_deltas = Vec::new();
        let mut prev = car.position();
        while car.state() == CarState::Moving {
            tick(&mut car, &mut board, p);
            let pos = car.position();
            if (2.1..3.9).contains(&pos) {
                mid_deltas.push(pos - prev);
            }
            prev = pos;
        }
        assert!(!mid_deltas.is_empty());
        for d in mid_deltas {
            assert!((d - nominal).abs() < 1e-4, "mid-leg step {d} vs nominal {nominal}");
        }
    }

    #[test]
    fn direction_clears_at_the_extremes() {
        let mut car = Car::new(0);
        let mut board = RequestBoard::new();
        let p = params(3);

        car.hit_floor(2);
        tick_until(&mut car, &mut board, p, 2000, |c| c.floor() == 2 && c.state() == CarState::Open);
        // Opened at the top floor: free to go either way.
        assert_eq!(car.direction(), Direction::None);
    }
}

// ── Stop acceptance ───────────────────────────────────────────────────────────

#[cfg(test)]
mod stops {
    use super::*;

    #[test]
    fn idle_car_accepts_any_floor_and_turns_toward_it() {
        let mut car = Car::new(0);
        car.hit_floor(3);
        assert!(car.has_stop(3));
        assert_eq!(car.direction(), Direction::Up);
    }

    #[test]
    fn moving_car_rejects_stops_behind_or_too_close() {
        let mut car = Car::new(0);
        let mut board = RequestBoard::new();
        let p = params(6);

        car.hit_floor(5);
        // Let it get past floor 2.
        tick_until(&mut car, &mut board, p, 2000, |c| c.position() > 2.0);

        car.hit_floor(1); // behind
        assert!(!car.has_stop(1));

        // Closer than the catch threshold (0.5) ahead of the position.
        let too_close = car.position().ceil() as usize;
        if (too_close as f32) < car.position() + p.catch_threshold {
            car.hit_floor(too_close);
            assert!(!car.has_stop(too_close));
        }
    }

    #[test]
    fn moving_car_accepts_a_floor_far_enough_ahead() {
        let mut car = Car::new(0);
        let mut board = RequestBoard::new();
        let p = params(8);

        car.hit_floor(5);
        tick_until(&mut car, &mut board, p, 2000, |c| {
            c.state() == CarState::Moving && c.position() > 0.2
        });
        car.hit_floor(3); // well past position + 0.5
        assert!(car.has_stop(3));

        // The leg in flight is not re-targeted: the car completes its run to
        // 5 and keeps the late stop on its panel.
        tick_until(&mut car, &mut board, p, 4000, |c| c.state() == CarState::Open);
        assert_eq!(car.floor(), 5);
        assert!(car.has_stop(3));
    }

    #[test]
    fn closed_car_departs_to_the_nearest_stop_ahead() {
        // A stop accepted before departure is serviced first.
        let mut car = Car::new(0);
        let mut board = RequestBoard::new();
        let p = params(8);

        car.hit_floor(5);
        car.hit_floor(3);
        assert!(car.has_stop(3) && car.has_stop(5));

        tick_until(&mut car, &mut board, p, 4000, |c| c.state() == CarState::Open);
        assert_eq!(car.floor(), 3);
        assert!(car.has_stop(5));
        assert_eq!(car.direction(), Direction::Up);
    }

    #[test]
    fn own_floor_request_reopens_instead_of_moving() {
        let mut car = Car::new(0);
        let mut board = RequestBoard::new();
        let p = params(4);

        car.hit_floor(0);
        tick(&mut car, &mut board, p);
        assert_eq!(car.state(), CarState::Opening);
        assert!(!car.has_stop(0));
    }

}

// ── Boarding and capacity ─────────────────────────────────────────────────────

#[cfg(test)]
mod capacity {
    use super::*;

    #[test]
    fn board_refuses_at_capacity() {
        let mut car = Car::new(0);
        car.refresh_params(CarParams { capacity: 2, ..params(4) });

        assert!(car.board());
        assert!(car.board());
        assert!(!car.board());
        assert_eq!(car.occupancy(), 2);
        assert!(car.is_full());
        assert!(!car.can_board());

        car.unboard();
        assert!(car.can_board());
    }

    #[test]
    fn stays_full_after_a_capacity_cut() {
        let mut car = Car::new(0);
        car.refresh_params(CarParams { capacity: 2, ..params(4) });
        assert!(car.board());
        assert!(car.board());

        // Capacity is halved mid-run: the over-occupied car must still
        // read as full until enough riders leave.
        car.refresh_params(CarParams { capacity: 1, ..params(4) });
        assert!(car.is_full());
        assert!(!car.can_board());
        assert!(!car.board());

        car.unboard();
        assert!(car.is_full());
        car.unboard();
        assert!(car.can_board());
    }

    #[test]
    fn occupancy_never_underflows() {
        let mut car = Car::new(0);
        car.unboard();
        assert_eq!(car.occupancy(), 0);
    }

    #[test]
    fn never_idles_with_passengers_aboard() {
        let mut car = Car::new(0);
        let mut board = RequestBoard::new();
        let p = params(4);

        assert!(car.board());
        // No stops, no presses — the defensive transition must reopen.
        tick(&mut car, &mut board, p);
        assert_eq!(car.state(), CarState::Opening);
    }
}

// ── Deactivation and resize repair ────────────────────────────────────────────

#[cfg(test)]
mod lifecycle {
    use super::*;

    #[test]
    fn deactivated_car_is_pinned_idle_and_deaf() {
        let mut car = Car::new(1);
        let mut board = RequestBoard::new();
        let p = params(4);

        car.deactivate();
        car.hit_floor(3);
        car.open_press();
        for _ in 0..50 {
            tick(&mut car, &mut board, p);
            assert_eq!(car.state(), CarState::Idle);
        }
        assert!(!car.has_stop(3));
        assert!(car.is_deactivated());
    }

    #[test]
    fn stranded_car_resets_to_ground() {
        let mut car = Car::new(0);
        let mut board = RequestBoard::new();
        let p = params(6);

        car.hit_floor(5);
        tick_until(&mut car, &mut board, p, 4000, |c| c.floor() == 5);

        // Building shrinks to 3 floors: position 5.0 > new top 2.
        car.validate_floor(3);
        assert_eq!(car.position(), 0.0);
        assert_eq!(car.floor(), 0);
        assert_eq!(car.state(), CarState::Opening);
        assert_eq!(car.door(), 0.0);
    }

    #[test]
    fn in_flight_leg_is_redirected_to_the_new_top() {
        let mut car = Car::new(0);
        let mut board = RequestBoard::new();
        let p = params(6);

        car.hit_floor(5);
        tick_until(&mut car, &mut board, p, 2000, |c| {
            c.state() == CarState::Moving && c.position() > 0.5 && c.position() < 1.0
        });

        // Floor 5 disappears; the car is still below the new top.
        car.validate_floor(4);
        assert!(!car.has_stop(5));
        let p4 = params(4);
        tick_until(&mut car, &mut board, p4, 4000, |c| c.state() == CarState::Open);
        assert_eq!(car.floor(), 3);
    }
}
