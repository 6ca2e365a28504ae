//! Unit tests for the dispatch policies.
//!
//! Cars are driven into position with real ticks rather than constructed
//! mid-flight, so every scenario here is reachable in a live run.

use lift_board::RequestBoard;
use lift_car::{Car, CarParams};
use lift_core::Direction;

use crate::{dispatch, DispatchPolicy};

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
        "condition not reached after {max} ticks (state {}, pos {}, dir {})",
        car.state(),
        car.position(),
        car.direction()
    );
}

/// A car parked idle at `floor` with no committed direction, as it would be
/// after servicing that floor and letting the dwell elapse.
fn idle_car_at(shaft: usize, floor: usize, p: CarParams) -> Car {
    let mut car = Car::new(shaft);
    let mut board = RequestBoard::new();
    // Settle the factory direction before travelling.
    tick(&mut car, &mut board, p);
    if floor > 0 {
        car.hit_floor(floor);
        tick_until(&mut car, &mut board, p, 20_000, |c| {
            c.is_idle() && c.floor() == floor && c.direction().is_none()
        });
    }
    car
}

/// A car in flight from `from` to `to`, ticked until `pred` holds on it.
fn moving_car(
    shaft: usize,
    from: usize,
    to: usize,
    p: CarParams,
    pred: impl Fn(&Car) -> bool,
) -> Car {
    let mut car = idle_car_at(shaft, from, p);
    let mut board = RequestBoard::new();
    car.hit_floor(to);
    tick_until(&mut car, &mut board, p, 20_000, &pred);
    car
}

const ALL_POLICIES: [DispatchPolicy; 3] = [
    DispatchPolicy::Greedy,
    DispatchPolicy::Aggressive,
    DispatchPolicy::Balanced,
];

// ── Shared scan behavior ──────────────────────────────────────────────────────

mod scan {
    use super::*;

    #[test]
    fn assignment_marks_pending_and_sets_the_stop() {
        let p = params(6);
        let mut board = RequestBoard::new();
        let mut cars = vec![idle_car_at(0, 0, p)];

        board.press_up(3);
        let out = dispatch(DispatchPolicy::Greedy, &mut board, &mut cars, 6, 0.5);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].shaft, 0);
        assert_eq!(out[0].floor, 3);
        assert_eq!(out[0].direction, Direction::Up);
        assert!(board.is_pending_up(3));
        assert!(cars[0].has_stop(3));
    }

    #[test]
    fn pending_calls_are_never_reassigned() {
        let p = params(6);
        let mut board = RequestBoard::new();
        let mut cars = vec![idle_car_at(0, 0, p), idle_car_at(1, 0, p)];

        for policy in ALL_POLICIES {
            board.press_up(3);
            assert_eq!(dispatch(policy, &mut board, &mut cars, 6, 0.5).len(), 1);
            // The call stays lit but pending until a car arrives.
            assert!(board.up(3));
            assert!(dispatch(policy, &mut board, &mut cars, 6, 0.5).is_empty());
            board.clear_up(3);
        }
    }

    #[test]
    fn up_call_is_handled_before_the_down_call_at_the_same_floor() {
        let p = params(6);
        let mut board = RequestBoard::new();
        let mut cars = vec![idle_car_at(0, 0, p), idle_car_at(1, 5, p)];

        board.press_up(2);
        board.press_down(2);

        let first = dispatch(DispatchPolicy::Greedy, &mut board, &mut cars, 6, 0.5);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].direction, Direction::Up);
        assert!(!board.is_pending_down(2));

        let second = dispatch(DispatchPolicy::Greedy, &mut board, &mut cars, 6, 0.5);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].direction, Direction::Down);
    }

    #[test]
    fn full_cars_are_never_assigned() {
        let p = params(6);
        for policy in ALL_POLICIES {
            let mut board = RequestBoard::new();
            let mut car = idle_car_at(0, 0, p);
            for _ in 0..car.capacity() {
                assert!(car.board());
            }
            let mut cars = vec![car];

            board.press_up(3);
            assert!(dispatch(policy, &mut board, &mut cars, 6, 0.5).is_empty());
            assert!(!board.is_pending_up(3));
        }
    }

    #[test]
    fn deactivated_cars_are_never_assigned() {
        let p = params(6);
        for policy in ALL_POLICIES {
            let mut board = RequestBoard::new();
            let mut car = idle_car_at(0, 0, p);
            car.deactivate();
            let mut cars = vec![car];

            board.press_up(3);
            assert!(dispatch(policy, &mut board, &mut cars, 6, 0.5).is_empty());
        }
    }

    #[test]
    fn ground_floor_call_goes_to_the_car_already_parked_there() {
        let p = params(6);
        let mut board = RequestBoard::new();
        // Shaft 0 is parked upstairs; shaft 1 sits at the ground floor.
        let mut cars = vec![idle_car_at(0, 4, p), idle_car_at(1, 0, p)];

        board.press_up(0);
        let out = dispatch(DispatchPolicy::Greedy, &mut board, &mut cars, 6, 0.5);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].shaft, 1);
    }
}

// ── Greedy vs. aggressive ─────────────────────────────────────────────────────

mod greedy_aggressive {
    use super::*;

    /// Shaft 0 idle at floor 2, shaft 1 in flight upward well below floor 3.
    fn contrast_fleet(p: CarParams) -> Vec<Car> {
        let idle = idle_car_at(0, 2, p);
        let moving = moving_car(1, 0, 5, p, |c| c.position() >= 1.2 && c.position() < 2.0);
        assert_eq!(moving.direction(), Direction::Up);
        vec![idle, moving]
    }

    #[test]
    fn greedy_prefers_the_moving_car() {
        let p = params(6);
        let mut board = RequestBoard::new();
        let mut cars = contrast_fleet(p);

        board.press_up(3);
        let out = dispatch(DispatchPolicy::Greedy, &mut board, &mut cars, 6, 0.5);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].shaft, 1);
    }

    #[test]
    fn aggressive_prefers_the_idle_car() {
        let p = params(6);
        let mut board = RequestBoard::new();
        let mut cars = contrast_fleet(p);

        board.press_up(3);
        let out = dispatch(DispatchPolicy::Aggressive, &mut board, &mut cars, 6, 0.5);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].shaft, 0);
    }

    #[test]
    fn a_moving_car_too_close_to_the_call_is_skipped() {
        let p = params(6);
        let mut board = RequestBoard::new();
        // In flight upward past 2.6: floor 3 is inside the catch threshold.
        let idle = idle_car_at(0, 0, p);
        let moving = moving_car(1, 0, 5, p, |c| c.position() > 2.6);
        let mut cars = vec![idle, moving];

        board.press_up(3);
        let out = dispatch(DispatchPolicy::Greedy, &mut board, &mut cars, 6, 0.5);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].shaft, 0);
    }

    #[test]
    fn down_call_greedy_catches_the_descending_car() {
        let p = params(6);
        let mut board = RequestBoard::new();
        let idle = idle_car_at(0, 0, p);
        let moving = moving_car(1, 5, 0, p, |c| c.position() < 4.3 && c.position() > 3.6);
        assert_eq!(moving.direction(), Direction::Down);
        let mut cars = vec![idle, moving];

        board.press_down(3);
        let out = dispatch(DispatchPolicy::Greedy, &mut board, &mut cars, 6, 0.5);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].shaft, 1);
        assert!(cars[1].has_stop(3));
    }
}

// ── Balanced ──────────────────────────────────────────────────────────────────

mod balanced {
    use super::*;

    #[test]
    fn descending_car_beats_a_nearer_idle_car_on_a_down_call() {
        let p = params(6);
        let mut board = RequestBoard::new();
        // Idle at 3 scores 3 - 3 + 0.5 = 0.5; the descending car around 4.2
        // scores 3 - 4.2 < 0 and wins outright.
        let idle = idle_car_at(0, 3, p);
        let moving = moving_car(1, 5, 0, p, |c| c.position() < 4.25 && c.position() > 3.6);
        let mut cars = vec![idle, moving];

        board.press_down(3);
        let out = dispatch(DispatchPolicy::Balanced, &mut board, &mut cars, 6, 0.5);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].shaft, 1);
    }

    #[test]
    fn idle_car_wins_once_the_descending_car_is_past_the_catch_window() {
        let p = params(6);
        let mut board = RequestBoard::new();
        // Below 3.5 the descending car can no longer brake for floor 3.
        let idle = idle_car_at(0, 3, p);
        let moving = moving_car(1, 5, 0, p, |c| c.position() < 3.4 && c.position() > 3.0);
        let mut cars = vec![idle, moving];

        board.press_down(3);
        let out = dispatch(DispatchPolicy::Balanced, &mut board, &mut cars, 6, 0.5);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].shaft, 0);
    }

    #[test]
    fn up_call_goes_to_the_lowest_score() {
        let p = params(6);
        let mut board = RequestBoard::new();
        // Idle at 3 scores 4 - 3 + 0.5 = 1.5; the ascending car around 1.8
        // scores 4 - 1.8 = 2.2.  Distance decides upward calls.
        let idle = idle_car_at(0, 3, p);
        let moving = moving_car(1, 0, 5, p, |c| c.position() >= 1.8 && c.position() < 2.0);
        let mut cars = vec![idle, moving];

        board.press_up(4);
        let out = dispatch(DispatchPolicy::Balanced, &mut board, &mut cars, 6, 0.5);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].shaft, 0);
    }

    /// The up and down branches are not mirrors: an ascending car competes
    /// on plain distance, a descending car's negative score preempts every
    /// idle car regardless of distance.
    #[test]
    fn down_scoring_is_asymmetric_to_up_scoring() {
        let p = params(8);

        // Up call at 6: ascending car at ~1.8 (distance 4.2) loses to the
        // idle car at 5 (distance 1, score 1.5).
        let mut board = RequestBoard::new();
        let mut cars = vec![
            idle_car_at(0, 5, p),
            moving_car(1, 0, 7, p, |c| c.position() >= 1.8 && c.position() < 2.0),
        ];
        board.press_up(6);
        let up = dispatch(DispatchPolicy::Balanced, &mut board, &mut cars, 8, 0.5);
        assert_eq!(up[0].shaft, 0);

        // Down call at 1: descending car at ~6.2 (distance 5.2) still beats
        // the idle car at 2 (distance 1).
        let mut board = RequestBoard::new();
        let mut cars = vec![
            idle_car_at(0, 2, p),
            moving_car(1, 7, 0, p, |c| c.position() < 6.25 && c.position() > 5.6),
        ];
        board.press_down(1);
        let down = dispatch(DispatchPolicy::Balanced, &mut board, &mut cars, 8, 0.5);
        assert_eq!(down[0].shaft, 1);
    }

    #[test]
    fn nearest_idle_car_wins_among_idle_cars() {
        let p = params(6);
        let mut board = RequestBoard::new();
        let mut cars = vec![idle_car_at(0, 0, p), idle_car_at(1, 4, p)];

        board.press_up(3);
        let out = dispatch(DispatchPolicy::Balanced, &mut board, &mut cars, 6, 0.5);
        assert_eq!(out[0].shaft, 1);
    }
}
