//! Integration test: PID controller closing the loop around the first-order
//! plant, stepped by hand with one-step-delayed feedback.

use pct_controls::{FirstOrderProcess, PidController, PidGains};
use pct_core::{Tolerances, nearly_equal};
use proptest::prelude::*;

fn tol() -> Tolerances {
    Tolerances {
        abs: 1e-9,
        rel: 1e-9,
    }
}

/// One loop iteration: measure, compute, then step the plant.
fn loop_step(pid: &mut PidController, plant: &mut FirstOrderProcess, setpoint: f64) -> (f64, f64) {
    let control = pid.compute(setpoint, plant.output());
    let output = plant.step(control);
    (control, output)
}

#[test]
fn proportional_loop_reference_values() {
    let mut plant = FirstOrderProcess::new(1.0, 5.0, 0.1).unwrap();
    let mut pid = PidController::new(PidGains::proportional(2.0), 0.1).unwrap();

    let (u1, y1) = loop_step(&mut pid, &mut plant, 1.0);
    assert!(nearly_equal(u1, 2.0, tol()));
    assert!(nearly_equal(y1, 0.04, tol()));

    let (u2, y2) = loop_step(&mut pid, &mut plant, 1.0);
    assert!(nearly_equal(u2, 1.92, tol()));
    assert!(nearly_equal(y2, 0.0776, tol()));
}

#[test]
fn proportional_loop_settles_with_offset() {
    // P-only: steady state y = kp*g / (1 + kp*g) * sp
    let mut plant = FirstOrderProcess::new(1.0, 5.0, 0.1).unwrap();
    let mut pid = PidController::new(PidGains::proportional(2.0), 0.1).unwrap();

    for _ in 0..2_000 {
        loop_step(&mut pid, &mut plant, 1.0);
    }

    assert!((plant.output() - 2.0 / 3.0).abs() < 1e-6);
}

#[test]
fn integral_action_removes_offset() {
    let mut plant = FirstOrderProcess::new(1.0, 5.0, 0.1).unwrap();
    let mut pid = PidController::new(PidGains::new(2.0, 0.5, 0.0).unwrap(), 0.1).unwrap();

    for _ in 0..5_000 {
        loop_step(&mut pid, &mut plant, 1.0);
    }

    assert!((plant.output() - 1.0).abs() < 1e-4);
}

#[test]
fn negative_gain_diverges() {
    let mut plant = FirstOrderProcess::new(1.0, 5.0, 0.1).unwrap();
    let mut pid = PidController::new(PidGains::proportional(-3.0), 0.1).unwrap();

    for _ in 0..500 {
        loop_step(&mut pid, &mut plant, 1.0);
    }

    assert!(plant.output() < -10.0);
}

proptest! {
    #[test]
    fn step_response_is_monotone_and_bounded(
        tau in 0.5_f64..50.0,
        dt in 0.001_f64..0.4,
        steps in 1_usize..2_000,
    ) {
        let mut plant = FirstOrderProcess::new(1.0, tau, dt).unwrap();
        let mut prev = plant.output();
        for _ in 0..steps {
            let y = plant.step(1.0);
            prop_assert!(y >= prev);
            prop_assert!(y <= 1.0);
            prev = y;
        }
    }

    #[test]
    fn proportional_unit_gain_is_plain_error(sp in -1e6_f64..1e6, pv in -1e6_f64..1e6) {
        let mut pid = PidController::new(PidGains::proportional(1.0), 0.1).unwrap();
        prop_assert_eq!(pid.compute(sp, pv), sp - pv);
    }
}
