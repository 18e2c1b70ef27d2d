use std::{
    f64::consts::E,
    thread,
    time::{Duration, Instant},
};

use approx::assert_abs_diff_eq;
use halfquad::{
    core::{
        function::{Evaluable, TestFunction},
        simpson::{
            integrate_finite, integrate_infinite, simpson_composite, simpson_single, SimpsonConfig,
            TailSegment,
        },
    },
    errors::IntegError,
};

use crate::setup;

/* Fixed Interval Rules */

#[test]
fn single_panel() {
    let expected = 2f64 / 6f64 * (1f64 + 4f64 * (-1f64).exp() + (-2f64).exp());
    assert_abs_diff_eq!(simpson_single(|_| 1f64, 0f64, 2f64), expected, epsilon = 1e-15);
}

#[test]
fn odd_panel_count_rounds_up() {
    for n in [1, 3, 5, 7, 9, 33] {
        assert_eq!(
            simpson_composite(f64::sin, 0f64, 1f64, n),
            simpson_composite(f64::sin, 0f64, 1f64, n + 1)
        );
    }
}

#[test]
fn zero_panels() {
    assert_eq!(simpson_composite(|_| 1f64, 0f64, 1f64, 0), 0f64);
}

#[test]
fn composite_constant() {
    assert_abs_diff_eq!(
        simpson_composite(|_| 1f64, 0f64, 1f64, 64),
        1f64 - 1f64 / E,
        epsilon = 1e-9
    );
}

/* Adaptive Finite Interval Driver */

#[test]
fn finite_constant() {
    setup();
    let (res, iterations) =
        integrate_finite(|_| 1f64, 0f64, 2f64, 1e-10, &SimpsonConfig::default()).unwrap();
    assert_abs_diff_eq!(res, 1f64 - (-2f64).exp(), epsilon = 1e-10);
    assert!(iterations > 1);
}

#[test]
fn finite_tightening() {
    setup();
    let cfg = SimpsonConfig::default();
    let mut prev: Option<(f64, usize, f64)> = None;
    for k in 0..24 {
        let tol = 1e-2 / 2f64.powi(k);
        let (res, iterations) = integrate_finite(f64::sin, 0f64, 3f64, tol, &cfg).unwrap();
        if let Some((prev_res, prev_iterations, prev_tol)) = prev {
            assert!(iterations >= prev_iterations);
            assert!((res - prev_res).abs() <= prev_tol);
        }
        prev = Some((res, iterations, tol));
    }
}

#[test]
fn finite_bad_input() {
    let cfg = SimpsonConfig::default();
    for tol in [0f64, -1e-6, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            integrate_finite(|_| 1f64, 0f64, 1f64, tol, &cfg),
            Err(IntegError::BadInput(_))
        ));
    }
    for (a, b) in [(1f64, 1f64), (2f64, 1f64), (0f64, f64::INFINITY)] {
        assert!(matches!(
            integrate_finite(|_| 1f64, a, b, 1e-6, &cfg),
            Err(IntegError::BadInput(_))
        ));
    }
}

#[test]
fn finite_outside_domain() {
    assert_eq!(
        integrate_finite(|x| x.ln(), -1f64, 1f64, 1e-9, &SimpsonConfig::default()),
        Err(IntegError::NaNError)
    );
}

#[test]
fn finite_iter_restriction() {
    let cfg = SimpsonConfig {
        max_iter: Some(3),
        ..Default::default()
    };
    assert_eq!(
        integrate_finite(f64::sin, 0f64, 3f64, 1e-12, &cfg),
        Err(IntegError::ConvergenceError)
    );

    let cfg = SimpsonConfig {
        max_iter: Some(1),
        ..Default::default()
    };
    assert_eq!(
        integrate_finite(|_| 1f64, 0f64, 1f64, 1e-3, &cfg),
        Err(IntegError::ConvergenceError)
    );
}

#[test]
fn finite_deadline() {
    let cfg = SimpsonConfig {
        deadline: Some(Instant::now()),
        ..Default::default()
    };
    assert_eq!(
        integrate_finite(f64::sin, 0f64, 3f64, 1e-6, &cfg),
        Err(IntegError::DeadlineExceeded { iterations: 1 })
    );
}

/* Half Infinite Driver */

fn test_infinite(f: impl Fn(f64) -> f64, tol: f64, true_res: f64, epsilon: f64) {
    setup();
    let (res, iterations) = integrate_infinite(f, tol, &SimpsonConfig::default()).unwrap();
    assert!(iterations > 1);
    assert_abs_diff_eq!(res, true_res, epsilon = epsilon);
}

#[test]
fn infinite_constant() {
    test_infinite(|_| 1f64, 1e-8, 1f64, 1e-6)
}

#[test]
fn infinite_linear() {
    test_infinite(|x| x, 1e-8, 1f64, 1e-6)
}

#[test]
fn infinite_quadratic() {
    test_infinite(|x| x * x, 1e-8, 2f64, 1e-6)
}

#[test]
fn infinite_catalogue() {
    for (func, true_res) in [
        (TestFunction::Exponential, 2f64 / 3f64),
        (TestFunction::Trigonometric, 0.5),
        (TestFunction::Growing, 0f64),
    ] {
        test_infinite(|x| func.evaluate(x), 1e-8, true_res, 1e-6)
    }
}

#[test]
fn infinite_deterministic() {
    let cfg = SimpsonConfig::default();
    let f = |x: f64| TestFunction::ComplexOscillation.evaluate(x);
    assert_eq!(
        integrate_infinite(f, 1e-6, &cfg).unwrap(),
        integrate_infinite(f, 1e-6, &cfg).unwrap()
    );
}

#[test]
fn infinite_tail_segment() {
    let tol = 1e-3;
    let (discarded, discarded_iterations) =
        integrate_infinite(|_| 1f64, tol, &SimpsonConfig::default()).unwrap();
    let cfg = SimpsonConfig {
        tail: TailSegment::Include,
        ..Default::default()
    };
    let (included, included_iterations) = integrate_infinite(|_| 1f64, tol, &cfg).unwrap();

    assert_eq!(discarded_iterations, included_iterations);
    assert!(discarded < 1f64);
    assert!((included - discarded).abs() < tol);
    assert!((included - 1f64).abs() < (discarded - 1f64).abs());
}

#[test]
fn infinite_bad_tolerance() {
    assert!(matches!(
        integrate_infinite(|_| 1f64, 0f64, &SimpsonConfig::default()),
        Err(IntegError::BadInput(_))
    ));
}

#[test]
fn infinite_non_decaying() {
    let cfg = SimpsonConfig {
        max_iter: Some(10),
        ..Default::default()
    };
    assert_eq!(
        integrate_infinite(|x| x.exp(), 1e-6, &cfg),
        Err(IntegError::ConvergenceError)
    );
}

#[test]
fn infinite_deadline() {
    let cfg = SimpsonConfig {
        max_iter: None,
        deadline: Some(Instant::now() + Duration::from_millis(20)),
        ..Default::default()
    };
    // Every accepted segment contributes its own width, so only the deadline
    // stops the loop before the samples overflow.
    let slow_exp = |x: f64| {
        thread::sleep(Duration::from_millis(1));
        x.exp()
    };
    assert!(matches!(
        integrate_infinite(slow_exp, 1e-6, &cfg),
        Err(IntegError::DeadlineExceeded { .. })
    ));
}
