use std::time::Instant;

use log::{debug, trace, warn};

use crate::errors::IntegError;

/// Width of the first tail segment after `[0, 1]`.
const INITIAL_SEGMENT_WIDTH: f64 = 1f64;

/// Factor by which every accepted tail segment widens the next one.
const SEGMENT_GROWTH: f64 = 1.5;

/// Each segment is refined to `tol / INNER_TOL_DIVISOR` so that the
/// per segment errors do not compound past the outer tolerance.
const INNER_TOL_DIVISOR: f64 = 10f64;

/// What to do with the tail segment whose contribution first drops below
/// the tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TailSegment {
    /// Only used for the stopping test. Biases the result low by up to `tol`.
    #[default]
    Discard,
    /// Added to the accumulated value before returning.
    Include,
}

#[derive(Debug, Clone, Default)]
pub struct SimpsonConfig {
    /// Ceiling on the iteration count of both the doubling loop and the
    /// segment loop. `None` iterates until convergence.
    pub max_iter: Option<usize>,
    pub tail: TailSegment,
    /// Checked once per doubling and once per segment.
    pub deadline: Option<Instant>,
}

impl SimpsonConfig {
    fn check_deadline(&self, iterations: usize) -> Result<(), IntegError> {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                warn!("Deadline passed after {} iterations", iterations);
                Err(IntegError::DeadlineExceeded { iterations })
            }
            _ => Ok(()),
        }
    }

    fn check_budget(&self, iterations: usize) -> Result<(), IntegError> {
        match self.max_iter {
            Some(max_iter) if iterations >= max_iter => {
                warn!("Iteration ceiling of {} reached", max_iter);
                Err(IntegError::ConvergenceError)
            }
            _ => Ok(()),
        }
    }
}

/// The three point Simpson rule applied to `e^(-x) * f(x)` over `[a, b]`.
pub fn simpson_single(f: impl Fn(f64) -> f64, a: f64, b: f64) -> f64 {
    let g = |x: f64| (-x).exp() * f(x);
    let m = (a + b) / 2f64;
    (b - a) / 6f64 * (g(a) + 4f64 * g(m) + g(b))
}

/// The composite Simpson rule for `e^(-x) * f(x)` over `[a, b]` split into
/// `n` equal subintervals.
///
/// An odd `n` is rounded up to the next even number, as the subintervals are
/// consumed in pairs. `n = 0` yields no panels and a zero sum.
pub fn simpson_composite(f: impl Fn(f64) -> f64, a: f64, b: f64, n: usize) -> f64 {
    let n = n + n % 2;
    if n == 0 {
        return 0f64;
    }
    let h = (b - a) / n as f64;
    let mut s = 0f64;
    for i in 0..n / 2 {
        let start = a + (2 * i) as f64 * h;
        s += simpson_single(&f, start, start + 2f64 * h);
    }
    s
}

fn validate_tol(tol: f64) -> Result<(), IntegError> {
    if tol.is_finite() && tol > 0f64 {
        Ok(())
    } else {
        Err(IntegError::BadInput(format!(
            "Expected a positive finite tolerance, but found {}",
            tol
        )))
    }
}

/// Integrates `e^(-x) * f(x)` over `[a, b]` by repeatedly doubling the number
/// of composite Simpson subintervals, starting at 2, until two successive
/// approximations differ by less than `tol`.
///
/// Returns the last approximation and the number of approximations computed.
///
/// * `f` - The function to weight and integrate
/// * `a` - Lower integration bound
/// * `b` - Upper integration bound, strictly greater than `a`
/// * `tol` - The maximum allowed difference between successive refinements
/// * `cfg` - Iteration ceiling and deadline
pub fn integrate_finite(
    f: impl Fn(f64) -> f64,
    a: f64,
    b: f64,
    tol: f64,
    cfg: &SimpsonConfig,
) -> Result<(f64, usize), IntegError> {
    validate_tol(tol)?;
    if !(a.is_finite() && b.is_finite() && a < b) {
        return Err(IntegError::BadInput(format!(
            "Expected finite bounds with a < b, but found [{}, {}]",
            a, b
        )));
    }

    let mut n = 2usize;
    let mut prev = simpson_composite(&f, a, b, n);
    let mut iterations = 1usize;
    loop {
        cfg.check_budget(iterations)?;
        cfg.check_deadline(iterations)?;
        n = n.checked_mul(2).ok_or(IntegError::ConvergenceError)?;
        let curr = simpson_composite(&f, a, b, n);
        iterations += 1;

        let diff = (curr - prev).abs();
        trace!("[{}, {}] n = {}: {} (diff {:e})", a, b, n, curr, diff);
        if diff.is_nan() {
            return Err(IntegError::NaNError);
        } else if diff < tol {
            return Ok((curr, iterations));
        }
        prev = curr;
    }
}

/// Integrates `e^(-x) * f(x)` over `[0, inf)`.
///
/// `[0, 1]` is integrated first, then segments `[a, a + delta)` of
/// geometrically growing width are appended until a segment contributes
/// less than `tol` in absolute value. Every segment is refined with
/// [`integrate_finite`] at `tol / 10`.
///
/// Returns the integration value and the number of finite integrations
/// performed, including the terminating segment.
pub fn integrate_infinite(
    f: impl Fn(f64) -> f64,
    tol: f64,
    cfg: &SimpsonConfig,
) -> Result<(f64, usize), IntegError> {
    validate_tol(tol)?;
    let inner_tol = tol / INNER_TOL_DIVISOR;

    let mut a = 1f64;
    let mut delta = INITIAL_SEGMENT_WIDTH;
    let mut total = integrate_finite(&f, 0f64, a, inner_tol, cfg)?.0;
    let mut iterations = 1usize;
    loop {
        cfg.check_budget(iterations)?;
        cfg.check_deadline(iterations)?;
        let (segment, refinements) = integrate_finite(&f, a, a + delta, inner_tol, cfg)?;
        iterations += 1;
        debug!(
            "Segment [{}, {}) contributed {:e} after {} refinements",
            a,
            a + delta,
            segment,
            refinements
        );

        if segment.abs() < tol {
            if cfg.tail == TailSegment::Include {
                total += segment;
            }
            return Ok((total, iterations));
        }
        total += segment;
        a += delta;
        delta *= SEGMENT_GROWTH;
    }
}
