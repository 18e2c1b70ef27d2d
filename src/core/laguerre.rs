use log::debug;

use crate::errors::IntegError;

/// Node counts with a tabulated Gauss-Laguerre rule.
pub const SUPPORTED_NODE_COUNTS: [usize; 4] = [2, 3, 4, 5];

const LAGUERRE_NODES_WEIGHTS_2: [(f64, f64); 2] = [(0.585786, 0.853553), (3.41421, 0.146447)];

const LAGUERRE_NODES_WEIGHTS_3: [(f64, f64); 3] = [
    (0.415775, 0.711093),
    (2.29428, 0.278518),
    (6.28995, 0.0103893),
];

const LAGUERRE_NODES_WEIGHTS_4: [(f64, f64); 4] = [
    (0.322548, 0.603154),
    (1.74576, 0.357419),
    (4.53662, 0.0388879),
    (9.39507, 0.000539295),
];

const LAGUERRE_NODES_WEIGHTS_5: [(f64, f64); 5] = [
    (0.263560, 0.521756),
    (1.41340, 0.398667),
    (3.59642, 0.0759424),
    (7.08581, 0.00361176),
    (12.6408, 0.0000233699),
];

/// The `(node, weight)` pairs of the `n` point rule, nodes ascending.
pub fn laguerre_rule(n: usize) -> Result<&'static [(f64, f64)], IntegError> {
    match n {
        2 => Ok(&LAGUERRE_NODES_WEIGHTS_2),
        3 => Ok(&LAGUERRE_NODES_WEIGHTS_3),
        4 => Ok(&LAGUERRE_NODES_WEIGHTS_4),
        5 => Ok(&LAGUERRE_NODES_WEIGHTS_5),
        _ => Err(IntegError::InvalidNodeCount { n }),
    }
}

/// Approximates the integral of `e^(-x) * f(x)` over `[0, inf)` with the
/// `n` point Gauss-Laguerre rule.
///
/// The weight function is part of the rule, so `f` is evaluated as is.
pub fn gauss_laguerre_quadrature(f: impl Fn(f64) -> f64, n: usize) -> Result<f64, IntegError> {
    let s: f64 = laguerre_rule(n)?.iter().map(|&(x, w)| w * f(x)).sum();
    debug!("{} point Gauss-Laguerre: {}", n, s);
    Ok(s)
}
