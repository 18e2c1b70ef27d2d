use std::fmt::{self, Display};

use log::info;
use ordered_float::OrderedFloat;

use crate::{
    core::{
        function::Evaluable,
        laguerre::{gauss_laguerre_quadrature, SUPPORTED_NODE_COUNTS},
        simpson::{integrate_infinite, SimpsonConfig},
    },
    errors::IntegError,
};

#[derive(Debug, Clone, PartialEq)]
pub struct LaguerreEstimate {
    pub nodes: usize,
    pub value: f64,
    /// Absolute difference to the Simpson reference value.
    pub diff: f64,
}

/// Both quadratures of one function at one tolerance.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub name: String,
    pub tol: f64,
    pub simpson_value: f64,
    pub simpson_iterations: usize,
    pub laguerre: Vec<LaguerreEstimate>,
}

impl Comparison {
    /// The Gauss-Laguerre estimate closest to the Simpson reference.
    pub fn closest(&self) -> Option<&LaguerreEstimate> {
        self.laguerre.iter().min_by_key(|est| OrderedFloat(est.diff))
    }
}

/// Integrates `func` with the half infinite Simpson driver and with every
/// tabulated Gauss-Laguerre rule.
///
/// The Simpson value serves as the reference the fixed node rules are
/// measured against. Nothing is judged, the differences are only reported.
pub fn compare(
    func: &dyn Evaluable,
    tol: f64,
    cfg: &SimpsonConfig,
) -> Result<Comparison, IntegError> {
    let f = |x: f64| func.evaluate(x);
    let (simpson_value, simpson_iterations) = integrate_infinite(f, tol, cfg)?;
    info!(
        "{}: Simpson {} after {} iterations",
        func.name(),
        simpson_value,
        simpson_iterations
    );

    let laguerre = SUPPORTED_NODE_COUNTS
        .iter()
        .map(|&n| {
            let value = gauss_laguerre_quadrature(f, n)?;
            Ok(LaguerreEstimate {
                nodes: n,
                value,
                diff: (simpson_value - value).abs(),
            })
        })
        .collect::<Result<Vec<_>, IntegError>>()?;

    Ok(Comparison {
        name: func.name().to_string(),
        tol,
        simpson_value,
        simpson_iterations,
        laguerre,
    })
}

impl Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Integrating f(x) = {} with weight e^(-x) over [0,inf)",
            self.name
        )?;
        writeln!(f, "Tolerance: {}", self.tol)?;
        writeln!(f)?;
        writeln!(f, "Composite Newton-Cotes quadrature (Simpson's rule):")?;
        writeln!(f, "  Result: {:.10}", self.simpson_value)?;
        writeln!(f, "  Iterations: {}", self.simpson_iterations)?;
        writeln!(f)?;
        writeln!(f, "Gauss-Laguerre quadrature:")?;
        for est in &self.laguerre {
            writeln!(
                f,
                "  {} nodes: {:.10} (difference: {:.10e})",
                est.nodes, est.value, est.diff
            )?;
        }
        Ok(())
    }
}
