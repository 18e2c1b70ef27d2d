use pyo3::prelude::*;

use pyo3::PyResult;

use crate::compare::{compare, Comparison};
use crate::core::function::{resolve_function, Evaluable};
use crate::core::laguerre::gauss_laguerre_quadrature;
use crate::core::simpson::{self, SimpsonConfig, TailSegment};
use crate::display::PlotConfig;

#[pyclass(name = "Comparison")]
#[derive(Clone)]
pub struct PyComparison {
    #[pyo3(get)]
    pub name: String,
    #[pyo3(get)]
    pub tol: f64,
    #[pyo3(get)]
    pub simpson_value: f64,
    #[pyo3(get)]
    pub simpson_iterations: usize,
    /// `(nodes, value, diff)` per Gauss-Laguerre rule.
    #[pyo3(get)]
    pub laguerre: Vec<(usize, f64, f64)>,
    report: String,
}

#[pymethods]
impl PyComparison {
    fn __str__(&self) -> String {
        self.report.clone()
    }
}

impl From<Comparison> for PyComparison {
    fn from(cmp: Comparison) -> Self {
        Self {
            report: cmp.to_string(),
            laguerre: cmp
                .laguerre
                .iter()
                .map(|est| (est.nodes, est.value, est.diff))
                .collect(),
            name: cmp.name,
            tol: cmp.tol,
            simpson_value: cmp.simpson_value,
            simpson_iterations: cmp.simpson_iterations,
        }
    }
}

#[pyclass(name = "WeightedPlot")]
pub struct PyWeightedPlot {
    #[pyo3(get)]
    pub title: String,
    #[pyo3(get)]
    pub xv: Vec<f64>,
    #[pyo3(get)]
    pub yv: Vec<f64>,
}

#[pyfunction]
pub fn integrate_infinite(
    expr: String,
    tol: f64,
    max_iter: Option<usize>,
    include_tail: bool,
) -> PyResult<(f64, usize)> {
    let func = resolve_function(&expr)?;
    let cfg = SimpsonConfig {
        max_iter,
        tail: if include_tail {
            TailSegment::Include
        } else {
            TailSegment::Discard
        },
        ..Default::default()
    };
    Ok(simpson::integrate_infinite(
        |x| func.evaluate(x),
        tol,
        &cfg,
    )?)
}

#[pyfunction]
pub fn gauss_laguerre(expr: String, n: usize) -> PyResult<f64> {
    let func = resolve_function(&expr)?;
    Ok(gauss_laguerre_quadrature(|x| func.evaluate(x), n)?)
}

#[pyfunction]
#[pyo3(name = "compare")]
pub fn wrapped_compare(expr: String, tol: f64) -> PyResult<PyComparison> {
    let func = resolve_function(&expr)?;
    compare(func.as_ref(), tol, &SimpsonConfig::default())
        .map(|cmp| cmp.into())
        .map_err(|err| err.into())
}

#[pyfunction]
pub fn plot_samples(expr: String) -> PyResult<PyWeightedPlot> {
    let func = resolve_function(&expr)?;
    let plot = PlotConfig::default().sample(func.as_ref())?;
    Ok(PyWeightedPlot {
        title: plot.title,
        xv: plot.xv,
        yv: plot.yv,
    })
}
