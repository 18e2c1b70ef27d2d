pub mod wrappers;

use pyo3::prelude::*;

use wrappers::{
    gauss_laguerre, integrate_infinite, plot_samples, wrapped_compare, PyComparison,
    PyWeightedPlot,
};

pub fn register(m: &PyModule) -> PyResult<()> {
    m.add_class::<PyComparison>()?;
    m.add_class::<PyWeightedPlot>()?;
    m.add_function(wrap_pyfunction!(integrate_infinite, m)?)?;
    m.add_function(wrap_pyfunction!(gauss_laguerre, m)?)?;
    m.add_function(wrap_pyfunction!(wrapped_compare, m)?)?;
    m.add_function(wrap_pyfunction!(plot_samples, m)?)?;
    Ok(())
}
