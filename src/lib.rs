pub mod compare;
pub mod core;
pub mod display;
pub mod errors;
#[cfg(feature = "python")]
pub mod pyo3_wrappers;

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule]
fn halfquad(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
    let _ = env_logger::try_init();
    pyo3_wrappers::register(m)
}
