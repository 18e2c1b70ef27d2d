use thiserror::Error;

use crate::core::laguerre::SUPPORTED_NODE_COUNTS;

/// An error that can occur during parsing
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    /// Variable is not in list of allowed variables.
    #[error("Variable '{}' not allowed", var)]
    InvalidVariable { var: String },

    #[error("Unknown function '{}'", name)]
    UnknownFunction { name: String },

    #[error("Syntax error at byte {}: {}", pos, msg)]
    Syntax { pos: usize, msg: String },
}

#[derive(Debug, Error, PartialEq)]
pub enum IntegError {
    #[error("Maximum allowed iterations exceeded")]
    ConvergenceError,

    #[error("Approximation evaluated to NaN")]
    NaNError,

    #[error("Deadline exceeded after {} iterations", iterations)]
    DeadlineExceeded { iterations: usize },

    #[error(
        "Node count must be one of {:?}, got {}",
        SUPPORTED_NODE_COUNTS,
        n
    )]
    InvalidNodeCount { n: usize },

    #[error("BadInput: {0}")]
    BadInput(String),
}

#[cfg(feature = "python")]
impl From<IntegError> for pyo3::PyErr {
    fn from(err: IntegError) -> Self {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}

#[cfg(feature = "python")]
impl From<ParseError> for pyo3::PyErr {
    fn from(err: ParseError) -> Self {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}
