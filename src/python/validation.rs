//! Validation helpers for the Python boundary.
//!
//! Maps crate errors to Python exceptions and validates Python API inputs,
//! so the Python interface raises predictable exception types.

use crate::error::Error as VolprepError;
use pyo3::exceptions::PyValueError;

/// Convert a volprep error to the appropriate Python exception.
pub fn to_py_err(e: VolprepError, context: &str) -> pyo3::PyErr {
    match &e {
        VolprepError::ShapeMismatch(msg)
        | VolprepError::InvalidDimensions(msg)
        | VolprepError::DegenerateInput(msg)
        | VolprepError::InvalidMapping(msg)
        | VolprepError::Configuration(msg) => {
            PyValueError::new_err(format!("{}: {}", context, msg))
        }
    }
}

/// Validate a 3-element shape tuple has positive dimensions.
pub fn validate_shape3(shape: (usize, usize, usize), name: &str) -> pyo3::PyResult<[usize; 3]> {
    let shape = [shape.0, shape.1, shape.2];
    for (i, &dim) in shape.iter().enumerate() {
        if dim == 0 {
            return Err(PyValueError::new_err(format!(
                "{} dimension {} must be positive (got 0)",
                name, i
            )));
        }
    }
    Ok(shape)
}
