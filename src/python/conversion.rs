//! Array conversion between numpy and [`Volume`] values.
//!
//! Conversions preserve the numpy dtype exactly, so dtype-sensitive
//! operations (binarize, replace) behave the same from Python as from Rust.

use numpy::{IntoPyArray, PyArrayDyn};
use pyo3::exceptions::PyTypeError;
use pyo3::prelude::*;

use crate::volume::Volume;

/// Extract a [`Volume`] from any supported numpy array, keeping its dtype.
pub fn volume_from_py(array: &Bound<'_, PyAny>) -> PyResult<Volume> {
    macro_rules! try_dtype {
        ($t:ty) => {
            if let Ok(arr) = array.downcast::<PyArrayDyn<$t>>() {
                return Ok(Volume::from(arr.readonly().as_array().to_owned()));
            }
        };
    }
    try_dtype!(f32);
    try_dtype!(f64);
    try_dtype!(i64);
    try_dtype!(i32);
    try_dtype!(i16);
    try_dtype!(i8);
    try_dtype!(u8);
    try_dtype!(u16);
    try_dtype!(u32);
    try_dtype!(u64);
    Err(PyTypeError::new_err(
        "expected a numpy array with an integer or floating-point dtype",
    ))
}

/// Hand a [`Volume`] back to Python as a numpy array of the matching dtype.
pub fn volume_to_py(py: Python<'_>, volume: Volume) -> PyResult<PyObject> {
    let object = match volume {
        Volume::U8(a) => a.into_pyarray(py).into_any().unbind(),
        Volume::I8(a) => a.into_pyarray(py).into_any().unbind(),
        Volume::I16(a) => a.into_pyarray(py).into_any().unbind(),
        Volume::U16(a) => a.into_pyarray(py).into_any().unbind(),
        Volume::I32(a) => a.into_pyarray(py).into_any().unbind(),
        Volume::U32(a) => a.into_pyarray(py).into_any().unbind(),
        Volume::I64(a) => a.into_pyarray(py).into_any().unbind(),
        Volume::U64(a) => a.into_pyarray(py).into_any().unbind(),
        Volume::F32(a) => a.into_pyarray(py).into_any().unbind(),
        Volume::F64(a) => a.into_pyarray(py).into_any().unbind(),
    };
    Ok(object)
}
