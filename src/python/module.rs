//! Python module definition.

use pyo3::prelude::*;

use super::ops;

#[pymodule]
fn _volprep(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Block partitioning
    m.add_function(wrap_pyfunction!(ops::to_blocks, m)?)?;
    m.add_function(wrap_pyfunction!(ops::from_blocks, m)?)?;

    // Elementwise transforms
    m.add_function(wrap_pyfunction!(ops::replace, m)?)?;
    m.add_function(wrap_pyfunction!(ops::binarize, m)?)?;
    m.add_function(wrap_pyfunction!(ops::standardize, m)?)?;
    m.add_function(wrap_pyfunction!(ops::rescale_intensity, m)?)?;
    m.add_function(wrap_pyfunction!(ops::clamp, m)?)?;
    m.add_function(wrap_pyfunction!(ops::flip, m)?)?;

    // Augmentation and scheduling
    m.add_function(wrap_pyfunction!(ops::apply_random_transform, m)?)?;
    m.add_function(wrap_pyfunction!(ops::get_steps_per_epoch, m)?)?;

    Ok(())
}
