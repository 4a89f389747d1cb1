//! Python-facing operation wrappers.

use std::collections::HashMap;

use pyo3::prelude::*;

use super::conversion::{volume_from_py, volume_to_py};
use super::validation::{to_py_err, validate_shape3};
use crate::transforms::{self, LabelMapping};

/// Partition a volume into an ordered batch of non-overlapping blocks.
///
/// Args:
///     volume: 3D (or 3D + channel) numpy array
///     block_shape: Block shape as (d, h, w); must evenly divide the volume
///
/// Returns:
///     Array of shape (num_blocks, d, h, w[, c]) with the input's dtype
#[pyfunction]
pub fn to_blocks(
    py: Python<'_>,
    volume: &Bound<'_, PyAny>,
    block_shape: (usize, usize, usize),
) -> PyResult<PyObject> {
    let block_shape = validate_shape3(block_shape, "block_shape")?;
    let volume = volume_from_py(volume)?;
    let blocks =
        transforms::to_blocks(&volume, block_shape).map_err(|e| to_py_err(e, "to_blocks"))?;
    volume_to_py(py, blocks)
}

/// Reassemble a volume from a block batch produced by `to_blocks`.
#[pyfunction]
pub fn from_blocks(
    py: Python<'_>,
    blocks: &Bound<'_, PyAny>,
    volume_shape: Vec<usize>,
) -> PyResult<PyObject> {
    let blocks = volume_from_py(blocks)?;
    let volume = transforms::from_blocks(&blocks, &volume_shape)
        .map_err(|e| to_py_err(e, "from_blocks"))?;
    volume_to_py(py, volume)
}

/// Substitute label values according to a mapping.
///
/// Args:
///     labels: numpy array of class indices (any rank)
///     mapping: dict of key -> replacement value
///     zero: When True, values matching no key become 0 (default: False)
#[pyfunction]
#[pyo3(signature = (labels, mapping, zero=false))]
pub fn replace(
    py: Python<'_>,
    labels: &Bound<'_, PyAny>,
    mapping: HashMap<i64, i64>,
    zero: bool,
) -> PyResult<PyObject> {
    let pairs: Vec<(i64, i64)> = mapping.into_iter().collect();
    let mapping = LabelMapping::from_pairs(&pairs).map_err(|e| to_py_err(e, "replace"))?;
    let labels = volume_from_py(labels)?;
    let replaced =
        transforms::replace(&labels, &mapping, zero).map_err(|e| to_py_err(e, "replace"))?;
    volume_to_py(py, replaced)
}

/// Threshold a volume at zero, keeping the input's dtype.
#[pyfunction]
pub fn binarize(py: Python<'_>, volume: &Bound<'_, PyAny>) -> PyResult<PyObject> {
    let volume = volume_from_py(volume)?;
    let binarized = transforms::binarize(&volume).map_err(|e| to_py_err(e, "binarize"))?;
    volume_to_py(py, binarized)
}

/// Standardize a volume to zero mean and unit variance.
#[pyfunction]
pub fn standardize(py: Python<'_>, volume: &Bound<'_, PyAny>) -> PyResult<PyObject> {
    let volume = volume_from_py(volume)?;
    let standardized =
        transforms::standardize(&volume).map_err(|e| to_py_err(e, "standardize"))?;
    volume_to_py(py, standardized)
}

/// Rescale intensities into the given output range.
#[pyfunction]
#[pyo3(signature = (volume, output_range=(0.0, 1.0)))]
pub fn rescale_intensity(
    py: Python<'_>,
    volume: &Bound<'_, PyAny>,
    output_range: (f64, f64),
) -> PyResult<PyObject> {
    let volume = volume_from_py(volume)?;
    let rescaled = transforms::rescale_intensity(&volume, output_range.0, output_range.1)
        .map_err(|e| to_py_err(e, "rescale_intensity"))?;
    volume_to_py(py, rescaled)
}

/// Clamp intensities into [min_value, max_value].
#[pyfunction]
pub fn clamp(
    py: Python<'_>,
    volume: &Bound<'_, PyAny>,
    min_value: f64,
    max_value: f64,
) -> PyResult<PyObject> {
    let volume = volume_from_py(volume)?;
    let clamped =
        transforms::clamp(&volume, min_value, max_value).map_err(|e| to_py_err(e, "clamp"))?;
    volume_to_py(py, clamped)
}

/// Mirror a volume along the given axes.
#[pyfunction]
pub fn flip(py: Python<'_>, volume: &Bound<'_, PyAny>, axes: Vec<usize>) -> PyResult<PyObject> {
    let volume = volume_from_py(volume)?;
    let flipped = transforms::flip(&volume, &axes).map_err(|e| to_py_err(e, "flip"))?;
    volume_to_py(py, flipped)
}

/// Apply one randomly sampled spatial transform to a volume/label pair.
///
/// Args:
///     volume: 3D numpy array of intensities
///     labels: 3D numpy array of class indices, same shape
///     seed: Optional random seed for reproducibility
///
/// Returns:
///     (warped_volume, warped_labels) tuple
#[pyfunction]
#[pyo3(signature = (volume, labels, seed=None))]
pub fn apply_random_transform(
    py: Python<'_>,
    volume: &Bound<'_, PyAny>,
    labels: &Bound<'_, PyAny>,
    seed: Option<u64>,
) -> PyResult<(PyObject, PyObject)> {
    let volume = volume_from_py(volume)?;
    let labels = volume_from_py(labels)?;
    let (warped, warped_labels) = transforms::apply_random_transform(&volume, &labels, seed)
        .map_err(|e| to_py_err(e, "apply_random_transform"))?;
    Ok((volume_to_py(py, warped)?, volume_to_py(py, warped_labels)?))
}

/// Number of training steps needed to cover every block of every volume.
#[pyfunction]
pub fn get_steps_per_epoch(
    n_volumes: usize,
    volume_shape: (usize, usize, usize),
    block_shape: (usize, usize, usize),
    batch_size: usize,
) -> PyResult<usize> {
    let volume_shape = validate_shape3(volume_shape, "volume_shape")?;
    let block_shape = validate_shape3(block_shape, "block_shape")?;
    crate::training::get_steps_per_epoch(n_volumes, volume_shape, block_shape, batch_size)
        .map_err(|e| to_py_err(e, "get_steps_per_epoch"))
}
