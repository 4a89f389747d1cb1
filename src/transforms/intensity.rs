//! Elementwise intensity transforms.

use crate::error::{Error, Result};
use crate::volume::{DataType, Volume};
use ndarray::{ArrayD, IxDyn};
use num_traits::{One, Zero};
use rayon::prelude::*;

fn binarize_impl<T>(array: &ArrayD<T>) -> ArrayD<T>
where
    T: Copy + PartialOrd + Zero + One,
{
    array.mapv(|v| if v > T::zero() { T::one() } else { T::zero() })
}

/// Threshold a volume at zero: strictly positive elements become 1, all
/// others become 0.
///
/// The result is numeric 1/0 in the input's own dtype (float stays float of
/// the same width, integer stays integer of the same width), per
/// [`DataType::binarize_output`]. Shape is unchanged.
#[must_use = "this function returns a new volume and does not modify the original"]
pub fn binarize(volume: &Volume) -> Result<Volume> {
    macro_rules! threshold {
        ($arr:expr, $variant:ident) => {
            Volume::$variant(binarize_impl($arr))
        };
    }
    Ok(match volume {
        Volume::U8(a) => threshold!(a, U8),
        Volume::I8(a) => threshold!(a, I8),
        Volume::I16(a) => threshold!(a, I16),
        Volume::U16(a) => threshold!(a, U16),
        Volume::I32(a) => threshold!(a, I32),
        Volume::U32(a) => threshold!(a, U32),
        Volume::I64(a) => threshold!(a, I64),
        Volume::U64(a) => threshold!(a, U64),
        Volume::F32(a) => threshold!(a, F32),
        Volume::F64(a) => threshold!(a, F64),
    })
}

/// Pack an elementwise f64 pass into a float volume of the policy dtype.
fn float_output(shape: &[usize], values: Vec<f64>, dtype: DataType) -> Result<Volume> {
    let volume = match dtype {
        DataType::Float64 => Volume::F64(
            ArrayD::from_shape_vec(IxDyn(shape), values)
                .map_err(|e| Error::ShapeMismatch(e.to_string()))?,
        ),
        _ => Volume::F32(
            ArrayD::from_shape_vec(IxDyn(shape), values.iter().map(|&v| v as f32).collect())
                .map_err(|e| Error::ShapeMismatch(e.to_string()))?,
        ),
    };
    Ok(volume)
}

/// Standardize a volume to zero mean and unit variance.
///
/// Mean and population standard deviation are taken over all elements
/// (global, not per-axis) and accumulated in f64. The output dtype follows
/// [`DataType::standardize_output`]: float input keeps its width, integer
/// input becomes f32.
///
/// Constant input has no well-defined standardization and fails with
/// [`Error::DegenerateInput`] rather than emitting NaN.
#[must_use = "this function returns a new volume and does not modify the original"]
pub fn standardize(volume: &Volume) -> Result<Volume> {
    if volume.is_empty() {
        return Err(Error::DegenerateInput(
            "cannot standardize an empty volume".to_string(),
        ));
    }
    let values: Vec<f64> = volume.to_f64().iter().copied().collect();
    let n = values.len() as f64;
    let mean = values.par_iter().sum::<f64>() / n;
    let variance = values.par_iter().map(|&v| (v - mean) * (v - mean)).sum::<f64>() / n;
    let std = variance.sqrt();
    if std == 0.0 || !std.is_finite() {
        return Err(Error::DegenerateInput(format!(
            "standard deviation is {} (constant or non-finite input)",
            std
        )));
    }

    let standardized: Vec<f64> = values.par_iter().map(|&v| (v - mean) / std).collect();
    float_output(
        volume.shape(),
        standardized,
        volume.dtype().standardize_output(),
    )
}

/// Rescale intensities so the global minimum maps to `out_min` and the
/// global maximum to `out_max`.
///
/// Output dtype follows [`DataType::standardize_output`]. Constant input
/// fails with [`Error::DegenerateInput`].
#[must_use = "this function returns a new volume and does not modify the original"]
pub fn rescale_intensity(volume: &Volume, out_min: f64, out_max: f64) -> Result<Volume> {
    if !out_min.is_finite() || !out_max.is_finite() || out_min > out_max {
        return Err(Error::Configuration(format!(
            "invalid output range [{}, {}]",
            out_min, out_max
        )));
    }
    if volume.is_empty() {
        return Err(Error::DegenerateInput(
            "cannot rescale an empty volume".to_string(),
        ));
    }
    let values: Vec<f64> = volume.to_f64().iter().copied().collect();
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if min == max || !(max - min).is_finite() {
        return Err(Error::DegenerateInput(format!(
            "intensity range [{}, {}] cannot be rescaled",
            min, max
        )));
    }

    let scale = (out_max - out_min) / (max - min);
    let rescaled: Vec<f64> = values
        .par_iter()
        .map(|&v| (v - min) * scale + out_min)
        .collect();
    float_output(volume.shape(), rescaled, volume.dtype().standardize_output())
}

/// Clamp intensities into `[min, max]`.
///
/// Materializes f32 output regardless of input dtype.
#[must_use = "this function returns a new volume and does not modify the original"]
pub fn clamp(volume: &Volume, min: f64, max: f64) -> Result<Volume> {
    if !min.is_finite() || !max.is_finite() || min > max {
        return Err(Error::Configuration(format!(
            "invalid clamp range [{}, {}]",
            min, max
        )));
    }
    let (min, max) = (min as f32, max as f32);
    Ok(Volume::F32(volume.to_f32().mapv(|v| v.clamp(min, max))))
}
