//! Spatial rearrangement transforms.

use crate::error::{Error, Result};
use crate::volume::Volume;
use ndarray::Axis;

/// Mirror a volume along the given axes.
///
/// Axes may be listed in any order; each listed axis is reversed once.
/// Dtype and shape are preserved.
#[must_use = "this function returns a new volume and does not modify the original"]
pub fn flip(volume: &Volume, axes: &[usize]) -> Result<Volume> {
    let ndim = volume.ndim();
    for &axis in axes {
        if axis >= ndim {
            return Err(Error::InvalidDimensions(format!(
                "flip axis {} out of bounds for {}D volume",
                axis, ndim
            )));
        }
    }

    macro_rules! mirror {
        ($arr:expr, $variant:ident) => {{
            let mut arr = $arr.clone();
            for &axis in axes {
                arr.invert_axis(Axis(axis));
            }
            Volume::$variant(arr.as_standard_layout().to_owned())
        }};
    }
    Ok(match volume {
        Volume::U8(a) => mirror!(a, U8),
        Volume::I8(a) => mirror!(a, I8),
        Volume::I16(a) => mirror!(a, I16),
        Volume::U16(a) => mirror!(a, U16),
        Volume::I32(a) => mirror!(a, I32),
        Volume::U32(a) => mirror!(a, U32),
        Volume::I64(a) => mirror!(a, I64),
        Volume::U64(a) => mirror!(a, U64),
        Volume::F32(a) => mirror!(a, F32),
        Volume::F64(a) => mirror!(a, F64),
    })
}
