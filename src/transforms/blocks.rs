//! Partitioning of volumes into non-overlapping training blocks.
//!
//! [`to_blocks`] tiles a volume into an ordered batch of equally shaped
//! sub-volumes and [`from_blocks`] reassembles the original volume exactly.
//! Block ordering is row-major over the per-axis block-index grid (last
//! spatial axis varies fastest), so the pair is an exact inverse for every
//! block shape that evenly divides the volume shape.

use crate::error::{Error, Result};
use crate::volume::Volume;
use log::debug;
use ndarray::{ArrayD, IxDyn};

/// Per-axis block counts for a volume/block shape pair.
///
/// Fails with [`Error::ShapeMismatch`] unless every spatial axis of
/// `volume_shape` is evenly divisible by the corresponding block axis.
fn block_grid(volume_shape: &[usize], block_shape: [usize; 3]) -> Result<[usize; 3]> {
    if block_shape.contains(&0) {
        return Err(Error::ShapeMismatch(format!(
            "block shape must have positive dimensions, got {:?}",
            block_shape
        )));
    }
    let spatial = &volume_shape[..3];
    if spatial
        .iter()
        .zip(block_shape.iter())
        .any(|(&dim, &block)| dim % block != 0)
    {
        return Err(Error::ShapeMismatch(format!(
            "block shape {:?} does not evenly divide volume shape {:?}",
            block_shape, spatial
        )));
    }
    Ok([
        spatial[0] / block_shape[0],
        spatial[1] / block_shape[1],
        spatial[2] / block_shape[2],
    ])
}

fn check_spatial_rank(ndim: usize, what: &str) -> Result<()> {
    if ndim == 3 || ndim == 4 {
        Ok(())
    } else {
        Err(Error::InvalidDimensions(format!(
            "{} must be 3D (optionally with a trailing channel axis), got {}D",
            what, ndim
        )))
    }
}

fn to_blocks_impl<T: Clone>(array: &ArrayD<T>, block_shape: [usize; 3]) -> Result<ArrayD<T>> {
    let shape = array.shape().to_vec();
    let [n0, n1, n2] = block_grid(&shape, block_shape)?;
    let [b0, b1, b2] = block_shape;

    // (d0, d1, d2[, c]) -> (n0, b0, n1, b1, n2, b2[, c])
    let mut split = vec![n0, b0, n1, b1, n2, b2];
    let mut perm = vec![0, 2, 4, 1, 3, 5];
    let mut out = vec![n0 * n1 * n2, b0, b1, b2];
    if shape.len() == 4 {
        split.push(shape[3]);
        perm.push(6);
        out.push(shape[3]);
    }

    let contiguous = array.as_standard_layout().to_owned();
    let tiled = contiguous
        .into_shape_with_order(IxDyn(&split))
        .map_err(|e| Error::ShapeMismatch(e.to_string()))?
        .permuted_axes(IxDyn(&perm));
    tiled
        .as_standard_layout()
        .to_owned()
        .into_shape_with_order(IxDyn(&out))
        .map_err(|e| Error::ShapeMismatch(e.to_string()))
}

fn from_blocks_impl<T: Clone>(blocks: &ArrayD<T>, volume_shape: &[usize]) -> Result<ArrayD<T>> {
    let shape = blocks.shape().to_vec();
    if shape.len() != volume_shape.len() + 1 {
        return Err(Error::InvalidDimensions(format!(
            "block batch must have one more axis than the target volume, got {}D for target {:?}",
            shape.len(),
            volume_shape
        )));
    }
    let block_shape = [shape[1], shape[2], shape[3]];
    let [n0, n1, n2] = block_grid(volume_shape, block_shape)?;
    if shape[0] != n0 * n1 * n2 {
        return Err(Error::ShapeMismatch(format!(
            "got {} blocks of shape {:?}, but volume shape {:?} requires {}",
            shape[0],
            block_shape,
            volume_shape,
            n0 * n1 * n2
        )));
    }
    if volume_shape.len() == 4 && shape[4] != volume_shape[3] {
        return Err(Error::ShapeMismatch(format!(
            "block channel axis {} does not match volume channel axis {}",
            shape[4], volume_shape[3]
        )));
    }

    // (N, b0, b1, b2[, c]) -> (n0, n1, n2, b0, b1, b2[, c]) -> (d0, d1, d2[, c])
    let mut split = vec![n0, n1, n2, block_shape[0], block_shape[1], block_shape[2]];
    let mut perm = vec![0, 3, 1, 4, 2, 5];
    if volume_shape.len() == 4 {
        split.push(volume_shape[3]);
        perm.push(6);
    }

    let contiguous = blocks.as_standard_layout().to_owned();
    let stitched = contiguous
        .into_shape_with_order(IxDyn(&split))
        .map_err(|e| Error::ShapeMismatch(e.to_string()))?
        .permuted_axes(IxDyn(&perm));
    stitched
        .as_standard_layout()
        .to_owned()
        .into_shape_with_order(IxDyn(volume_shape))
        .map_err(|e| Error::ShapeMismatch(e.to_string()))
}

/// Partition a volume into an ordered batch of non-overlapping blocks.
///
/// The result has shape `(num_blocks, b0, b1, b2)` (plus the trailing channel
/// axis when the input carries one), where `num_blocks` is the product of the
/// per-axis quotients. Equivalent to splitting every spatial axis into
/// `(blocks_i, block_shape_i)`, moving the block-count axes to the front in
/// their original order and flattening them into one leading axis.
///
/// `block_shape == volume.shape()` yields exactly one block equal to the
/// whole volume.
#[must_use = "this function returns a new volume and does not modify the original"]
pub fn to_blocks(volume: &Volume, block_shape: [usize; 3]) -> Result<Volume> {
    check_spatial_rank(volume.ndim(), "volume")?;
    let grid = block_grid(volume.shape(), block_shape)?;
    debug!(
        "to_blocks: volume {:?} -> {} blocks of {:?} (grid {:?})",
        volume.shape(),
        grid.iter().product::<usize>(),
        block_shape,
        grid
    );

    macro_rules! tile {
        ($arr:expr, $variant:ident) => {
            Volume::$variant(to_blocks_impl($arr, block_shape)?)
        };
    }
    Ok(match volume {
        Volume::U8(a) => tile!(a, U8),
        Volume::I8(a) => tile!(a, I8),
        Volume::I16(a) => tile!(a, I16),
        Volume::U16(a) => tile!(a, U16),
        Volume::I32(a) => tile!(a, I32),
        Volume::U32(a) => tile!(a, U32),
        Volume::I64(a) => tile!(a, I64),
        Volume::U64(a) => tile!(a, U64),
        Volume::F32(a) => tile!(a, F32),
        Volume::F64(a) => tile!(a, F64),
    })
}

/// Reassemble a volume from a block batch produced by [`to_blocks`].
///
/// Exact left-inverse: `from_blocks(to_blocks(v, b)?, v.shape())` equals `v`
/// elementwise for every block shape `b` compatible with `v`.
#[must_use = "this function returns a new volume and does not modify the original"]
pub fn from_blocks(blocks: &Volume, volume_shape: &[usize]) -> Result<Volume> {
    check_spatial_rank(volume_shape.len(), "target volume shape")?;

    macro_rules! stitch {
        ($arr:expr, $variant:ident) => {
            Volume::$variant(from_blocks_impl($arr, volume_shape)?)
        };
    }
    Ok(match blocks {
        Volume::U8(a) => stitch!(a, U8),
        Volume::I8(a) => stitch!(a, I8),
        Volume::I16(a) => stitch!(a, I16),
        Volume::U16(a) => stitch!(a, U16),
        Volume::I32(a) => stitch!(a, I32),
        Volume::U32(a) => stitch!(a, U32),
        Volume::I64(a) => stitch!(a, I64),
        Volume::U64(a) => stitch!(a, U64),
        Volume::F32(a) => stitch!(a, F32),
        Volume::F64(a) => stitch!(a, F64),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array, Array4};

    fn volume_i64(shape: (usize, usize, usize)) -> Volume {
        let numel = shape.0 * shape.1 * shape.2;
        Array::from_iter(0..numel as i64)
            .into_shape_with_order(IxDyn(&[shape.0, shape.1, shape.2]))
            .unwrap()
            .into()
    }

    #[test]
    fn test_roundtrip_multiple_block_shapes() {
        let v = volume_i64((4, 6, 8));
        for block in [[1, 1, 1], [2, 2, 2], [4, 3, 2], [2, 6, 8], [4, 6, 8]] {
            let blocks = to_blocks(&v, block).unwrap();
            assert_eq!(blocks.shape()[1..], block);
            let back = from_blocks(&blocks, v.shape()).unwrap();
            assert_eq!(back, v);
        }
    }

    #[test]
    fn test_channel_axis_roundtrip() {
        let arr = Array4::from_shape_fn((4, 4, 4, 2), |(i, j, k, c)| {
            (i * 1000 + j * 100 + k * 10 + c) as f32
        })
        .into_dyn();
        let v = Volume::from(arr);
        let blocks = to_blocks(&v, [2, 2, 2]).unwrap();
        assert_eq!(blocks.shape(), &[8, 2, 2, 2, 2]);
        let back = from_blocks(&blocks, v.shape()).unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn test_block_ordering_is_row_major() {
        let v = volume_i64((2, 2, 4));
        let blocks = to_blocks(&v, [2, 2, 2]).unwrap();
        // Two blocks side by side along the last axis; the first holds the
        // low half of that axis.
        let Volume::I64(b) = &blocks else {
            panic!("dtype changed")
        };
        assert_eq!(b.shape(), &[2, 2, 2, 2]);
        assert_eq!(b[[0, 0, 0, 0]], 0);
        assert_eq!(b[[0, 0, 0, 1]], 1);
        assert_eq!(b[[1, 0, 0, 0]], 2);
        assert_eq!(b[[1, 0, 0, 1]], 3);
    }

    #[test]
    fn test_zero_block_dim_rejected() {
        let v = volume_i64((2, 2, 2));
        assert!(matches!(
            to_blocks(&v, [0, 2, 2]),
            Err(Error::ShapeMismatch(_))
        ));
    }

    #[test]
    fn test_rank_validation() {
        let flat: Volume = Array::from_iter(0..8i64)
            .into_shape_with_order(IxDyn(&[8]))
            .unwrap()
            .into();
        assert!(matches!(
            to_blocks(&flat, [2, 2, 2]),
            Err(Error::InvalidDimensions(_))
        ));
    }

    #[test]
    fn test_from_blocks_count_mismatch() {
        let v = volume_i64((4, 4, 4));
        let blocks = to_blocks(&v, [2, 2, 2]).unwrap();
        // Wrong target volume: needs 27 blocks of (2,2,2), we have 8.
        assert!(matches!(
            from_blocks(&blocks, &[6, 6, 6]),
            Err(Error::ShapeMismatch(_))
        ));
    }
}
