//! Random augmentation of paired volume/label data for ML training.
//!
//! A single spatial transform is drawn per call and applied to both members
//! of an image/label pair: trilinear interpolation for the image intensities,
//! nearest-neighbour lookup for the labels so no value absent from the input
//! can appear in the output.

use crate::error::{Error, Result};
use crate::volume::Volume;
use log::debug;
use ndarray::{ArrayD, IxDyn};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

/// Random number generator with optional seeding for reproducibility.
#[allow(clippy::option_if_let_else)] // match is clearer than map_or_else here
fn get_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Rotation magnitude bounds in radians (5 to 15 degrees). The lower bound
/// keeps the sampled transform away from the identity.
const MIN_ANGLE: f64 = 5.0 * std::f64::consts::PI / 180.0;
const MAX_ANGLE: f64 = 15.0 * std::f64::consts::PI / 180.0;

/// Maximum sub-voxel translation per axis, in voxels.
const MAX_SHIFT: f64 = 2.0;

/// One sampled spatial transform: per-axis flips, an in-plane rotation about
/// the volume centre and a continuous translation.
#[derive(Debug, Clone, Copy)]
struct SpatialSample {
    flips: [bool; 3],
    plane: (usize, usize),
    angle: f64,
    shift: [f64; 3],
}

impl SpatialSample {
    fn draw(rng: &mut ChaCha8Rng) -> Self {
        let flips = [rng.gen_bool(0.5), rng.gen_bool(0.5), rng.gen_bool(0.5)];
        let plane = match rng.gen_range(0..3u8) {
            0 => (0, 1),
            1 => (0, 2),
            _ => (1, 2),
        };
        let magnitude = rng.gen_range(MIN_ANGLE..=MAX_ANGLE);
        let angle = if rng.gen_bool(0.5) { magnitude } else { -magnitude };
        let shift = [
            rng.gen_range(-MAX_SHIFT..=MAX_SHIFT),
            rng.gen_range(-MAX_SHIFT..=MAX_SHIFT),
            rng.gen_range(-MAX_SHIFT..=MAX_SHIFT),
        ];
        Self {
            flips,
            plane,
            angle,
            shift,
        }
    }

    /// Source coordinate in the input grid for the output voxel at `p`.
    fn source(&self, dims: [usize; 3], p: [f64; 3]) -> [f64; 3] {
        let mut q = [
            p[0] - self.shift[0],
            p[1] - self.shift[1],
            p[2] - self.shift[2],
        ];

        let (a, b) = self.plane;
        let centre_a = (dims[a] - 1) as f64 / 2.0;
        let centre_b = (dims[b] - 1) as f64 / 2.0;
        let (sin, cos) = (-self.angle).sin_cos();
        let da = q[a] - centre_a;
        let db = q[b] - centre_b;
        q[a] = centre_a + cos * da - sin * db;
        q[b] = centre_b + sin * da + cos * db;

        for axis in 0..3 {
            if self.flips[axis] {
                q[axis] = (dims[axis] - 1) as f64 - q[axis];
            }
        }
        q
    }
}

#[inline]
fn flat_index(dims: [usize; 3], i: usize, j: usize, k: usize) -> usize {
    (i * dims[1] + j) * dims[2] + k
}

/// Trilinear sample of `src` (row-major, shape `dims`) at a continuous
/// coordinate. Out-of-bounds coordinates clamp to the edge.
fn sample_trilinear(src: &[f32], dims: [usize; 3], q: [f64; 3]) -> f32 {
    let mut lo = [0usize; 3];
    let mut hi = [0usize; 3];
    let mut frac = [0f64; 3];
    for axis in 0..3 {
        let max = (dims[axis] - 1) as f64;
        let coord = q[axis].clamp(0.0, max);
        let floor = coord.floor();
        lo[axis] = floor as usize;
        hi[axis] = (lo[axis] + 1).min(dims[axis] - 1);
        frac[axis] = coord - floor;
    }

    let mut acc = 0f64;
    for (corner_i, weight_i) in [(lo[0], 1.0 - frac[0]), (hi[0], frac[0])] {
        for (corner_j, weight_j) in [(lo[1], 1.0 - frac[1]), (hi[1], frac[1])] {
            for (corner_k, weight_k) in [(lo[2], 1.0 - frac[2]), (hi[2], frac[2])] {
                let w = weight_i * weight_j * weight_k;
                if w > 0.0 {
                    acc += w * f64::from(src[flat_index(dims, corner_i, corner_j, corner_k)]);
                }
            }
        }
    }
    acc as f32
}

fn warp_trilinear(src: &[f32], dims: [usize; 3], transform: &SpatialSample) -> Vec<f32> {
    let mut out = vec![0f32; dims[0] * dims[1] * dims[2]];
    out.par_chunks_mut(dims[1] * dims[2])
        .enumerate()
        .for_each(|(i, plane)| {
            for j in 0..dims[1] {
                for k in 0..dims[2] {
                    let q = transform.source(dims, [i as f64, j as f64, k as f64]);
                    plane[j * dims[2] + k] = sample_trilinear(src, dims, q);
                }
            }
        });
    out
}

fn warp_nearest<T: Copy + Send + Sync>(
    src: &[T],
    dims: [usize; 3],
    transform: &SpatialSample,
) -> Vec<T> {
    let mut out = vec![src[0]; dims[0] * dims[1] * dims[2]];
    out.par_chunks_mut(dims[1] * dims[2])
        .enumerate()
        .for_each(|(i, plane)| {
            for j in 0..dims[1] {
                for k in 0..dims[2] {
                    let q = transform.source(dims, [i as f64, j as f64, k as f64]);
                    let mut nearest = [0usize; 3];
                    for axis in 0..3 {
                        let max = (dims[axis] - 1) as f64;
                        nearest[axis] = q[axis].clamp(0.0, max).round() as usize;
                    }
                    plane[j * dims[2] + k] =
                        src[flat_index(dims, nearest[0], nearest[1], nearest[2])];
                }
            }
        });
    out
}

/// Apply one randomly sampled spatial transform to a volume and its label
/// volume jointly.
///
/// Both inputs must be exactly 3-dimensional with identical shapes; the pair
/// is validated before any randomness is drawn. The intensity volume is
/// resampled with trilinear interpolation and materialized as f32; the label
/// volume is resampled with nearest-neighbour lookup in its own dtype, so the
/// set of distinct label values never grows. Shapes are preserved exactly.
///
/// With `seed == None` each call draws fresh process-wide entropy, so two
/// calls on identical inputs produce different outputs with overwhelming
/// probability. Pass a seed to make the call reproducible.
#[must_use = "this function returns new volumes and does not modify the originals"]
pub fn apply_random_transform(
    volume: &Volume,
    labels: &Volume,
    seed: Option<u64>,
) -> Result<(Volume, Volume)> {
    if volume.ndim() != 3 || labels.ndim() != 3 {
        return Err(Error::InvalidDimensions(format!(
            "paired transform requires 3D inputs, got {}D volume and {}D labels",
            volume.ndim(),
            labels.ndim()
        )));
    }
    if volume.shape() != labels.shape() {
        return Err(Error::ShapeMismatch(format!(
            "volume shape {:?} does not match label shape {:?}",
            volume.shape(),
            labels.shape()
        )));
    }
    if volume.is_empty() {
        return Err(Error::DegenerateInput(
            "cannot transform an empty volume".to_string(),
        ));
    }

    let shape = volume.shape().to_vec();
    let dims = [shape[0], shape[1], shape[2]];
    let mut rng = get_rng(seed);
    let transform = SpatialSample::draw(&mut rng);
    debug!(
        "apply_random_transform: flips {:?}, plane {:?}, angle {:.4} rad, shift {:?}",
        transform.flips, transform.plane, transform.angle, transform.shift
    );

    let intensities: Vec<f32> = volume.to_f32().iter().copied().collect();
    let warped = warp_trilinear(&intensities, dims, &transform);
    let warped = Volume::F32(
        ArrayD::from_shape_vec(IxDyn(&shape), warped)
            .map_err(|e| Error::ShapeMismatch(e.to_string()))?,
    );

    macro_rules! resample_labels {
        ($arr:expr, $variant:ident) => {{
            let src: Vec<_> = $arr.iter().copied().collect();
            Volume::$variant(
                ArrayD::from_shape_vec(IxDyn(&shape), warp_nearest(&src, dims, &transform))
                    .map_err(|e| Error::ShapeMismatch(e.to_string()))?,
            )
        }};
    }
    let warped_labels = match labels {
        Volume::U8(a) => resample_labels!(a, U8),
        Volume::I8(a) => resample_labels!(a, I8),
        Volume::I16(a) => resample_labels!(a, I16),
        Volume::U16(a) => resample_labels!(a, U16),
        Volume::I32(a) => resample_labels!(a, I32),
        Volume::U32(a) => resample_labels!(a, U32),
        Volume::I64(a) => resample_labels!(a, I64),
        Volume::U64(a) => resample_labels!(a, U64),
        Volume::F32(a) => resample_labels!(a, F32),
        Volume::F64(a) => resample_labels!(a, F64),
    };

    Ok((warped, warped_labels))
}
