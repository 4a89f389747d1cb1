//! Preprocessing transforms over [`Volume`](crate::volume::Volume) values.
//!
//! Every transform is a pure function: it validates eagerly, borrows its
//! inputs and returns a freshly allocated volume. Transforms are safe to call
//! concurrently; the only shared state is the process-wide entropy consumed
//! by [`apply_random_transform`] when no seed is given.

pub mod augment;
pub mod blocks;
pub mod intensity;
pub mod labels;
pub mod spatial;

pub use augment::apply_random_transform;
pub use blocks::{from_blocks, to_blocks};
pub use intensity::{binarize, clamp, rescale_intensity, standardize};
pub use labels::{replace, LabelMapping};
pub use spatial::flip;
