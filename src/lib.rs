//! volprep: block-based preprocessing of 3D image volumes for neural-network
//! training.
//!
//! The crate prepares dense 3D medical-image volumes (and paired label
//! volumes) for model training:
//!
//! - [`to_blocks`]/[`from_blocks`] partition a volume into an ordered batch
//!   of non-overlapping blocks and reassemble it exactly;
//! - [`binarize`], [`standardize`], [`replace`] and friends provide the
//!   elementwise preprocessing transforms, with explicit output-dtype rules;
//! - [`apply_random_transform`] augments a volume/label pair with one jointly
//!   sampled spatial transform;
//! - [`get_steps_per_epoch`] sizes the training loop over block-tiled data.
//!
//! All operations are synchronous, pure functions over in-memory arrays:
//! inputs are borrowed, outputs are freshly allocated, and malformed input
//! fails eagerly before any data is read or randomness drawn. Dataset
//! loading, file formats and the training loop itself are deliberately out of
//! scope.

pub mod error;
pub mod training;
pub mod transforms;
pub mod volume;

#[cfg(feature = "python")]
pub mod python;

pub use error::{Error, Result};
pub use training::{blocks_per_volume, get_steps_per_epoch};
pub use transforms::{
    apply_random_transform, binarize, clamp, flip, from_blocks, replace, rescale_intensity,
    standardize, to_blocks, LabelMapping,
};
pub use volume::{DataType, Volume};
