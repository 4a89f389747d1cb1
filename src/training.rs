//! Epoch scheduling arithmetic for block-tiled training.

use crate::error::{Error, Result};

/// Number of blocks a single volume tiles into.
///
/// Requires exact divisibility on every axis, consistent with
/// [`to_blocks`](crate::transforms::to_blocks).
pub fn blocks_per_volume(volume_shape: [usize; 3], block_shape: [usize; 3]) -> Result<usize> {
    if block_shape.contains(&0) {
        return Err(Error::ShapeMismatch(format!(
            "block shape must have positive dimensions, got {:?}",
            block_shape
        )));
    }
    if volume_shape
        .iter()
        .zip(block_shape.iter())
        .any(|(&dim, &block)| dim % block != 0)
    {
        return Err(Error::ShapeMismatch(format!(
            "block shape {:?} does not evenly divide volume shape {:?}",
            block_shape, volume_shape
        )));
    }
    Ok(volume_shape
        .iter()
        .zip(block_shape.iter())
        .map(|(&dim, &block)| dim / block)
        .product())
}

/// Number of training steps needed to cover every block of every volume once.
///
/// Rounds up, so a final partial batch still counts as a step.
pub fn get_steps_per_epoch(
    n_volumes: usize,
    volume_shape: [usize; 3],
    block_shape: [usize; 3],
    batch_size: usize,
) -> Result<usize> {
    if batch_size == 0 {
        return Err(Error::Configuration(
            "batch size must be positive".to_string(),
        ));
    }
    let total_blocks = n_volumes * blocks_per_volume(volume_shape, block_shape)?;
    Ok(total_blocks.div_ceil(batch_size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_per_volume() {
        assert_eq!(
            blocks_per_volume([256, 256, 256], [64, 64, 64]).unwrap(),
            64
        );
        assert_eq!(blocks_per_volume([4, 6, 8], [2, 3, 4]).unwrap(), 8);
        assert_eq!(blocks_per_volume([4, 4, 4], [4, 4, 4]).unwrap(), 1);
        assert!(blocks_per_volume([2, 2, 2], [3, 3, 3]).is_err());
        assert!(blocks_per_volume([2, 2, 2], [0, 1, 1]).is_err());
    }

    #[test]
    fn test_partial_batch_rounds_up() {
        assert_eq!(
            get_steps_per_epoch(1, [256, 256, 256], [64, 64, 64], 63).unwrap(),
            2
        );
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        assert!(matches!(
            get_steps_per_epoch(1, [64, 64, 64], [32, 32, 32], 0),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_no_volumes_means_no_steps() {
        assert_eq!(
            get_steps_per_epoch(0, [64, 64, 64], [32, 32, 32], 4).unwrap(),
            0
        );
    }
}
