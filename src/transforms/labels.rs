//! Label-value substitution.
//!
//! [`replace`] rewrites class indices in a label volume according to a
//! [`LabelMapping`]. Substitution is a single one-shot pass over the original
//! array: results are never re-substituted, so overlapping keys and values do
//! not cascade.

use crate::error::{Error, Result};
use crate::volume::Volume;
use ndarray::ArrayD;
use num_traits::{NumCast, Zero};

/// A finite key -> value substitution table over class indices.
///
/// Pairs are stored sorted ascending by key, so enumeration order is fixed
/// and independent of construction order. Keys are unique; construction
/// rejects duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMapping {
    pairs: Vec<(i64, i64)>,
}

impl LabelMapping {
    /// Build a mapping from key/value pairs.
    ///
    /// Fails with [`Error::InvalidMapping`] if the same key appears twice.
    pub fn from_pairs(pairs: &[(i64, i64)]) -> Result<Self> {
        let mut pairs = pairs.to_vec();
        pairs.sort_unstable_by_key(|&(key, _)| key);
        if let Some(dup) = pairs.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(Error::InvalidMapping(format!(
                "duplicate key {} in mapping",
                dup[0].0
            )));
        }
        Ok(Self { pairs })
    }

    /// Key/value pairs in ascending key order.
    pub fn pairs(&self) -> &[(i64, i64)] {
        &self.pairs
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the mapping holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Convert the table to a concrete element type.
    ///
    /// A key that is not representable in `T` can never match an element and
    /// is skipped; a representable key whose value does not fit is an error
    /// rather than a silent truncation.
    fn typed<T: NumCast>(&self) -> Result<(Vec<T>, Vec<T>)> {
        let mut keys = Vec::with_capacity(self.pairs.len());
        let mut values = Vec::with_capacity(self.pairs.len());
        for &(key, value) in &self.pairs {
            let Some(k) = num_traits::cast::<i64, T>(key) else {
                continue;
            };
            let Some(v) = num_traits::cast::<i64, T>(value) else {
                return Err(Error::InvalidMapping(format!(
                    "mapped value {} (for key {}) is not representable in the array dtype",
                    value, key
                )));
            };
            keys.push(k);
            values.push(v);
        }
        Ok((keys, values))
    }
}

/// First index whose key equals `x`, given keys sorted ascending.
fn lookup<T: PartialOrd>(keys: &[T], x: &T) -> Option<usize> {
    let mut lo = 0;
    let mut hi = keys.len();
    while lo < hi {
        let mid = (lo + hi) / 2;
        if keys[mid] < *x {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    (lo < keys.len() && keys[lo] == *x).then_some(lo)
}

fn replace_impl<T>(array: &ArrayD<T>, mapping: &LabelMapping, zero: bool) -> Result<ArrayD<T>>
where
    T: Copy + PartialOrd + NumCast + Zero,
{
    let (keys, values) = mapping.typed::<T>()?;
    Ok(array.mapv(|element| match lookup(&keys, &element) {
        Some(index) => values[index],
        None if zero => T::zero(),
        None => element,
    }))
}

/// Substitute label values according to `mapping`.
///
/// Each element is compared against the mapping keys in ascending order and
/// replaced by the value of the first equal key; the pass runs over the
/// original array only, so a replacement is never itself re-substituted.
/// Elements matching no key are copied unchanged, or set to 0 when
/// `zero` is true. Works for arrays of any rank and preserves the dtype.
#[must_use = "this function returns a new volume and does not modify the original"]
pub fn replace(volume: &Volume, mapping: &LabelMapping, zero: bool) -> Result<Volume> {
    macro_rules! remap {
        ($arr:expr, $variant:ident) => {
            Volume::$variant(replace_impl($arr, mapping, zero)?)
        };
    }
    Ok(match volume {
        Volume::U8(a) => remap!(a, U8),
        Volume::I8(a) => remap!(a, I8),
        Volume::I16(a) => remap!(a, I16),
        Volume::U16(a) => remap!(a, U16),
        Volume::I32(a) => remap!(a, I32),
        Volume::U32(a) => remap!(a, U32),
        Volume::I64(a) => remap!(a, I64),
        Volume::U64(a) => remap!(a, U64),
        Volume::F32(a) => remap!(a, F32),
        Volume::F64(a) => remap!(a, F64),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array, IxDyn};

    fn labels_1d(values: &[i64]) -> Volume {
        Array::from_iter(values.iter().copied())
            .into_shape_with_order(IxDyn(&[values.len()]))
            .unwrap()
            .into()
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let err = LabelMapping::from_pairs(&[(1, 2), (1, 3)]).unwrap_err();
        assert!(matches!(err, Error::InvalidMapping(_)));
    }

    #[test]
    fn test_pairs_sorted_by_key() {
        let mapping = LabelMapping::from_pairs(&[(3, 0), (1, 5), (2, 7)]).unwrap();
        assert_eq!(mapping.pairs(), &[(1, 5), (2, 7), (3, 0)]);
    }

    #[test]
    fn test_single_pass_no_cascade() {
        let mapping = LabelMapping::from_pairs(&[(0, 1), (1, 2), (2, 3), (3, 4)]).unwrap();
        let out = replace(&labels_1d(&[0, 1, 2, 3, 4]), &mapping, false).unwrap();
        assert_eq!(out, labels_1d(&[1, 2, 3, 4, 4]));
    }

    #[test]
    fn test_unrepresentable_key_never_matches() {
        let mapping = LabelMapping::from_pairs(&[(300, 1), (2, 5)]).unwrap();
        let data: Volume = Array::from_iter([44u8, 2u8])
            .into_shape_with_order(IxDyn(&[2]))
            .unwrap()
            .into();
        // Key 300 does not fit in u8; it must not alias some in-range value.
        let out = replace(&data, &mapping, false).unwrap();
        let expected: Volume = Array::from_iter([44u8, 5u8])
            .into_shape_with_order(IxDyn(&[2]))
            .unwrap()
            .into();
        assert_eq!(out, expected);
    }

    #[test]
    fn test_unrepresentable_value_rejected() {
        let mapping = LabelMapping::from_pairs(&[(2, 300)]).unwrap();
        let data: Volume = Array::from_iter([2u8])
            .into_shape_with_order(IxDyn(&[1]))
            .unwrap()
            .into();
        assert!(matches!(
            replace(&data, &mapping, false),
            Err(Error::InvalidMapping(_))
        ));
    }

    #[test]
    fn test_float_labels() {
        let mapping = LabelMapping::from_pairs(&[(0, 10), (1, 20)]).unwrap();
        let data: Volume = Array::from_iter([0.0f32, 1.0, 2.0])
            .into_shape_with_order(IxDyn(&[3]))
            .unwrap()
            .into();
        let out = replace(&data, &mapping, true).unwrap();
        let expected: Volume = Array::from_iter([10.0f32, 20.0, 0.0])
            .into_shape_with_order(IxDyn(&[3]))
            .unwrap()
            .into();
        assert_eq!(out, expected);
    }
}
