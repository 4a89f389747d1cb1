//! Dense volume values.
//!
//! A [`Volume`] is a dtype-tagged dense array: one variant per supported
//! element type, each holding an [`ndarray::ArrayD`]. Transforms consume
//! volumes by reference and produce new volumes; nothing mutates in place.

pub(crate) mod dtype;

pub use dtype::DataType;

use ndarray::ArrayD;

/// A dense numeric array with its element type tracked at runtime.
///
/// Spatial volumes are rank 3 (optionally with a trailing channel axis for
/// the block operations); rank is validated by each operation so that
/// rank-agnostic transforms such as [`replace`](crate::transforms::replace)
/// also accept 1-D arrays.
#[derive(Debug, Clone, PartialEq)]
pub enum Volume {
    /// Unsigned 8-bit elements
    U8(ArrayD<u8>),
    /// Signed 8-bit elements
    I8(ArrayD<i8>),
    /// Signed 16-bit elements
    I16(ArrayD<i16>),
    /// Unsigned 16-bit elements
    U16(ArrayD<u16>),
    /// Signed 32-bit elements
    I32(ArrayD<i32>),
    /// Unsigned 32-bit elements
    U32(ArrayD<u32>),
    /// Signed 64-bit elements
    I64(ArrayD<i64>),
    /// Unsigned 64-bit elements
    U64(ArrayD<u64>),
    /// 32-bit float elements
    F32(ArrayD<f32>),
    /// 64-bit float elements
    F64(ArrayD<f64>),
}

macro_rules! volume_from {
    ($t:ty, $variant:ident) => {
        impl From<ArrayD<$t>> for Volume {
            fn from(array: ArrayD<$t>) -> Self {
                Self::$variant(array)
            }
        }
    };
}

volume_from!(u8, U8);
volume_from!(i8, I8);
volume_from!(i16, I16);
volume_from!(u16, U16);
volume_from!(i32, I32);
volume_from!(u32, U32);
volume_from!(i64, I64);
volume_from!(u64, U64);
volume_from!(f32, F32);
volume_from!(f64, F64);

impl Volume {
    /// Element data type.
    pub const fn dtype(&self) -> DataType {
        match self {
            Self::U8(_) => DataType::UInt8,
            Self::I8(_) => DataType::Int8,
            Self::I16(_) => DataType::Int16,
            Self::U16(_) => DataType::UInt16,
            Self::I32(_) => DataType::Int32,
            Self::U32(_) => DataType::UInt32,
            Self::I64(_) => DataType::Int64,
            Self::U64(_) => DataType::UInt64,
            Self::F32(_) => DataType::Float32,
            Self::F64(_) => DataType::Float64,
        }
    }

    /// Array shape.
    pub fn shape(&self) -> &[usize] {
        match self {
            Self::U8(a) => a.shape(),
            Self::I8(a) => a.shape(),
            Self::I16(a) => a.shape(),
            Self::U16(a) => a.shape(),
            Self::I32(a) => a.shape(),
            Self::U32(a) => a.shape(),
            Self::I64(a) => a.shape(),
            Self::U64(a) => a.shape(),
            Self::F32(a) => a.shape(),
            Self::F64(a) => a.shape(),
        }
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.shape().len()
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.shape().iter().product()
    }

    /// Whether the volume holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Materialize the data as an f32 array, converting if necessary.
    pub fn to_f32(&self) -> ArrayD<f32> {
        match self {
            Self::U8(a) => a.mapv(|v| v as f32),
            Self::I8(a) => a.mapv(|v| v as f32),
            Self::I16(a) => a.mapv(|v| v as f32),
            Self::U16(a) => a.mapv(|v| v as f32),
            Self::I32(a) => a.mapv(|v| v as f32),
            Self::U32(a) => a.mapv(|v| v as f32),
            Self::I64(a) => a.mapv(|v| v as f32),
            Self::U64(a) => a.mapv(|v| v as f32),
            Self::F32(a) => a.clone(),
            Self::F64(a) => a.mapv(|v| v as f32),
        }
    }

    /// Materialize the data as an f64 array, converting if necessary.
    pub fn to_f64(&self) -> ArrayD<f64> {
        match self {
            Self::U8(a) => a.mapv(f64::from),
            Self::I8(a) => a.mapv(f64::from),
            Self::I16(a) => a.mapv(f64::from),
            Self::U16(a) => a.mapv(f64::from),
            Self::I32(a) => a.mapv(f64::from),
            Self::U32(a) => a.mapv(f64::from),
            Self::I64(a) => a.mapv(|v| v as f64),
            Self::U64(a) => a.mapv(|v| v as f64),
            Self::F32(a) => a.mapv(f64::from),
            Self::F64(a) => a.clone(),
        }
    }
}
