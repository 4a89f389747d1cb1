//! Element data types and output-dtype policy.
//!
//! Transforms that change the numeric family of their output (binarize,
//! standardize) derive the output type from an explicit policy table here
//! rather than ad hoc branching, so the rules stay auditable.

use crate::error::Error;

/// Element data type of a [`Volume`](crate::volume::Volume).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Unsigned 8-bit integer
    UInt8,
    /// Signed 8-bit integer
    Int8,
    /// Signed 16-bit integer
    Int16,
    /// Unsigned 16-bit integer
    UInt16,
    /// Signed 32-bit integer
    Int32,
    /// Unsigned 32-bit integer
    UInt32,
    /// Signed 64-bit integer
    Int64,
    /// Unsigned 64-bit integer
    UInt64,
    /// 32-bit floating point
    Float32,
    /// 64-bit floating point
    Float64,
}

impl DataType {
    /// Size of each element in bytes.
    pub const fn byte_size(self) -> usize {
        match self {
            Self::UInt8 | Self::Int8 => 1,
            Self::Int16 | Self::UInt16 => 2,
            Self::Int32 | Self::UInt32 | Self::Float32 => 4,
            Self::Int64 | Self::UInt64 | Self::Float64 => 8,
        }
    }

    /// Whether this is a floating-point type.
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    /// Output type of [`binarize`](crate::transforms::binarize): the
    /// comparison result is cast back to the input's own family and width.
    pub const fn binarize_output(self) -> Self {
        match self {
            Self::UInt8 => Self::UInt8,
            Self::Int8 => Self::Int8,
            Self::Int16 => Self::Int16,
            Self::UInt16 => Self::UInt16,
            Self::Int32 => Self::Int32,
            Self::UInt32 => Self::UInt32,
            Self::Int64 => Self::Int64,
            Self::UInt64 => Self::UInt64,
            Self::Float32 => Self::Float32,
            Self::Float64 => Self::Float64,
        }
    }

    /// Output type of [`standardize`](crate::transforms::standardize) and
    /// [`rescale_intensity`](crate::transforms::rescale_intensity): always
    /// floating point, keeping the width of float input and defaulting to
    /// 32-bit for integer input.
    pub const fn standardize_output(self) -> Self {
        match self {
            Self::Float64 => Self::Float64,
            Self::Float32
            | Self::UInt8
            | Self::Int8
            | Self::Int16
            | Self::UInt16
            | Self::Int32
            | Self::UInt32
            | Self::Int64
            | Self::UInt64 => Self::Float32,
        }
    }

    /// Get the Rust type name for documentation.
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::UInt8 => "u8",
            Self::Int8 => "i8",
            Self::Int16 => "i16",
            Self::UInt16 => "u16",
            Self::Int32 => "i32",
            Self::UInt32 => "u32",
            Self::Int64 => "i64",
            Self::UInt64 => "u64",
            Self::Float32 => "f32",
            Self::Float64 => "f64",
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

impl std::str::FromStr for DataType {
    type Err = Error;

    fn from_str(s: &str) -> crate::error::Result<Self> {
        match s.to_lowercase().as_str() {
            "u8" | "uint8" => Ok(Self::UInt8),
            "i8" | "int8" => Ok(Self::Int8),
            "i16" | "int16" => Ok(Self::Int16),
            "u16" | "uint16" => Ok(Self::UInt16),
            "i32" | "int32" => Ok(Self::Int32),
            "u32" | "uint32" => Ok(Self::UInt32),
            "i64" | "int64" => Ok(Self::Int64),
            "u64" | "uint64" => Ok(Self::UInt64),
            "f32" | "float32" => Ok(Self::Float32),
            "f64" | "float64" => Ok(Self::Float64),
            _ => Err(Error::Configuration(format!(
                "unknown data type: '{}' (expected u8, i16, f32, etc.)",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [DataType; 10] = [
        DataType::UInt8,
        DataType::Int8,
        DataType::Int16,
        DataType::UInt16,
        DataType::Int32,
        DataType::UInt32,
        DataType::Int64,
        DataType::UInt64,
        DataType::Float32,
        DataType::Float64,
    ];

    #[test]
    fn test_binarize_policy_preserves_family_and_width() {
        for dt in ALL {
            let out = dt.binarize_output();
            assert_eq!(out.is_float(), dt.is_float());
            assert_eq!(out.byte_size(), dt.byte_size());
            assert_eq!(out, dt);
        }
    }

    #[test]
    fn test_standardize_policy_is_float() {
        for dt in ALL {
            assert!(dt.standardize_output().is_float());
        }
        // Float width follows the input; integers get the default width.
        assert_eq!(DataType::Float64.standardize_output(), DataType::Float64);
        assert_eq!(DataType::Float32.standardize_output(), DataType::Float32);
        assert_eq!(DataType::Int64.standardize_output(), DataType::Float32);
        assert_eq!(DataType::UInt8.standardize_output(), DataType::Float32);
    }

    #[test]
    fn test_parse_roundtrip() {
        for dt in ALL {
            let parsed: DataType = dt.type_name().parse().unwrap();
            assert_eq!(parsed, dt);
        }
        assert!("f128".parse::<DataType>().is_err());
    }
}
