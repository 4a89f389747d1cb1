//! Error types for volprep operations.

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by volume preprocessing operations.
///
/// Every failure is a deterministic validation failure on malformed input;
/// operations validate eagerly and abort before any data is read or any
/// randomness is drawn.
#[derive(Debug, Error)]
pub enum Error {
    /// Shapes of two arrays (or an array and a block shape) do not agree.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// An array has the wrong rank, or an axis index is out of range.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Numerically degenerate input (e.g. zero variance) for which the
    /// operation has no well-defined output.
    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    /// A label mapping cannot be constructed or applied.
    #[error("invalid mapping: {0}")]
    InvalidMapping(String),

    /// Invalid operation parameters (e.g. a zero batch size).
    #[error("configuration error: {0}")]
    Configuration(String),
}
