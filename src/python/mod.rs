//! Python bindings for volprep.

pub mod conversion;
pub mod module;
pub mod ops;
pub mod validation;
