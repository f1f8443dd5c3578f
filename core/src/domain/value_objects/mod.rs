//! Value objects representing immutable domain concepts.

pub mod code_parameters;

pub use code_parameters::{CodeParameters, Digits, HashAlgorithm};
