//! Small ndarray-like types used throughout the crate.
//!
//! Provides `Array2`, a dense row-major 2D container with minimal convenience
//! methods. The type is intentionally small and dependency-free to keep the
//! crate portable and easy to test.
pub mod matrix;

pub use matrix::{Array2, ShapeError};
