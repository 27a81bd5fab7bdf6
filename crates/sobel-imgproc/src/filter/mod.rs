//! Filter operations
//!
//! Direct 3x3 convolution and the directional gradients built on top of it.

/// Filter kernels
pub mod kernels;

/// Filter operations
mod ops;
pub use ops::*;
