#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// utilities to draw on images.
pub mod draw;

/// error types of the edge detection operations.
pub mod error;

/// image filtering module.
pub mod filter;

/// gradient magnitude module.
pub mod magnitude;

/// gradient orientation sampling and rendering.
pub mod orientation;

/// image padding module.
pub mod padding;

/// module containing parallization utilities.
pub mod parallel;

/// configuration of the edge detection steps.
pub mod params;

/// end to end edge detection.
pub mod pipeline;

pub use error::SobelError;
