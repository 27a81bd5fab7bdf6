use sobel_image::{ImageError, ImageSize};

/// Errors raised by the edge detection operations.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SobelError {
    /// Two images that must share a shape do not.
    #[error("Shape mismatch: {0} vs {1}")]
    ShapeMismatch(ImageSize, ImageSize),

    /// The margin leaves no pixel whose 3x3 neighborhood lies inside the image, or the
    /// padded size would overflow.
    #[error("Margin {margin} is not valid for a {size}")]
    InvalidMargin {
        /// The requested margin in pixels.
        margin: usize,
        /// The size of the image the margin applies to.
        size: ImageSize,
    },

    /// The orientation sampling stride must be strictly positive.
    #[error("Sampling stride must be > 0, got {0}")]
    InvalidStride(usize),

    /// Error coming from the image container.
    #[error(transparent)]
    Image(#[from] ImageError),
}
