#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use sobel_image as image;

#[doc(inline)]
pub use sobel_imgproc as imgproc;
