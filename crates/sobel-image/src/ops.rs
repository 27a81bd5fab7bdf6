use crate::{Image, ImageError};

/// Convert a float image into an 8-bit image, saturating each sample to `[0, 255]`.
///
/// Fractional parts are truncated.
pub fn saturate_to_u8<const C: usize>(src: &Image<f32, C>) -> Image<u8, C> {
    src.map(|&v| v.clamp(0.0, 255.0) as u8)
}

/// Replicate a single channel image into three identical channels.
pub fn gray_to_rgb<T: Copy>(src: &Image<T, 1>) -> Result<Image<T, 3>, ImageError> {
    let data = src
        .as_slice()
        .iter()
        .flat_map(|&v| [v, v, v])
        .collect::<Vec<_>>();

    Image::new(src.size(), data)
}
