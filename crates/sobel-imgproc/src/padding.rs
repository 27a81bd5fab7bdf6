use rayon::prelude::*;
use sobel_image::{Image, ImageSize};

use crate::error::SobelError;

/// Size of an image after adding `margin` pixels on every side.
///
/// # Errors
///
/// Returns [`SobelError::InvalidMargin`] if the padded size does not fit in a `usize`.
pub fn padded_size(size: ImageSize, margin: usize) -> Result<ImageSize, SobelError> {
    let grow = |dim: usize| margin.checked_mul(2).and_then(|border| dim.checked_add(border));
    match (grow(size.width), grow(size.height)) {
        (Some(width), Some(height)) => Ok(ImageSize { width, height }),
        _ => Err(SobelError::InvalidMargin { margin, size }),
    }
}

/// Copy `src` into the center of `dst` and fill the border of `margin` pixels with zeros.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H + 2 * margin, W + 2 * margin, C).
/// * `margin` - The border width in pixels.
///
/// # Errors
///
/// Returns [`SobelError::ShapeMismatch`] if `dst` does not have the padded size.
pub fn zero_padding<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    margin: usize,
) -> Result<(), SobelError>
where
    T: Copy + num_traits::Zero + Send + Sync,
{
    let expected = padded_size(src.size(), margin)?;
    if dst.size() != expected {
        return Err(SobelError::ShapeMismatch(expected, dst.size()));
    }

    let new_data = dst.as_slice_mut();
    new_data.fill(T::zero());

    let old_stride = src.width() * C;
    if old_stride == 0 || src.height() == 0 {
        return Ok(());
    }

    // copy old image data as center of new image data
    let new_stride = expected.width * C;
    let row_offset = margin * new_stride + margin * C;

    new_data[row_offset..]
        .par_chunks_mut(new_stride)
        .zip(src.as_slice().par_chunks_exact(old_stride))
        .for_each(|(dst_row, src_row)| {
            dst_row[..old_stride].copy_from_slice(src_row);
        });

    Ok(())
}

/// Create a new image with a zero border of `margin` pixels around `src`.
///
/// Every channel is padded independently; pixel `(r, c)` of `src` lands at
/// `(r + margin, c + margin)`.
///
/// # Example
///
/// ```rust
/// use sobel_image::{Image, ImageSize};
/// use sobel_imgproc::padding::pad;
///
/// let src = Image::<f32, 1>::from_size_val(ImageSize { width: 2, height: 2 }, 1.0).unwrap();
/// let padded = pad(&src, 1).unwrap();
///
/// assert_eq!(padded.size(), ImageSize { width: 4, height: 4 });
/// assert_eq!(padded.get([0, 0, 0]), Some(&0.0));
/// assert_eq!(padded.get([1, 1, 0]), Some(&1.0));
/// ```
pub fn pad<T, const C: usize>(src: &Image<T, C>, margin: usize) -> Result<Image<T, C>, SobelError>
where
    T: Copy + num_traits::Zero + Send + Sync,
{
    let mut dst = Image::from_size_val(padded_size(src.size(), margin)?, T::zero())?;
    zero_padding(src, &mut dst, margin)?;
    Ok(dst)
}
