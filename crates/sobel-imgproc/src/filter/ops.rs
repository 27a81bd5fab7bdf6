use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};
use sobel_image::{Image, ImageSize};

use super::kernels::Kernel3;
use crate::error::SobelError;

/// Maximum sample value of the 8-bit display range.
pub const DISPLAY_MAX: f32 = 255.0;

/// Map a raw directional response from `[-255, 255]` into `[0, 255]`.
///
/// The bound only holds for kernels whose absolute weights sum to one on each side,
/// such as [`Kernel3::sobel_horizontal`] and [`Kernel3::sobel_vertical`]. Other kernels
/// need a different scale.
#[inline]
pub fn rescale_response(value: f32) -> f32 {
    (value + DISPLAY_MAX) / (2.0 * DISPLAY_MAX) * DISPLAY_MAX
}

/// Check that `margin` leaves at least one pixel whose 3x3 neighborhood is in bounds.
pub fn validate_margin(size: ImageSize, margin: usize) -> Result<(), SobelError> {
    if margin == 0 || size.width <= 2 * margin || size.height <= 2 * margin {
        return Err(SobelError::InvalidMargin { margin, size });
    }
    Ok(())
}

fn apply_kernel3<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    kernel: &Kernel3,
    margin: usize,
    post: impl Fn(f32) -> f32 + Send + Sync,
) -> Result<(), SobelError> {
    if src.size() != dst.size() {
        return Err(SobelError::ShapeMismatch(src.size(), dst.size()));
    }
    validate_margin(src.size(), margin)?;

    let rows = src.rows();
    let cols = src.cols();
    let weights = kernel.weights();
    let src_data = src.as_slice();

    dst.as_slice_mut()
        .par_chunks_exact_mut(cols * C)
        .enumerate()
        .skip(margin)
        .take(rows - 2 * margin)
        .for_each(|(r, dst_row)| {
            for c in margin..cols - margin {
                for ch in 0..C {
                    let mut sum = 0.0f32;
                    for (ky, kernel_row) in weights.iter().enumerate() {
                        let row_offset = (r + ky - 1) * cols;
                        for (kx, &w) in kernel_row.iter().enumerate() {
                            sum += w * src_data[(row_offset + c + kx - 1) * C + ch];
                        }
                    }
                    dst_row[c * C + ch] = post(sum);
                }
            }
        });

    Ok(())
}

/// Correlate an image with a 3x3 kernel inside the margin.
///
/// Only pixels with row and column in `[margin, dim - margin)` are written; the margin
/// band of `dst` is left untouched. No rescaling is applied.
///
/// # Arguments
///
/// * `src` - The padded source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel` - The 3x3 kernel.
/// * `margin` - The padding margin used to build `src`.
///
/// # Errors
///
/// [`SobelError::ShapeMismatch`] if `src` and `dst` differ in size and
/// [`SobelError::InvalidMargin`] if the margin leaves no interior.
pub fn filter3x3<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    kernel: &Kernel3,
    margin: usize,
) -> Result<(), SobelError> {
    apply_kernel3(src, dst, kernel, margin, |v| v)
}

/// Compute a directional gradient image from a padded image.
///
/// Every interior sample is the 3x3 response of `kernel`, mapped with
/// [`rescale_response`] and truncated toward zero. Samples in the margin band are zero.
/// A warning is logged when the kernel can respond outside `[-255, 255]`.
///
/// # Example
///
/// ```
/// use sobel_image::Image;
/// use sobel_imgproc::filter::{directional_gradient, kernels::Kernel3};
///
/// let padded = Image::<f32, 1>::from_size_val([8, 8].into(), 100.0).unwrap();
/// let ix = directional_gradient(&padded, &Kernel3::sobel_horizontal(), 2).unwrap();
///
/// assert_eq!(ix.get([4, 4, 0]), Some(&127.0));
/// assert_eq!(ix.get([0, 0, 0]), Some(&0.0));
/// ```
pub fn directional_gradient<const C: usize>(
    padded: &Image<f32, C>,
    kernel: &Kernel3,
    margin: usize,
) -> Result<Image<f32, C>, SobelError> {
    let bound = kernel.response_bound(DISPLAY_MAX);
    if bound != DISPLAY_MAX {
        log::warn!(
            "kernel responses reach ±{bound}, outside the ±{DISPLAY_MAX} range mapped to the display"
        );
    }

    let mut dst = Image::from_size_val(padded.size(), 0.0)?;
    apply_kernel3(padded, &mut dst, kernel, margin, |v| {
        rescale_response(v).trunc()
    })?;
    Ok(dst)
}

/// Compute the horizontal and vertical gradient images of a padded image.
///
/// Returns `(ix, iy)`.
pub fn spatial_gradient<const C: usize>(
    padded: &Image<f32, C>,
    kernel_x: &Kernel3,
    kernel_y: &Kernel3,
    margin: usize,
) -> Result<(Image<f32, C>, Image<f32, C>), SobelError> {
    let ix = directional_gradient(padded, kernel_x, margin)?;
    let iy = directional_gradient(padded, kernel_y, margin)?;
    Ok((ix, iy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::kernels::sobel_kernels3;
    use sobel_image::ImageSize;

    #[test]
    fn test_rescale_response() {
        assert_eq!(rescale_response(-255.0), 0.0);
        assert_eq!(rescale_response(0.0), 127.5);
        assert_eq!(rescale_response(255.0), 255.0);
    }

    #[test]
    fn test_filter3x3_step_edge() -> Result<(), SobelError> {
        // left half bright, right half dark
        #[rustfmt::skip]
        let src = Image::<f32, 1>::new(
            ImageSize { width: 5, height: 5 },
            vec![
                0.0, 0.0, 0.0, 0.0, 0.0,
                0.0, 200.0, 200.0, 0.0, 0.0,
                0.0, 200.0, 200.0, 0.0, 0.0,
                0.0, 200.0, 200.0, 0.0, 0.0,
                0.0, 0.0, 0.0, 0.0, 0.0,
            ],
        )?;
        let (kx, ky) = sobel_kernels3();

        let mut ix = Image::from_size_val(src.size(), -1.0)?;
        filter3x3(&src, &mut ix, &kx, 1)?;

        // untouched margin band
        assert_eq!(ix.get([0, 0, 0]), Some(&-1.0));
        assert_eq!(ix.get([4, 2, 0]), Some(&-1.0));

        // center row: 0.25*200 + 0.5*200 + 0.25*200 on the left column
        assert_eq!(ix.get([2, 3, 0]), Some(&200.0));
        assert_eq!(ix.get([2, 2, 0]), Some(&200.0));
        assert_eq!(ix.get([2, 1, 0]), Some(&-200.0));

        let mut iy = Image::from_size_val(src.size(), 0.0)?;
        filter3x3(&src, &mut iy, &ky, 1)?;
        assert_eq!(iy.get([1, 1, 0]), Some(&-150.0));
        assert_eq!(iy.get([2, 1, 0]), Some(&0.0));
        assert_eq!(iy.get([3, 1, 0]), Some(&150.0));

        Ok(())
    }

    #[test]
    fn test_directional_gradient_uniform() -> Result<(), SobelError> {
        let padded = Image::<f32, 3>::from_size_val([7, 6].into(), 42.0)?;
        let (kx, ky) = sobel_kernels3();
        let (ix, iy) = spatial_gradient(&padded, &kx, &ky, 2)?;

        for r in 0..6 {
            for c in 0..7 {
                let interior = (2..4).contains(&r) && (2..5).contains(&c);
                let expected = if interior { 127.0 } else { 0.0 };
                for ch in 0..3 {
                    assert_eq!(ix.get([r, c, ch]), Some(&expected));
                    assert_eq!(iy.get([r, c, ch]), Some(&expected));
                }
            }
        }

        Ok(())
    }

    #[test]
    fn test_directional_gradient_extremes() -> Result<(), SobelError> {
        // column 0 at 255, the rest at 0: the pixel at column 1 sees the full response
        let mut src = Image::<f32, 1>::from_size_val([3, 3].into(), 0.0)?;
        for r in 0..3 {
            src.set_pixel(0, r, 0, 255.0)?;
        }
        let ix = directional_gradient(&src, &Kernel3::sobel_horizontal(), 1)?;
        assert_eq!(ix.get([1, 1, 0]), Some(&255.0));

        let mut src = Image::<f32, 1>::from_size_val([3, 3].into(), 0.0)?;
        for r in 0..3 {
            src.set_pixel(2, r, 0, 255.0)?;
        }
        let ix = directional_gradient(&src, &Kernel3::sobel_horizontal(), 1)?;
        assert_eq!(ix.get([1, 1, 0]), Some(&0.0));

        Ok(())
    }

    #[test]
    fn test_directional_gradient_unnormalized_kernel() -> Result<(), SobelError> {
        let _ = env_logger::builder().is_test(true).try_init();
        let kernel = Kernel3::new([[1.0, 0.0, -1.0], [2.0, 0.0, -2.0], [1.0, 0.0, -1.0]]);
        assert_eq!(kernel.response_bound(DISPLAY_MAX), 4.0 * DISPLAY_MAX);

        let mut src = Image::<f32, 1>::from_size_val([3, 3].into(), 0.0)?;
        for r in 0..3 {
            src.set_pixel(0, r, 0, 255.0)?;
        }
        // the raw response of 1020 is rescaled as is, past the display range
        let ix = directional_gradient(&src, &kernel, 1)?;
        assert_eq!(ix.get([1, 1, 0]), Some(&637.0));

        Ok(())
    }

    #[test]
    fn test_directional_gradient_deterministic() -> Result<(), SobelError> {
        let data = (0..12 * 9).map(|i| ((i * 37) % 256) as f32).collect();
        let padded = Image::<f32, 1>::new([12, 9].into(), data)?;
        let kx = Kernel3::sobel_horizontal();

        let a = directional_gradient(&padded, &kx, 2)?;
        let b = directional_gradient(&padded, &kx, 2)?;
        assert_eq!(a, b);

        Ok(())
    }

    #[test]
    fn test_invalid_margin() -> Result<(), SobelError> {
        let padded = Image::<f32, 1>::from_size_val([4, 6].into(), 0.0)?;
        let kx = Kernel3::sobel_horizontal();

        assert_eq!(
            directional_gradient(&padded, &kx, 2),
            Err(SobelError::InvalidMargin {
                margin: 2,
                size: padded.size(),
            })
        );
        assert!(matches!(
            directional_gradient(&padded, &kx, 0),
            Err(SobelError::InvalidMargin { margin: 0, .. })
        ));
        assert!(directional_gradient(&padded, &kx, 1).is_ok());

        Ok(())
    }

    #[test]
    fn test_filter3x3_shape_mismatch() -> Result<(), SobelError> {
        let src = Image::<f32, 1>::from_size_val([5, 5].into(), 0.0)?;
        let mut dst = Image::<f32, 1>::from_size_val([5, 4].into(), 0.0)?;

        assert_eq!(
            filter3x3(&src, &mut dst, &Kernel3::sobel_vertical(), 1),
            Err(SobelError::ShapeMismatch(src.size(), dst.size()))
        );

        Ok(())
    }
}
