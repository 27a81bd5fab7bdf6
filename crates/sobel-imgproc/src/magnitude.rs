use sobel_image::Image;

use crate::{error::SobelError, params::MagnitudeParams, parallel};

/// Combine two gradient samples into a magnitude in the display range.
///
/// Both samples are truncated to integers, the Euclidean norm is truncated as well and
/// then mapped from `[0, params.normalization]` to `[0, 255]`. With
/// `params.clamp == false` values above 255 are passed through as-is.
#[inline]
pub fn gradient_magnitude(ix: f32, iy: f32, params: &MagnitudeParams) -> f32 {
    let ix = ix.trunc() as f64;
    let iy = iy.trunc() as f64;
    let norm = (ix * ix + iy * iy).sqrt().trunc();
    let value = (255.0 * (norm / params.normalization)).trunc() as f32;
    if params.clamp {
        value.clamp(0.0, 255.0)
    } else {
        value
    }
}

/// Compute the per-channel gradient magnitude of two gradient images.
///
/// # Arguments
///
/// * `ix` - The horizontal gradient with shape (H, W, C).
/// * `iy` - The vertical gradient with shape (H, W, C).
/// * `params` - Normalization and overflow handling.
///
/// # Errors
///
/// Returns [`SobelError::ShapeMismatch`] if `ix` and `iy` differ in size.
///
/// # Example
///
/// ```
/// use sobel_image::Image;
/// use sobel_imgproc::{magnitude::magnitude, params::MagnitudeParams};
///
/// let ix = Image::<f32, 1>::from_size_val([2, 2].into(), 255.0).unwrap();
/// let iy = Image::<f32, 1>::from_size_val([2, 2].into(), 255.0).unwrap();
/// let mag = magnitude(&ix, &iy, &MagnitudeParams::default()).unwrap();
///
/// assert_eq!(mag.get([0, 0, 0]), Some(&254.0));
/// ```
pub fn magnitude<const C: usize>(
    ix: &Image<f32, C>,
    iy: &Image<f32, C>,
    params: &MagnitudeParams,
) -> Result<Image<f32, C>, SobelError> {
    if ix.size() != iy.size() {
        return Err(SobelError::ShapeMismatch(ix.size(), iy.size()));
    }

    let mut dst = Image::from_size_val(ix.size(), 0.0)?;
    parallel::par_iter_rows_val_two(ix, iy, &mut dst, |&gx, &gy, out| {
        *out = gradient_magnitude(gx, gy, params);
    });

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNCLAMPED: MagnitudeParams = MagnitudeParams {
        normalization: 360.6,
        clamp: false,
    };

    #[test]
    fn test_gradient_magnitude_values() {
        let params = MagnitudeParams::default();
        assert_eq!(gradient_magnitude(0.0, 0.0, &params), 0.0);
        // sqrt(2 * 127^2) = 179.6 -> 179 -> 126.58
        assert_eq!(gradient_magnitude(127.0, 127.0, &params), 126.0);
        assert_eq!(gradient_magnitude(255.0, 0.0, &params), 180.0);
        // inputs are truncated before squaring: sqrt(3^2 + 4^2) = 5 -> 3.53
        assert_eq!(gradient_magnitude(3.9, 4.9, &params), 3.0);
        assert_eq!(gradient_magnitude(-3.0, -4.0, &params), 3.0);
    }

    #[test]
    fn test_gradient_magnitude_non_negative() {
        let params = MagnitudeParams::default();
        for ix in (-255..=255).step_by(17) {
            for iy in (-255..=255).step_by(17) {
                let m = gradient_magnitude(ix as f32, iy as f32, &params);
                assert!(m >= 0.0, "negative magnitude for ({ix}, {iy})");
                assert!(m <= 255.0);
            }
        }
    }

    #[test]
    fn test_gradient_magnitude_overflow_clamped() {
        let params = MagnitudeParams::default();
        assert!(params.clamp);
        assert_eq!(gradient_magnitude(1000.0, 0.0, &params), 255.0);
    }

    #[test]
    fn test_gradient_magnitude_overflow_unclamped() {
        // 255 * 1000 / 360.6 = 707.15
        assert_eq!(gradient_magnitude(1000.0, 0.0, &UNCLAMPED), 707.0);
        assert_eq!(gradient_magnitude(255.0, 255.0, &UNCLAMPED), 254.0);
    }

    #[test]
    fn test_magnitude_multichannel() -> Result<(), SobelError> {
        let ix = Image::<f32, 3>::new([1, 2].into(), vec![3.0, 0.0, 255.0, 0.0, 127.0, 0.0])?;
        let iy = Image::<f32, 3>::new([1, 2].into(), vec![4.0, 0.0, 255.0, 0.0, 127.0, 5.0])?;
        let mag = magnitude(&ix, &iy, &MagnitudeParams::default())?;

        assert_eq!(mag.size(), ix.size());
        assert_eq!(mag.as_slice(), &[3.0, 0.0, 254.0, 0.0, 126.0, 3.0]);

        Ok(())
    }

    #[test]
    fn test_magnitude_shape_mismatch() -> Result<(), SobelError> {
        let ix = Image::<f32, 1>::from_size_val([4, 4].into(), 0.0)?;
        let iy = Image::<f32, 1>::from_size_val([4, 5].into(), 0.0)?;

        assert_eq!(
            magnitude(&ix, &iy, &MagnitudeParams::default()),
            Err(SobelError::ShapeMismatch(ix.size(), iy.size()))
        );

        Ok(())
    }
}
