use sobel_image::Image;

use crate::{
    error::SobelError,
    filter::spatial_gradient,
    magnitude::magnitude,
    orientation::{render_orientation, ColorSource},
    padding::pad,
    params::SobelParams,
};

/// Every buffer produced by one run of [`detect_edges`].
#[derive(Clone, Debug)]
pub struct EdgeMaps<const C: usize> {
    /// The input surrounded by a zero border of `margin` pixels.
    pub padded: Image<f32, C>,
    /// Horizontal gradient, same size as `padded`.
    pub ix: Image<f32, C>,
    /// Vertical gradient, same size as `padded`.
    pub iy: Image<f32, C>,
    /// Gradient magnitude, same size as `padded`.
    pub magnitude: Image<f32, C>,
    /// Orientation arrows drawn over `padded`; only present for single channel inputs.
    pub orientation: Option<Image<f32, 3>>,
}

/// Run the full Sobel edge detection on an image with samples in `[0, 255]`.
///
/// The image is padded, filtered with `params.kernel_x` and `params.kernel_y`, and the two
/// gradients are combined into a magnitude map. For single channel images the orientation
/// overlay is rendered too, drawing one color from `colors` per arrow.
///
/// # Example
///
/// ```
/// use sobel_image::{Image, ImageSize};
/// use sobel_imgproc::{orientation::FixedColor, params::SobelParams, pipeline::detect_edges};
///
/// let image = Image::<f32, 1>::from_size_val([4, 4].into(), 100.0).unwrap();
/// let maps = detect_edges(&image, &SobelParams::default(), &mut FixedColor([255, 0, 0])).unwrap();
///
/// assert_eq!(maps.ix.size(), ImageSize { width: 8, height: 8 });
/// assert_eq!(maps.ix.get([3, 3, 0]), Some(&127.0));
/// assert!(maps.orientation.is_some());
/// ```
pub fn detect_edges<const C: usize>(
    image: &Image<f32, C>,
    params: &SobelParams,
    colors: &mut impl ColorSource,
) -> Result<EdgeMaps<C>, SobelError> {
    log::debug!(
        "detecting edges on a {} image with {} channel(s)",
        image.size(),
        C
    );

    let padded = pad(image, params.margin)?;
    log::debug!("padded to {} with margin {}", padded.size(), params.margin);

    let (ix, iy) = spatial_gradient(&padded, &params.kernel_x, &params.kernel_y, params.margin)?;
    let magnitude = magnitude(&ix, &iy, &params.magnitude)?;

    let orientation = if C == 1 {
        Some(render_orientation(
            &padded.channel(0)?,
            &ix.channel(0)?,
            &iy.channel(0)?,
            &params.orientation,
            colors,
        )?)
    } else {
        log::debug!("skipping orientation overlay for a {C} channel image");
        None
    };

    Ok(EdgeMaps {
        padded,
        ix,
        iy,
        magnitude,
        orientation,
    })
}
