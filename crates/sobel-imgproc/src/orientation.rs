use rand::{rngs::StdRng, Rng, SeedableRng};
use sobel_image::{ops::gray_to_rgb, Image};

use crate::{
    draw::draw_arrow,
    error::SobelError,
    magnitude::gradient_magnitude,
    params::{MagnitudeParams, OrientationParams},
};

/// A source of arrow colors.
pub trait ColorSource {
    /// Produce the RGB color of the next arrow.
    fn next_color(&mut self) -> [u8; 3];
}

/// Uniformly random colors, every channel drawn independently.
pub struct RandomColors<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomColors<R> {
    /// Draw colors from the given generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomColors<StdRng> {
    /// Reproducible colors derived from `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Colors seeded from the operating system; differs on every run.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> ColorSource for RandomColors<R> {
    fn next_color(&mut self) -> [u8; 3] {
        [self.rng.random(), self.rng.random(), self.rng.random()]
    }
}

/// Always the same color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedColor(pub [u8; 3]);

impl ColorSource for FixedColor {
    fn next_color(&mut self) -> [u8; 3] {
        self.0
    }
}

/// The gradient observed at one point of the sampling lattice.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrientationSample {
    /// Row of the sample.
    pub row: usize,
    /// Column of the sample.
    pub col: usize,
    /// Gradient direction in radians, as returned by `atan2(iy, ix)`.
    pub angle: f32,
    /// Arrow length in pixels.
    pub length: f32,
    /// Arrow tip as (row, col); may fall outside the image.
    pub tip: (i64, i64),
}

/// Sample the gradient on a regular lattice.
///
/// Points are visited every `params.stride` rows and columns starting at (0, 0), reading
/// the first channel of `ix` and `iy` truncated to integers. Points where both values are
/// zero are skipped. For the others the arrow length is `m / 255 * max_arrow_length`, where
/// `m` is the unclamped [`gradient_magnitude`] with the default normalization, and the tip
/// sits at `(row - trunc(length * sin(angle)), col + trunc(length * cos(angle)))`,
/// so a positive vertical gradient points up.
///
/// # Errors
///
/// [`SobelError::ShapeMismatch`] if `ix` and `iy` differ in size and
/// [`SobelError::InvalidStride`] if the stride is zero.
pub fn sample_orientation<const C: usize>(
    ix: &Image<f32, C>,
    iy: &Image<f32, C>,
    params: &OrientationParams,
) -> Result<Vec<OrientationSample>, SobelError> {
    if ix.size() != iy.size() {
        return Err(SobelError::ShapeMismatch(ix.size(), iy.size()));
    }
    if params.stride == 0 {
        return Err(SobelError::InvalidStride(params.stride));
    }

    let arrow_scale = MagnitudeParams {
        clamp: false,
        ..Default::default()
    };

    let mut samples = Vec::new();
    for row in (0..ix.rows()).step_by(params.stride) {
        for col in (0..ix.cols()).step_by(params.stride) {
            let gx = ix.as_slice()[(row * ix.cols() + col) * C].trunc();
            let gy = iy.as_slice()[(row * iy.cols() + col) * C].trunc();
            if gx == 0.0 && gy == 0.0 {
                continue;
            }

            let angle = gy.atan2(gx);
            let length =
                gradient_magnitude(gx, gy, &arrow_scale) / 255.0 * params.max_arrow_length;
            let dy = (length * angle.sin()) as i64;
            let dx = (length * angle.cos()) as i64;

            samples.push(OrientationSample {
                row,
                col,
                angle,
                length,
                tip: (row as i64 - dy, col as i64 + dx),
            });
        }
    }

    Ok(samples)
}

/// Render the gradient orientation as colored arrows over a grayscale image.
///
/// The canvas is a three channel copy of `base`; `ix`, `iy` and `base` are left untouched.
/// One color is requested from `colors` per drawn arrow, in row-major sampling order.
///
/// # Errors
///
/// [`SobelError::ShapeMismatch`] if the three images differ in size, plus the errors of
/// [`sample_orientation`].
pub fn render_orientation(
    base: &Image<f32, 1>,
    ix: &Image<f32, 1>,
    iy: &Image<f32, 1>,
    params: &OrientationParams,
    colors: &mut impl ColorSource,
) -> Result<Image<f32, 3>, SobelError> {
    if base.size() != ix.size() {
        return Err(SobelError::ShapeMismatch(base.size(), ix.size()));
    }

    let samples = sample_orientation(ix, iy, params)?;
    let mut overlay = gray_to_rgb(base)?;

    for sample in &samples {
        let [r, g, b] = colors.next_color();
        draw_arrow(
            &mut overlay,
            (sample.col as i64, sample.row as i64),
            (sample.tip.1, sample.tip.0),
            [r as f32, g as f32, b as f32],
        );
    }

    log::debug!("drew {} orientation arrows", samples.len());

    Ok(overlay)
}
