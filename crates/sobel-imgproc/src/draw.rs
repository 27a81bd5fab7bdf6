use sobel_image::Image;

/// Half-angle between an arrow shaft and each stroke of its head.
const ARROW_HEAD_ANGLE: f32 = std::f32::consts::PI / 6.0;

/// Length of the arrow head relative to the shaft.
const ARROW_HEAD_RATIO: f32 = 0.1;

/// Set a pixel's color, ignoring coordinates outside the image.
#[inline]
fn set_pixel<T: Copy, const C: usize>(img: &mut Image<T, C>, x: i64, y: i64, color: [T; C]) {
    if x >= 0 && x < img.cols() as i64 && y >= 0 && y < img.rows() as i64 {
        let start = (y as usize * img.cols() + x as usize) * C;
        img.as_slice_mut()[start..start + C].copy_from_slice(&color);
    }
}

/// Draws a line on an image inplace using Bresenham's line algorithm.
///
/// Pixels falling outside the image are clipped.
///
/// # Arguments
///
/// * `img` - The image to draw on.
/// * `p0` - The start point of the line as a tuple of (x, y).
/// * `p1` - The end point of the line as a tuple of (x, y).
/// * `color` - The color of the line as an array of `C` elements.
pub fn draw_line<T: Copy, const C: usize>(
    img: &mut Image<T, C>,
    p0: (i64, i64),
    p1: (i64, i64),
    color: [T; C],
) {
    let (mut x0, mut y0) = p0;
    let (x1, y1) = p1;

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };

    let mut err = dx - dy;

    loop {
        set_pixel(img, x0, y0, color);

        if x0 == x1 && y0 == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x0 += sx;
        }
        if e2 < dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Draws an arrow from `p0` to `p1` inplace.
///
/// The head is made of two strokes leaving `p1` at ±30° from the shaft, 10% of the
/// shaft long and at least one pixel. A zero length arrow paints the single pixel at `p0`.
///
/// # Arguments
///
/// * `img` - The image to draw on.
/// * `p0` - The tail of the arrow as a tuple of (x, y).
/// * `p1` - The tip of the arrow as a tuple of (x, y).
/// * `color` - The color of the arrow as an array of `C` elements.
pub fn draw_arrow<T: Copy, const C: usize>(
    img: &mut Image<T, C>,
    p0: (i64, i64),
    p1: (i64, i64),
    color: [T; C],
) {
    draw_line(img, p0, p1, color);

    let (dx, dy) = ((p1.0 - p0.0) as f32, (p1.1 - p0.1) as f32);
    let length = dx.hypot(dy);
    if length == 0.0 {
        return;
    }

    let head = (length * ARROW_HEAD_RATIO).max(1.0);
    let back = dy.atan2(dx) + std::f32::consts::PI;
    for side in [-ARROW_HEAD_ANGLE, ARROW_HEAD_ANGLE] {
        let theta = back + side;
        let tip = (
            p1.0 + (head * theta.cos()).round() as i64,
            p1.1 + (head * theta.sin()).round() as i64,
        );
        draw_line(img, p1, tip, color);
    }
}
