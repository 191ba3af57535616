//! Sobel gradient extraction and its HSV visualization.
//!
//! Both Sobel kernels are convolved without `preserve`, so the gradient of a
//! multi-channel image is the sum of the per-channel gradients.

use ndarray::Zip;

use crate::error::Result;
use crate::filters::color::{feature_normalize, hsv_to_rgb};
use crate::filters::convolve::convolve;
use crate::filters::kernels::{sobel_x_filter, sobel_y_filter};
use crate::image::Image;

/// Gradient magnitude and direction, both single-channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    /// `sqrt(gx^2 + gy^2)`
    pub magnitude: Image,
    /// `atan2(gy, gx)` in radians, range `(-pi, pi]`
    pub direction: Image,
}

/// Compute the Sobel gradient of `image`.
///
/// # Arguments
/// * `image` - Image with any channel count
///
/// # Returns
/// Magnitude and direction images of the same width and height, 1 channel each
pub fn sobel(image: &Image) -> Result<Gradient> {
    let gx = convolve(image, &sobel_x_filter(), false)?;
    let gy = convolve(image, &sobel_y_filter(), false)?;

    let gx = gx.as_array();
    let gy = gy.as_array();
    let magnitude = Zip::from(&gx).and(&gy).map_collect(|&x, &y| (x * x + y * y).sqrt());
    let direction = Zip::from(&gx).and(&gy).map_collect(|&x, &y| y.atan2(x));

    Ok(Gradient {
        magnitude: Image::from_array(magnitude)?,
        direction: Image::from_array(direction)?,
    })
}

/// Render the Sobel gradient as RGB.
///
/// Direction becomes hue, magnitude becomes both saturation and value, each
/// normalized to `[0, 1]` on its own. The result is clamped to `[0, 1]`.
pub fn colorize_sobel(image: &Image) -> Result<Image> {
    let Gradient {
        mut magnitude,
        mut direction,
    } = sobel(image)?;
    feature_normalize(&mut magnitude);
    feature_normalize(&mut direction);

    let (width, height, _) = image.shape();
    let mut out = Image::from_fn(width, height, 3, |x, y, c| {
        let (x, y) = (x as isize, y as isize);
        match c {
            0 => direction.pixel(x, y, 0),
            _ => magnitude.pixel(x, y, 0),
        }
    })?;
    hsv_to_rgb(&mut out)?;
    out.clamp();
    Ok(out)
}
