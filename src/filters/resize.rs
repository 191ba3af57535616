//! Spatial resampling: nearest-neighbor and bilinear.
//!
//! Output pixel centers are mapped onto the source grid with
//! [`translate_to_center`], so a resize by any ratio keeps the image centered
//! instead of drifting by half a pixel. Samples use the clamped accessor, so
//! coordinates just outside the source replicate its edge.

use log::debug;

use crate::error::{Error, Result};
use crate::image::Image;

/// Resampling strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ResizeMethod {
    Nearest,
    #[default]
    Bilinear,
}

/// Map output coordinate `coord` to the source grid.
///
/// `ratio` is `source_extent / output_extent`.
#[inline]
pub fn translate_to_center(coord: usize, ratio: f32) -> f32 {
    (coord as f32 + 0.5) * ratio - 0.5
}

#[inline]
fn nearest_sample(image: &Image, x: f32, y: f32, c: usize) -> f32 {
    image.pixel(x.round() as isize, y.round() as isize, c)
}

#[inline]
fn bilinear_sample(image: &Image, x: f32, y: f32, c: usize) -> f32 {
    let (x1, x2) = (x.floor(), x.ceil());
    let (y1, y2) = (y.floor(), y.ceil());

    // On an exact integer the pair collapses; use weights (1, 0).
    let (wx1, wx2) = if x1 == x2 { (1.0, 0.0) } else { (x2 - x, x - x1) };
    let (wy1, wy2) = if y1 == y2 { (1.0, 0.0) } else { (y2 - y, y - y1) };

    let (x1, x2) = (x1 as isize, x2 as isize);
    let (y1, y2) = (y1 as isize, y2 as isize);

    let v11 = image.pixel(x1, y1, c);
    let v12 = image.pixel(x1, y2, c);
    let v21 = image.pixel(x2, y1, c);
    let v22 = image.pixel(x2, y2, c);

    let top = v11 * wx1 + v21 * wx2;
    let bottom = v12 * wx1 + v22 * wx2;
    top * wy1 + bottom * wy2
}

fn resample<F>(image: &Image, width: usize, height: usize, name: &str, sample: F) -> Result<Image>
where
    F: Fn(&Image, f32, f32, usize) -> f32 + Sync + Send,
{
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimension {
            width,
            height,
            channels: image.channels(),
        });
    }
    let x_ratio = image.width() as f32 / width as f32;
    let y_ratio = image.height() as f32 / height as f32;

    debug!(
        "{} resize: {}x{} -> {}x{} (ratio {:.4}, {:.4})",
        name,
        image.width(),
        image.height(),
        width,
        height,
        x_ratio,
        y_ratio
    );

    Image::from_fn(width, height, image.channels(), |x, y, c| {
        sample(
            image,
            translate_to_center(x, x_ratio),
            translate_to_center(y, y_ratio),
            c,
        )
    })
}

/// Resize with nearest-neighbor sampling.
///
/// # Arguments
/// * `image` - Source image
/// * `width` - Output width (> 0)
/// * `height` - Output height (> 0)
///
/// # Returns
/// New image of `width x height` with the source channel count
pub fn nearest_resize(image: &Image, width: usize, height: usize) -> Result<Image> {
    resample(image, width, height, "nearest", nearest_sample)
}

/// Resize with bilinear interpolation between the four surrounding pixels.
pub fn bilinear_resize(image: &Image, width: usize, height: usize) -> Result<Image> {
    resample(image, width, height, "bilinear", bilinear_sample)
}

/// Resize with the given method.
pub fn resize(image: &Image, width: usize, height: usize, method: ResizeMethod) -> Result<Image> {
    match method {
        ResizeMethod::Nearest => nearest_resize(image, width, height),
        ResizeMethod::Bilinear => bilinear_resize(image, width, height),
    }
}
