//! Colorspace conversion: RGB to grayscale, RGB <-> HSV, feature normalization.
//!
//! HSV components are all stored in `[0, 1]`: hue is a fraction of a full
//! turn, not degrees. The HSV conversions rewrite channels 0, 1, 2 in place.

use crate::error::{Error, Result};
use crate::image::Image;

/// ITU-R BT.601 luma coefficients
const LUMA_R: f32 = 0.299;
const LUMA_G: f32 = 0.587;
const LUMA_B: f32 = 0.114;

// ============================================================================
// Per-pixel Conversions
// ============================================================================

/// Convert RGB to HSV (all components 0-1).
fn rgb_to_hsv_pixel(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let value = r.max(g).max(b);
    let min = r.min(g).min(b);
    let chroma = value - min;

    let saturation = if value == 0.0 { 0.0 } else { chroma / value };

    let hue_prime = if chroma == 0.0 {
        0.0
    } else if value == r {
        (g - b) / chroma
    } else if value == g {
        (b - r) / chroma + 2.0
    } else {
        (r - g) / chroma + 4.0
    };

    let mut hue = hue_prime / 6.0;
    if hue < 0.0 {
        hue += 1.0;
    }

    (hue, saturation, value)
}

/// Convert HSV (all components 0-1) to RGB.
fn hsv_to_rgb_pixel(hue: f32, saturation: f32, value: f32) -> (f32, f32, f32) {
    if value == 0.0 {
        return (0.0, 0.0, 0.0);
    }

    let chroma = saturation * value;
    let min = value - chroma;
    let h6 = hue * 6.0;
    let x = chroma * (1.0 - ((h6 % 2.0) - 1.0).abs());

    // An h6 exactly on an integer boundary falls into the lower sextant.
    let (r, g, b) = if h6 < 1.0 {
        (chroma, x, 0.0)
    } else if h6 < 2.0 {
        (x, chroma, 0.0)
    } else if h6 < 3.0 {
        (0.0, chroma, x)
    } else if h6 < 4.0 {
        (0.0, x, chroma)
    } else if h6 < 5.0 {
        (x, 0.0, chroma)
    } else {
        (chroma, 0.0, x)
    };

    (r + min, g + min, b + min)
}

fn require_rgb(image: &Image) -> Result<()> {
    if image.channels() != 3 {
        return Err(Error::ChannelMismatch {
            expected: 3,
            actual: image.channels(),
        });
    }
    Ok(())
}

// ============================================================================
// Image Conversions
// ============================================================================

/// Convert an RGB image to a single-channel luma image.
///
/// # Arguments
/// * `image` - 3-channel RGB image
///
/// # Returns
/// New 1-channel image with `0.299 R + 0.587 G + 0.114 B`
pub fn rgb_to_gray(image: &Image) -> Result<Image> {
    require_rgb(image)?;
    Image::from_fn(image.width(), image.height(), 1, |x, y, _| {
        let (x, y) = (x as isize, y as isize);
        LUMA_R * image.pixel(x, y, 0)
            + LUMA_G * image.pixel(x, y, 1)
            + LUMA_B * image.pixel(x, y, 2)
    })
}

/// Convert an RGB image to HSV in place.
///
/// Channels 0, 1, 2 become hue, saturation, value. Hue is 0 wherever the
/// pixel is achromatic.
pub fn rgb_to_hsv(image: &mut Image) -> Result<()> {
    require_rgb(image)?;
    image.map_triples(|[r, g, b]| {
        let (h, s, v) = rgb_to_hsv_pixel(r, g, b);
        [h, s, v]
    });
    Ok(())
}

/// Convert an HSV image back to RGB in place. Inverse of [`rgb_to_hsv`].
pub fn hsv_to_rgb(image: &mut Image) -> Result<()> {
    require_rgb(image)?;
    image.map_triples(|[h, s, v]| {
        let (r, g, b) = hsv_to_rgb_pixel(h, s, v);
        [r, g, b]
    });
    Ok(())
}

/// Rescale every element to `(v - min) / (max - min)` in place.
///
/// `min` and `max` are taken over the whole buffer, across all channels at
/// once. A flat image (zero range) maps to all zeros.
pub fn feature_normalize(image: &mut Image) {
    let (min, max) = image
        .values()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    let range = max - min;
    let range = if range == 0.0 { 1.0 } else { range };
    image.map_inplace(|v| (v - min) / range);
}
