//! WebAssembly exports for the planar kernels.
//!
//! These functions are exposed to JavaScript via wasm-bindgen.
//!
//! ## Buffer Layout
//!
//! Every image crosses the boundary as a flat planar `Float32Array` of length
//! `width * height * channels`: all of channel 0, then channel 1, and so on.
//! Errors surface in JavaScript as thrown `Error`s.

use wasm_bindgen::prelude::*;

use crate::filters::{color, convolve as conv, edge, kernels, resize as rs};
use crate::Image;

fn image(data: &[f32], width: usize, height: usize, channels: usize) -> Result<Image, JsError> {
    Ok(Image::from_vec(width, height, channels, data.to_vec())?)
}

// ============================================================================
// Color Conversion
// ============================================================================

/// Convert planar RGB to single-channel luma.
#[wasm_bindgen]
pub fn rgb_to_gray_wasm(data: &[f32], width: usize, height: usize) -> Result<Vec<f32>, JsError> {
    let result = color::rgb_to_gray(&image(data, width, height, 3)?)?;
    Ok(result.into_vec())
}

/// Convert planar RGB to HSV (all components 0.0-1.0).
#[wasm_bindgen]
pub fn rgb_to_hsv_wasm(data: &[f32], width: usize, height: usize) -> Result<Vec<f32>, JsError> {
    let mut result = image(data, width, height, 3)?;
    color::rgb_to_hsv(&mut result)?;
    Ok(result.into_vec())
}

/// Convert planar HSV back to RGB.
#[wasm_bindgen]
pub fn hsv_to_rgb_wasm(data: &[f32], width: usize, height: usize) -> Result<Vec<f32>, JsError> {
    let mut result = image(data, width, height, 3)?;
    color::hsv_to_rgb(&mut result)?;
    Ok(result.into_vec())
}

// ============================================================================
// Filtering
// ============================================================================

/// Convolve with a square single-channel kernel of side `filter_size`.
///
/// # Arguments
/// * `data` - Planar image values
/// * `width`, `height`, `channels` - Image shape
/// * `filter` - Row-major kernel taps (length = filter_size * filter_size)
/// * `filter_size` - Kernel side
/// * `preserve` - Keep channels instead of summing them
#[wasm_bindgen]
pub fn convolve_wasm(
    data: &[f32],
    width: usize,
    height: usize,
    channels: usize,
    filter: &[f32],
    filter_size: usize,
    preserve: bool,
) -> Result<Vec<f32>, JsError> {
    let img = image(data, width, height, channels)?;
    let kernel = image(filter, filter_size, filter_size, 1)?;
    Ok(conv::convolve(&img, &kernel, preserve)?.into_vec())
}

/// Gaussian blur, filtering each channel independently.
#[wasm_bindgen]
pub fn gaussian_blur_wasm(
    data: &[f32],
    width: usize,
    height: usize,
    channels: usize,
    sigma: f32,
) -> Result<Vec<f32>, JsError> {
    let img = image(data, width, height, channels)?;
    let kernel = kernels::gaussian_filter(sigma)?;
    Ok(conv::convolve(&img, &kernel, true)?.into_vec())
}

/// Sobel gradient rendered as planar RGB.
#[wasm_bindgen]
pub fn colorize_sobel_wasm(
    data: &[f32],
    width: usize,
    height: usize,
    channels: usize,
) -> Result<Vec<f32>, JsError> {
    let img = image(data, width, height, channels)?;
    Ok(edge::colorize_sobel(&img)?.into_vec())
}

// ============================================================================
// Resampling
// ============================================================================

/// Bilinear resize to `out_width x out_height`.
#[wasm_bindgen]
pub fn bilinear_resize_wasm(
    data: &[f32],
    width: usize,
    height: usize,
    channels: usize,
    out_width: usize,
    out_height: usize,
) -> Result<Vec<f32>, JsError> {
    let img = image(data, width, height, channels)?;
    Ok(rs::bilinear_resize(&img, out_width, out_height)?.into_vec())
}

/// Nearest-neighbor resize to `out_width x out_height`.
#[wasm_bindgen]
pub fn nearest_resize_wasm(
    data: &[f32],
    width: usize,
    height: usize,
    channels: usize,
    out_width: usize,
    out_height: usize,
) -> Result<Vec<f32>, JsError> {
    let img = image(data, width, height, channels)?;
    Ok(rs::nearest_resize(&img, out_width, out_height)?.into_vec())
}
