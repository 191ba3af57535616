//! Generic N-channel 2-D convolution.
//!
//! A filter is itself an [`Image`]. Its channel count picks how it is applied:
//!
//! | Filter channels | Mode | Filter channel used for image channel `c` |
//! |-----------------|------|-------------------------------------------|
//! | 1 | [`KernelMode::Broadcast`] | 0 |
//! | same as image | [`KernelMode::Matched`] | `c` |
//!
//! Independently, `preserve` picks the output shape: `true` keeps one output
//! channel per input channel, `false` sums the per-channel responses into a
//! single channel.
//!
//! Samples outside the image replicate the nearest edge pixel. The filter
//! pivot is `size / 2` (integer division) on each axis, so an even-sized filter
//! is anchored at the lower-right of its two central taps.

use log::debug;

use crate::error::{Error, Result};
use crate::image::Image;

/// How filter channels map onto image channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelMode {
    /// Single-channel filter applied to every image channel.
    Broadcast,
    /// Filter channel `c` applied to image channel `c`.
    Matched,
}

impl KernelMode {
    /// Pick the mode for `filter` over `image`.
    pub fn resolve(image: &Image, filter: &Image) -> Result<Self> {
        if filter.channels() == 1 {
            Ok(Self::Broadcast)
        } else if filter.channels() == image.channels() {
            Ok(Self::Matched)
        } else {
            Err(Error::ChannelMismatch {
                expected: image.channels(),
                actual: filter.channels(),
            })
        }
    }

    #[inline]
    fn filter_channel(self, c: usize) -> usize {
        match self {
            Self::Broadcast => 0,
            Self::Matched => c,
        }
    }
}

/// Filter response at `(x, y)` for image channel `c`.
///
/// Taps accumulate in `f64` so that cancelling kernels (Sobel, highpass) give
/// exactly zero on flat input.
#[inline]
fn response(image: &Image, filter: &Image, x: usize, y: usize, c: usize, fc: usize) -> f64 {
    let pivot_x = (filter.width() / 2) as isize;
    let pivot_y = (filter.height() / 2) as isize;
    let (x, y) = (x as isize, y as isize);

    let mut sum = 0.0f64;
    for px in 0..filter.width() as isize {
        for py in 0..filter.height() as isize {
            let sample = image.pixel(x + px - pivot_x, y + py - pivot_y, c);
            sum += f64::from(sample) * f64::from(filter.pixel(px, py, fc));
        }
    }
    sum
}

/// Convolve `image` with `filter`.
///
/// # Arguments
/// * `image` - Input image with any channel count
/// * `filter` - Filter with 1 channel or the same channel count as `image`
/// * `preserve` - Keep one output channel per input channel instead of summing
///
/// # Returns
/// New image of the same width and height; `image.channels()` channels when
/// `preserve` is set, otherwise 1. Fails with `ChannelMismatch` when the
/// filter channel count fits neither mode.
pub fn convolve(image: &Image, filter: &Image, preserve: bool) -> Result<Image> {
    let mode = KernelMode::resolve(image, filter)?;
    let (width, height, channels) = image.shape();
    let out_channels = if preserve { channels } else { 1 };

    debug!(
        "convolve: {}x{}x{} with {}x{}x{} filter, {:?}, {} output channel(s)",
        width,
        height,
        channels,
        filter.width(),
        filter.height(),
        filter.channels(),
        mode,
        out_channels
    );

    if preserve {
        Image::from_fn(width, height, out_channels, |x, y, c| {
            response(image, filter, x, y, c, mode.filter_channel(c)) as f32
        })
    } else {
        Image::from_fn(width, height, out_channels, |x, y, _| {
            (0..channels)
                .map(|c| response(image, filter, x, y, c, mode.filter_channel(c)))
                .sum::<f64>() as f32
        })
    }
}

/// Divide every element by the sum of all elements, in place.
///
/// The sum runs over every channel. An image summing to exactly zero is left
/// unchanged.
pub fn l1_normalize(image: &mut Image) {
    let sum: f32 = image.values().sum();
    if sum == 0.0 {
        debug!("l1_normalize: zero sum, image left unchanged");
        return;
    }
    image.map_inplace(|v| v / sum);
}
