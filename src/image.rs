//! Planar float image buffer.
//!
//! An [`Image`] owns `width * height * channels` `f32` values stored channel
//! by channel: every pixel of channel 0, then every pixel of channel 1, and
//! so on. Within a channel, rows are contiguous. The element at `(x, y, c)`
//! therefore lives at flat offset `c * width * height + y * width + x`.
//!
//! The backing store is an `ndarray::Array3<f32>` of shape
//! `(channels, height, width)` in standard layout, which is exactly that
//! order. All offset arithmetic stays inside this module.
//!
//! ## Boundary Policy
//!
//! - **Reads** clamp `x` and `y` independently into the image (edge replicate).
//! - **Writes** outside the image are silently ignored.
//! - **Channels** are never clamped; a bad channel index is an error.

use ndarray::{Array3, ArrayView2, ArrayView3, Axis};

use crate::error::{Error, Result};

/// Owned planar `f32` image.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    data: Array3<f32>,
}

impl Image {
    /// Allocate a zero-filled image.
    pub fn new(width: usize, height: usize, channels: usize) -> Result<Self> {
        Self::filled(width, height, channels, 0.0)
    }

    /// Allocate an image with every element set to `value`.
    pub fn filled(width: usize, height: usize, channels: usize, value: f32) -> Result<Self> {
        check_dimensions(width, height, channels)?;
        Ok(Self {
            data: Array3::from_elem((channels, height, width), value),
        })
    }

    /// Wrap a planar buffer of exactly `width * height * channels` values.
    pub fn from_vec(width: usize, height: usize, channels: usize, data: Vec<f32>) -> Result<Self> {
        let expected = check_dimensions(width, height, channels)?;
        let actual = data.len();
        let data = Array3::from_shape_vec((channels, height, width), data)
            .map_err(|_| Error::SizeMismatch { expected, actual })?;
        Ok(Self { data })
    }

    /// Wrap an array of shape `(channels, height, width)`.
    ///
    /// Arrays in non-standard memory order are copied into planar order.
    pub fn from_array(data: Array3<f32>) -> Result<Self> {
        let (channels, height, width) = data.dim();
        check_dimensions(width, height, channels)?;
        let data = if data.is_standard_layout() {
            data
        } else {
            data.as_standard_layout().into_owned()
        };
        Ok(Self { data })
    }

    /// Single-channel `N x N` image from row-major taps. `N` must be non-zero.
    pub(crate) fn from_rows<const N: usize>(rows: [[f32; N]; N]) -> Self {
        Self {
            data: Array3::from_shape_fn((1, N, N), |(_, y, x)| rows[y][x]),
        }
    }

    /// Build an image by evaluating `f(x, y, c)` for every element.
    ///
    /// With the `parallel` feature the elements are computed on the rayon
    /// pool; the result is identical to the sequential build.
    pub fn from_fn<F>(width: usize, height: usize, channels: usize, f: F) -> Result<Self>
    where
        F: Fn(usize, usize, usize) -> f32 + Sync + Send,
    {
        let len = check_dimensions(width, height, channels)?;
        let plane = width * height;
        let at = |i: usize| {
            let c = i / plane;
            let rem = i % plane;
            f(rem % width, rem / width, c)
        };

        #[cfg(feature = "parallel")]
        let data: Vec<f32> = {
            use rayon::prelude::*;
            (0..len).into_par_iter().map(at).collect()
        };
        #[cfg(not(feature = "parallel"))]
        let data: Vec<f32> = (0..len).map(at).collect();

        Self::from_vec(width, height, channels, data)
    }

    pub fn width(&self) -> usize {
        self.data.dim().2
    }

    pub fn height(&self) -> usize {
        self.data.dim().1
    }

    pub fn channels(&self) -> usize {
        self.data.dim().0
    }

    /// `(width, height, channels)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.width(), self.height(), self.channels())
    }

    /// Total number of stored values.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false`; images have at least one element.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// View of the backing `(channels, height, width)` array.
    pub fn as_array(&self) -> ArrayView3<'_, f32> {
        self.data.view()
    }

    /// View of one channel plane as `(height, width)`.
    pub fn channel(&self, c: usize) -> Result<ArrayView2<'_, f32>> {
        self.check_channel(c)?;
        Ok(self.data.index_axis(Axis(0), c))
    }

    /// Consume the image, returning the `(channels, height, width)` array.
    pub fn into_array(self) -> Array3<f32> {
        self.data
    }

    /// Consume the image, returning the planar buffer.
    pub fn into_vec(self) -> Vec<f32> {
        let len = self.data.len();
        // Standard layout: the logical elements are contiguous from `offset`.
        let (mut data, offset) = self.data.into_raw_vec_and_offset();
        data.drain(..offset.unwrap_or(0));
        data.truncate(len);
        data
    }

    /// Iterate over every element in planar order.
    pub fn values(&self) -> impl Iterator<Item = f32> + '_ {
        self.data.iter().copied()
    }

    // ========================================================================
    // Pixel Access
    // ========================================================================

    /// Read `(x, y, c)`, clamping `x` into `[0, width)` and `y` into `[0, height)`.
    pub fn get_pixel(&self, x: isize, y: isize, c: usize) -> Result<f32> {
        self.check_channel(c)?;
        Ok(self.pixel(x, y, c))
    }

    /// Write `(x, y, c)`. Coordinates outside the image are ignored.
    pub fn set_pixel(&mut self, x: isize, y: isize, c: usize, value: f32) -> Result<()> {
        self.check_channel(c)?;
        self.put(x, y, c, value);
        Ok(())
    }

    /// Clamped read for callers that already validated `c`.
    #[inline]
    pub(crate) fn pixel(&self, x: isize, y: isize, c: usize) -> f32 {
        let cx = x.clamp(0, self.width() as isize - 1) as usize;
        let cy = y.clamp(0, self.height() as isize - 1) as usize;
        self.data[[c, cy, cx]]
    }

    /// Bounds-ignoring write for callers that already validated `c`.
    #[inline]
    pub(crate) fn put(&mut self, x: isize, y: isize, c: usize, value: f32) {
        if x < 0 || y < 0 || x >= self.width() as isize || y >= self.height() as isize {
            return;
        }
        self.data[[c, y as usize, x as usize]] = value;
    }

    pub(crate) fn check_channel(&self, c: usize) -> Result<()> {
        if c >= self.channels() {
            return Err(Error::ChannelOutOfRange {
                channel: c,
                channels: self.channels(),
            });
        }
        Ok(())
    }

    // ========================================================================
    // In-place Adjustments
    // ========================================================================

    /// Add `v` to every pixel of channel `c`.
    pub fn shift(&mut self, c: usize, v: f32) -> Result<()> {
        self.check_channel(c)?;
        self.data.index_axis_mut(Axis(0), c).mapv_inplace(|p| p + v);
        Ok(())
    }

    /// Multiply every pixel of channel `c` by `v`.
    pub fn scale(&mut self, c: usize, v: f32) -> Result<()> {
        self.check_channel(c)?;
        self.data.index_axis_mut(Axis(0), c).mapv_inplace(|p| p * v);
        Ok(())
    }

    /// Clamp every element to `[0, 1]`.
    pub fn clamp(&mut self) {
        self.data.mapv_inplace(|p| p.clamp(0.0, 1.0));
    }

    /// Apply `f` to every element.
    pub(crate) fn map_inplace<F: Fn(f32) -> f32>(&mut self, f: F) {
        self.data.mapv_inplace(f);
    }

    /// Rewrite channels 0..3 of every pixel through `f`.
    ///
    /// Callers guarantee at least three channels.
    pub(crate) fn map_triples<F: Fn([f32; 3]) -> [f32; 3]>(&mut self, f: F) {
        let (_, height, width) = self.data.dim();
        for y in 0..height {
            for x in 0..width {
                let px = [
                    self.data[[0, y, x]],
                    self.data[[1, y, x]],
                    self.data[[2, y, x]],
                ];
                let [a, b, c] = f(px);
                self.data[[0, y, x]] = a;
                self.data[[1, y, x]] = b;
                self.data[[2, y, x]] = c;
            }
        }
    }
}

/// Element-wise `a + b`.
pub fn add(a: &Image, b: &Image) -> Result<Image> {
    check_same_shape(a, b)?;
    Image::from_array(&a.data + &b.data)
}

/// Element-wise `a - b`.
pub fn sub(a: &Image, b: &Image) -> Result<Image> {
    check_same_shape(a, b)?;
    Image::from_array(&a.data - &b.data)
}

fn check_same_shape(a: &Image, b: &Image) -> Result<()> {
    if a.shape() != b.shape() {
        return Err(Error::ShapeMismatch {
            left: a.shape(),
            right: b.shape(),
        });
    }
    Ok(())
}

/// Element count of a `width x height x channels` image.
///
/// Zero dimensions and products past `isize::MAX` are rejected.
fn check_dimensions(width: usize, height: usize, channels: usize) -> Result<usize> {
    let len = width
        .checked_mul(height)
        .and_then(|plane| plane.checked_mul(channels))
        .filter(|&len| len != 0 && len <= isize::MAX as usize);
    len.ok_or(Error::InvalidDimension {
        width,
        height,
        channels,
    })
}
