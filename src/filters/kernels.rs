//! Named filter kernels.
//!
//! Every kernel is a single-channel [`Image`], so it is broadcast over all
//! channels of whatever it is convolved with. Box and Gaussian kernels are
//! L1-normalized; the fixed 3x3 kernels are returned as-is.

use std::f32::consts::PI;

use crate::error::{Error, Result};
use crate::filters::convolve::l1_normalize;
use crate::image::Image;

const HIGHPASS: [[f32; 3]; 3] = [[0.0, -1.0, 0.0], [-1.0, 4.0, -1.0], [0.0, -1.0, 0.0]];
const SHARPEN: [[f32; 3]; 3] = [[0.0, -1.0, 0.0], [-1.0, 5.0, -1.0], [0.0, -1.0, 0.0]];
const EMBOSS: [[f32; 3]; 3] = [[-2.0, -1.0, 0.0], [-1.0, 1.0, 1.0], [0.0, 1.0, 2.0]];
const SOBEL_X: [[f32; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_Y: [[f32; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// `size x size` averaging kernel summing to 1.
pub fn box_filter(size: usize) -> Result<Image> {
    let mut filter = Image::filled(size, size, 1, 1.0)?;
    l1_normalize(&mut filter);
    Ok(filter)
}

/// 2-D Gaussian density with standard deviation `sigma`, centred at 0.
fn gaussian(x: f32, y: f32, sigma: f32) -> f32 {
    let two_sigma_sq = 2.0 * sigma * sigma;
    (-(x * x + y * y) / two_sigma_sq).exp() / (PI * two_sigma_sq)
}

/// Gaussian kernel of side `ceil(6 * sigma) + 1`, L1-normalized.
///
/// Tap `(x, y)` holds the density at `(x - size / 2, y - size / 2)` with
/// integer division, so the peak sits on the pivot used by
/// [`convolve`](crate::filters::convolve::convolve).
pub fn gaussian_filter(sigma: f32) -> Result<Image> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(Error::InvalidSigma { sigma });
    }
    // Float-to-int casts saturate, so only the `+ 1` can overflow here.
    let size = ((sigma * 6.0).ceil() as usize)
        .checked_add(1)
        .ok_or(Error::InvalidSigma { sigma })?;
    let half = (size / 2) as f32;
    let mut filter = Image::from_fn(size, size, 1, |x, y, _| {
        gaussian(x as f32 - half, y as f32 - half, sigma)
    })?;
    l1_normalize(&mut filter);
    Ok(filter)
}

/// Laplacian-style edge kernel (sums to 0).
pub fn highpass_filter() -> Image {
    Image::from_rows(HIGHPASS)
}

/// Identity plus highpass (sums to 1).
pub fn sharpen_filter() -> Image {
    Image::from_rows(SHARPEN)
}

pub fn emboss_filter() -> Image {
    Image::from_rows(EMBOSS)
}

/// Horizontal gradient (responds to vertical edges).
pub fn sobel_x_filter() -> Image {
    Image::from_rows(SOBEL_X)
}

/// Vertical gradient (responds to horizontal edges).
pub fn sobel_y_filter() -> Image {
    Image::from_rows(SOBEL_Y)
}

/// Serializable description of a named kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum FilterKind {
    Box { size: usize },
    Gaussian { sigma: f32 },
    Highpass,
    Sharpen,
    Emboss,
    SobelX,
    SobelY,
}

impl FilterKind {
    /// Construct the kernel this descriptor names.
    pub fn build(self) -> Result<Image> {
        match self {
            Self::Box { size } => box_filter(size),
            Self::Gaussian { sigma } => gaussian_filter(sigma),
            Self::Highpass => Ok(highpass_filter()),
            Self::Sharpen => Ok(sharpen_filter()),
            Self::Emboss => Ok(emboss_filter()),
            Self::SobelX => Ok(sobel_x_filter()),
            Self::SobelY => Ok(sobel_y_filter()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taps(filter: &Image) -> Vec<f32> {
        filter.clone().into_vec()
    }

    // ========================================================================
    // Normalized Kernel Tests
    // ========================================================================

    #[test]
    fn test_box_filter() {
        let filter = box_filter(3).unwrap();
        assert_eq!(filter.shape(), (3, 3, 1));
        for v in filter.values() {
            assert!((v - 1.0 / 9.0).abs() < 1e-7);
        }
    }

    #[test]
    fn test_box_filter_zero_size() {
        assert!(matches!(box_filter(0), Err(Error::InvalidDimension { .. })));
    }

    #[test]
    fn test_gaussian_size_and_sum() {
        let filter = gaussian_filter(1.0).unwrap();
        assert_eq!(filter.shape(), (7, 7, 1));
        let sum: f32 = filter.values().sum();
        assert!((sum - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_gaussian_peak_and_symmetry() {
        let filter = gaussian_filter(2.0).unwrap();
        // ceil(12) + 1
        assert_eq!(filter.width(), 13);
        let peak = filter.get_pixel(6, 6, 0).unwrap();
        assert!(filter.values().all(|v| v <= peak));
        assert_eq!(filter.get_pixel(2, 6, 0), filter.get_pixel(10, 6, 0));
        assert_eq!(filter.get_pixel(6, 1, 0), filter.get_pixel(1, 6, 0));
    }

    #[test]
    fn test_gaussian_fractional_sigma() {
        // ceil(4.2) + 1 = 6: even size, peak at the lower-right centre tap.
        let filter = gaussian_filter(0.7).unwrap();
        assert_eq!(filter.width(), 6);
        let peak = filter.get_pixel(3, 3, 0).unwrap();
        assert!(filter.values().all(|v| v <= peak));
    }

    #[test]
    fn test_gaussian_rejects_bad_sigma() {
        for sigma in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(gaussian_filter(sigma), Err(Error::InvalidSigma { .. })));
        }
    }

    #[test]
    fn test_gaussian_rejects_huge_sigma() {
        for sigma in [1e30, f32::MAX] {
            assert!(matches!(gaussian_filter(sigma), Err(Error::InvalidSigma { .. })));
        }
        // Side fits in usize but the tap count does not.
        assert!(matches!(
            gaussian_filter(1e10),
            Err(Error::InvalidSigma { .. } | Error::InvalidDimension { .. })
        ));
    }

    // ========================================================================
    // Fixed Kernel Tests
    // ========================================================================

    #[test]
    fn test_fixed_kernels_verbatim() {
        assert_eq!(taps(&highpass_filter()), HIGHPASS.concat());
        assert_eq!(taps(&sharpen_filter()), SHARPEN.concat());
        assert_eq!(taps(&emboss_filter()), EMBOSS.concat());
        assert_eq!(taps(&sobel_x_filter()), SOBEL_X.concat());
        assert_eq!(taps(&sobel_y_filter()), SOBEL_Y.concat());
    }

    #[test]
    fn test_fixed_kernel_row_major() {
        let gx = sobel_x_filter();
        // Row 1 is [-2, 0, 2]
        assert_eq!(gx.get_pixel(0, 1, 0).unwrap(), -2.0);
        assert_eq!(gx.get_pixel(2, 1, 0).unwrap(), 2.0);
        let gy = sobel_y_filter();
        assert_eq!(gy.get_pixel(1, 0, 0).unwrap(), -2.0);
        assert_eq!(gy.get_pixel(1, 2, 0).unwrap(), 2.0);
    }

    // ========================================================================
    // Descriptor Tests
    // ========================================================================

    #[test]
    fn test_filter_kind_build() {
        assert_eq!(FilterKind::Box { size: 5 }.build().unwrap().shape(), (5, 5, 1));
        assert_eq!(FilterKind::Gaussian { sigma: 1.0 }.build().unwrap().width(), 7);
        assert_eq!(FilterKind::Emboss.build().unwrap(), emboss_filter());
        assert!(FilterKind::Gaussian { sigma: -2.0 }.build().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_filter_kind_serde() {
        let kind: FilterKind = serde_json::from_str(r#"{"kind":"gaussian","sigma":1.5}"#).unwrap();
        assert_eq!(kind, FilterKind::Gaussian { sigma: 1.5 });
        let json = serde_json::to_string(&FilterKind::SobelY).unwrap();
        assert_eq!(json, r#"{"kind":"sobel_y"}"#);
    }
}
