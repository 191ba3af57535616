//! Filter modules operating on planar [`Image`](crate::Image) buffers.
//!
//! ## Channel Handling
//!
//! | Operation | Accepted channels | Output channels |
//! |-----------|-------------------|-----------------|
//! | `rgb_to_gray` | 3 | 1 |
//! | `rgb_to_hsv`, `hsv_to_rgb` | 3 | 3 (in place) |
//! | `feature_normalize`, `l1_normalize` | any | same (in place) |
//! | `convolve` | any; filter 1 or same | same (`preserve`) or 1 |
//! | `sobel` | any | 1 + 1 |
//! | `colorize_sobel` | any | 3 |
//! | `nearest_resize`, `bilinear_resize` | any | same |
//!
//! ## Filter Categories
//!
//! - **Color**: grayscale, HSV round trip, feature normalization
//! - **Kernels**: box, Gaussian, highpass, sharpen, emboss, Sobel X/Y
//! - **Convolution**: broadcast or matched filters, preserve or sum channels
//! - **Edge detection**: Sobel magnitude/direction and HSV colorization
//! - **Resampling**: nearest-neighbor and bilinear

pub mod color;
pub mod convolve;
pub mod edge;
pub mod kernels;
pub mod resize;
