//! Planar Kernels
//!
//! Numerical core for 2-D image processing on planar float buffers, with
//! optional Python bindings via PyO3 and WASM bindings for JavaScript.
//!
//! ## Image Format
//! Images are `f32` buffers of shape `(channels, height, width)`, stored
//! channel-planar: all pixels of channel 0, then all of channel 1, etc.
//! Values are conventionally in `0.0-1.0` but are not clamped unless an
//! operation says so (`Image::clamp`, `colorize_sobel`).
//!
//! Decoding, encoding and quantization belong to the caller.
//!
//! ## Boundary Handling
//! Reads outside the image replicate the nearest edge pixel; writes outside
//! the image are ignored. Channel indices are checked, never clamped.
//!
//! ## Features
//! - `parallel`: evaluate per-pixel work on the rayon thread pool
//! - `python`: PyO3/numpy bindings over `(C, H, W)` float32 arrays
//! - `wasm`: wasm-bindgen exports over flat planar `Float32Array`s
//! - `serde`: (de)serialize `FilterKind` and `ResizeMethod`

pub mod error;
pub mod filters;
pub mod image;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{Error, Result};
pub use filters::color::{feature_normalize, hsv_to_rgb, rgb_to_gray, rgb_to_hsv};
pub use filters::convolve::{convolve, l1_normalize, KernelMode};
pub use filters::edge::{colorize_sobel, sobel, Gradient};
pub use filters::kernels::{
    box_filter, emboss_filter, gaussian_filter, highpass_filter, sharpen_filter,
    sobel_x_filter, sobel_y_filter, FilterKind,
};
pub use filters::resize::{
    bilinear_resize, nearest_resize, resize, translate_to_center, ResizeMethod,
};
pub use image::{add, sub, Image};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::filters::{color, convolve as conv, edge, resize as rs};
    use crate::{Error, FilterKind, Image};

    impl From<Error> for PyErr {
        fn from(err: Error) -> Self {
            PyValueError::new_err(err.to_string())
        }
    }

    fn to_image(array: PyReadonlyArray3<'_, f32>) -> PyResult<Image> {
        Ok(Image::from_array(array.as_array().to_owned())?)
    }

    fn to_py<'py>(py: Python<'py>, image: Image) -> Bound<'py, PyArray3<f32>> {
        image.into_array().into_pyarray(py)
    }

    // ========================================================================
    // Color Conversion
    // ========================================================================

    /// Convert a (3, H, W) RGB image to (1, H, W) luma.
    #[pyfunction]
    pub fn rgb_to_gray<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, f32>,
    ) -> PyResult<Bound<'py, PyArray3<f32>>> {
        let result = color::rgb_to_gray(&to_image(image)?)?;
        Ok(to_py(py, result))
    }

    /// Convert a (3, H, W) RGB image to HSV (all components 0.0-1.0).
    #[pyfunction]
    pub fn rgb_to_hsv<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, f32>,
    ) -> PyResult<Bound<'py, PyArray3<f32>>> {
        let mut result = to_image(image)?;
        color::rgb_to_hsv(&mut result)?;
        Ok(to_py(py, result))
    }

    /// Convert a (3, H, W) HSV image back to RGB.
    #[pyfunction]
    pub fn hsv_to_rgb<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, f32>,
    ) -> PyResult<Bound<'py, PyArray3<f32>>> {
        let mut result = to_image(image)?;
        color::hsv_to_rgb(&mut result)?;
        Ok(to_py(py, result))
    }

    /// Rescale to 0.0-1.0 using the global min/max over all channels.
    #[pyfunction]
    pub fn feature_normalize<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, f32>,
    ) -> PyResult<Bound<'py, PyArray3<f32>>> {
        let mut result = to_image(image)?;
        color::feature_normalize(&mut result);
        Ok(to_py(py, result))
    }

    // ========================================================================
    // Kernels and Convolution
    // ========================================================================

    /// Build a named (1, K, K) filter kernel.
    ///
    /// `name` is one of box, gaussian, highpass, sharpen, emboss, sobel_x, sobel_y.
    #[pyfunction]
    #[pyo3(signature = (name, size=3, sigma=1.0))]
    pub fn make_filter<'py>(
        py: Python<'py>,
        name: &str,
        size: usize,
        sigma: f32,
    ) -> PyResult<Bound<'py, PyArray3<f32>>> {
        let kind = match name {
            "box" => FilterKind::Box { size },
            "gaussian" => FilterKind::Gaussian { sigma },
            "highpass" => FilterKind::Highpass,
            "sharpen" => FilterKind::Sharpen,
            "emboss" => FilterKind::Emboss,
            "sobel_x" => FilterKind::SobelX,
            "sobel_y" => FilterKind::SobelY,
            other => {
                return Err(PyValueError::new_err(format!("unknown filter: {other}")));
            }
        };
        Ok(to_py(py, kind.build()?))
    }

    /// Convolve with a (1, K, K) or (C, K, K) filter.
    #[pyfunction]
    #[pyo3(signature = (image, filter, preserve=true))]
    pub fn convolve<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, f32>,
        filter: PyReadonlyArray3<'py, f32>,
        preserve: bool,
    ) -> PyResult<Bound<'py, PyArray3<f32>>> {
        let result = conv::convolve(&to_image(image)?, &to_image(filter)?, preserve)?;
        Ok(to_py(py, result))
    }

    /// Divide by the sum of all elements.
    #[pyfunction]
    pub fn l1_normalize<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, f32>,
    ) -> PyResult<Bound<'py, PyArray3<f32>>> {
        let mut result = to_image(image)?;
        conv::l1_normalize(&mut result);
        Ok(to_py(py, result))
    }

    // ========================================================================
    // Edge Detection
    // ========================================================================

    /// Sobel gradient: returns (magnitude, direction), each (1, H, W).
    #[pyfunction]
    pub fn sobel<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, f32>,
    ) -> PyResult<(Bound<'py, PyArray3<f32>>, Bound<'py, PyArray3<f32>>)> {
        let grad = edge::sobel(&to_image(image)?)?;
        Ok((to_py(py, grad.magnitude), to_py(py, grad.direction)))
    }

    /// Sobel gradient rendered as a (3, H, W) RGB image.
    #[pyfunction]
    pub fn colorize_sobel<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, f32>,
    ) -> PyResult<Bound<'py, PyArray3<f32>>> {
        let result = edge::colorize_sobel(&to_image(image)?)?;
        Ok(to_py(py, result))
    }

    // ========================================================================
    // Resampling
    // ========================================================================

    #[pyfunction]
    pub fn nearest_resize<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, f32>,
        width: usize,
        height: usize,
    ) -> PyResult<Bound<'py, PyArray3<f32>>> {
        let result = rs::nearest_resize(&to_image(image)?, width, height)?;
        Ok(to_py(py, result))
    }

    #[pyfunction]
    pub fn bilinear_resize<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, f32>,
        width: usize,
        height: usize,
    ) -> PyResult<Bound<'py, PyArray3<f32>>> {
        let result = rs::bilinear_resize(&to_image(image)?, width, height)?;
        Ok(to_py(py, result))
    }

    #[pymodule]
    pub fn planar_kernels(m: &Bound<'_, PyModule>) -> PyResult<()> {
        // Color conversion
        m.add_function(wrap_pyfunction!(rgb_to_gray, m)?)?;
        m.add_function(wrap_pyfunction!(rgb_to_hsv, m)?)?;
        m.add_function(wrap_pyfunction!(hsv_to_rgb, m)?)?;
        m.add_function(wrap_pyfunction!(feature_normalize, m)?)?;

        // Kernels and convolution
        m.add_function(wrap_pyfunction!(make_filter, m)?)?;
        m.add_function(wrap_pyfunction!(convolve, m)?)?;
        m.add_function(wrap_pyfunction!(l1_normalize, m)?)?;

        // Edge detection
        m.add_function(wrap_pyfunction!(sobel, m)?)?;
        m.add_function(wrap_pyfunction!(colorize_sobel, m)?)?;

        // Resampling
        m.add_function(wrap_pyfunction!(nearest_resize, m)?)?;
        m.add_function(wrap_pyfunction!(bilinear_resize, m)?)?;

        Ok(())
    }
}
