//! Error types for planar image operations.

use thiserror::Error;

/// Errors reported by image allocation and the filter kernels.
///
/// Spatial out-of-range coordinates are never errors: reads clamp to the
/// nearest edge and writes outside the image are ignored.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Width, height or channel count is zero, or their product does not fit
    /// in memory (also raised when a filter parameter would produce such a
    /// shape).
    #[error("invalid dimensions: {width}x{height}x{channels}")]
    InvalidDimension {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
        /// Requested channel count.
        channels: usize,
    },

    /// The operation needs a different channel count.
    #[error("channel mismatch: expected {expected} channels, got {actual}")]
    ChannelMismatch {
        /// Channel count the operation accepts.
        expected: usize,
        /// Channel count that was supplied.
        actual: usize,
    },

    /// A channel index is outside `[0, channels)`.
    #[error("channel index {channel} out of range for image with {channels} channels")]
    ChannelOutOfRange {
        /// Requested channel.
        channel: usize,
        /// Channels available.
        channels: usize,
    },

    /// A raw buffer does not hold `width * height * channels` values.
    #[error("size mismatch: expected {expected} values, got {actual}")]
    SizeMismatch {
        /// Required length.
        expected: usize,
        /// Supplied length.
        actual: usize,
    },

    /// A Gaussian standard deviation that is not a positive finite number.
    #[error("invalid sigma: {sigma}")]
    InvalidSigma {
        /// Supplied standard deviation.
        sigma: f32,
    },

    /// Two images taking part in an element-wise operation differ in shape.
    #[error("shape mismatch: {left:?} vs {right:?}")]
    ShapeMismatch {
        /// `(width, height, channels)` of the left operand.
        left: (usize, usize, usize),
        /// `(width, height, channels)` of the right operand.
        right: (usize, usize, usize),
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
