use thiserror::Error;

/// Error type for chroma-key operations
///
/// Covers input validation failures for the extraction pipeline. Decode and
/// encode failures belong to the image source/sink and surface as
/// `image::ImageError` at the call site instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChromaKeyError {
    /// Image width or height is zero
    ///
    /// Every operation requires at least one pixel; an empty bitmap has no
    /// alpha channel to rewrite.
    #[error("image dimensions must be non-zero, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    /// A classification threshold does not fit the 8-bit channel range
    #[error("{channel} threshold {value} is outside the valid range 0..=255")]
    ThresholdOutOfRange {
        /// Name of the offending channel ("red", "green" or "blue")
        channel: &'static str,
        value: i64,
    },

    /// A smoothing radius is negative
    #[error("smoothing radius {radius} must not be negative")]
    NegativeRadius { radius: i64 },

    /// Image and alpha plane dimensions do not match
    ///
    /// Returned when replacing an image's alpha channel with a plane of a
    /// different size.
    #[error("image and alpha plane dimensions do not match: expected {expected:?}, actual {actual:?}")]
    DimensionMismatch {
        /// Expected dimensions (width, height)
        expected: (u32, u32),
        /// Actual dimensions (width, height)
        actual: (u32, u32),
    },
}
