//! Internal utility functions for chromakey.
//!
//! This module contains validation helpers shared across the chroma-key
//! operations.

use crate::error::ChromaKeyError;

/// Validates that an image has non-zero dimensions.
///
/// # Arguments
///
/// * `width` - The width of the image
/// * `height` - The height of the image
///
/// # Returns
///
/// `Ok(())` if the dimensions are valid, otherwise `ChromaKeyError::EmptyImage`
#[inline]
pub(crate) fn validate_non_empty(width: u32, height: u32) -> Result<(), ChromaKeyError> {
    if width == 0 || height == 0 {
        Err(ChromaKeyError::EmptyImage { width, height })
    } else {
        Ok(())
    }
}

/// Validates that two buffers have matching dimensions.
#[inline]
pub(crate) fn validate_matching_dimensions(
    expected: (u32, u32),
    actual: (u32, u32),
) -> Result<(), ChromaKeyError> {
    if expected != actual {
        Err(ChromaKeyError::DimensionMismatch { expected, actual })
    } else {
        Ok(())
    }
}
