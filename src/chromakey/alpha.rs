use image::{Luma, Rgba};
use imageproc::definitions::Image;
use imageproc::map::{map_colors, map_colors2};

use crate::error::ChromaKeyError;
use crate::utils::validate_matching_dimensions;

/// Trait for moving the alpha channel of an RGBA image in and out as a
/// single-channel plane.
///
/// Splitting the plane out is what lets the edge-softening blur run over
/// opacity alone while the color channels stay bit-identical.
pub trait AlphaChannelExt {
    /// Copies the alpha channel into a grayscale plane of the same size.
    fn alpha_plane(&self) -> Image<Luma<u8>>;

    /// Replaces the alpha channel with `plane`, consuming the image.
    ///
    /// Color channels are preserved.
    ///
    /// # Errors
    ///
    /// * [`ChromaKeyError::DimensionMismatch`] - when `plane` and the image
    ///   differ in size
    fn replace_alpha(self, plane: &Image<Luma<u8>>) -> Result<Self, ChromaKeyError>
    where
        Self: Sized;

    /// In-place variant of [`replace_alpha`](AlphaChannelExt::replace_alpha).
    fn replace_alpha_mut(&mut self, plane: &Image<Luma<u8>>) -> Result<&mut Self, ChromaKeyError>;
}

impl AlphaChannelExt for Image<Rgba<u8>> {
    fn alpha_plane(&self) -> Image<Luma<u8>> {
        map_colors(self, |Rgba([_, _, _, alpha])| Luma([alpha]))
    }

    fn replace_alpha(self, plane: &Image<Luma<u8>>) -> Result<Self, ChromaKeyError> {
        validate_matching_dimensions(self.dimensions(), plane.dimensions())?;

        Ok(map_colors2(
            &self,
            plane,
            |Rgba([red, green, blue, _]), Luma([alpha])| Rgba([red, green, blue, alpha]),
        ))
    }

    fn replace_alpha_mut(&mut self, plane: &Image<Luma<u8>>) -> Result<&mut Self, ChromaKeyError> {
        validate_matching_dimensions(self.dimensions(), plane.dimensions())?;

        self.pixels_mut()
            .zip(plane.pixels())
            .for_each(|(pixel, Luma([alpha]))| {
                pixel[3] = *alpha;
            });

        Ok(self)
    }
}
