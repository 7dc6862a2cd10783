use image::Luma;
use imageproc::definitions::Image;
use itertools::iproduct;

use crate::chromakey::summed_area_table::SummedAreaTable;
use crate::error::ChromaKeyError;
use crate::utils::validate_non_empty;

/// Edge-softening configuration: a box-blur radius for the alpha channel.
///
/// Radius 0 means no smoothing. There is no upper bound; windows clamp to the
/// image, so a radius larger than the bitmap averages the whole alpha plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeSmoothing {
    radius: u32,
}

impl EdgeSmoothing {
    /// Creates a smoothing config with the given radius.
    #[must_use]
    pub const fn new(radius: u32) -> Self {
        Self { radius }
    }

    /// Creates a smoothing config from an untrusted integer value.
    ///
    /// # Errors
    ///
    /// Returns [`ChromaKeyError::NegativeRadius`] for values below zero.
    pub fn try_new(radius: i64) -> Result<Self, ChromaKeyError> {
        if radius < 0 {
            return Err(ChromaKeyError::NegativeRadius { radius });
        }
        // Radii beyond u32::MAX already average the whole plane.
        Ok(Self::new(
            u32::try_from(radius).unwrap_or(u32::MAX),
        ))
    }

    /// The configured radius in pixels.
    #[must_use]
    pub const fn radius(&self) -> u32 {
        self.radius
    }

    /// Whether this config performs any smoothing at all.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.radius > 0
    }
}

/// Trait providing a clamped-window box filter over a single-channel plane.
///
/// Each output value is the unweighted mean of the `(2r+1) x (2r+1)` window
/// centered on it, restricted to the in-bounds subset: edge pixels average
/// over fewer samples rather than over replicated or zero padding. Means are
/// rounded to the nearest integer.
///
/// The filter reads only the pre-blur plane. A summed-area table snapshots
/// the input before the first output value is written, so there is no
/// read-after-write hazard and the operation never needs in-place mutation.
pub trait BoxFilterExt {
    /// Filtered plane type
    type Output;

    /// Applies the box filter with the given radius.
    ///
    /// Radius 0 returns an unchanged copy.
    ///
    /// # Errors
    ///
    /// * [`ChromaKeyError::EmptyImage`] - when width or height is zero
    fn box_filter(&self, radius: u32) -> Result<Self::Output, ChromaKeyError>;
}

impl BoxFilterExt for Image<Luma<u8>> {
    type Output = Self;

    fn box_filter(&self, radius: u32) -> Result<Self, ChromaKeyError> {
        let (width, height) = self.dimensions();
        validate_non_empty(width, height)?;

        if radius == 0 {
            return Ok(self.clone());
        }

        let sat = SummedAreaTable::from_plane(self);
        let mut output = Image::new(width, height);

        iproduct!(0..height, 0..width).for_each(|(y, x)| {
            let x1 = i64::from(x) - i64::from(radius);
            let y1 = i64::from(y) - i64::from(radius);
            let x2 = i64::from(x) + i64::from(radius);
            let y2 = i64::from(y) + i64::from(radius);

            let sum = sat.rectangle_sum(x1, y1, x2, y2);

            // In-bounds window area; the center pixel is always inside, so
            // the area is never zero.
            let in_width = x2.min(i64::from(width) - 1) - x1.max(0) + 1;
            let in_height = y2.min(i64::from(height) - 1) - y1.max(0) + 1;
            let area = (in_width * in_height) as u64;

            let mean = (sum as f64 / area as f64).round() as u8;
            output.put_pixel(x, y, Luma([mean]));
        });

        Ok(output)
    }
}
