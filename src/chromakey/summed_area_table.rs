use image::Luma;
use imageproc::definitions::Image;
use itertools::iproduct;

/// Summed-area table over a single-channel 8-bit plane.
///
/// Each cell holds the cumulative sum of all source values in the rectangle
/// from the origin to that cell, so any axis-aligned window of the source can
/// be summed with four lookups. This keeps the box filter's cost constant per
/// pixel regardless of radius.
///
/// Sums are widened to `u64`, which cannot overflow for any bitmap whose
/// pixel count fits in memory.
pub struct SummedAreaTable {
    data: Vec<u64>,
    width: u32,
    height: u32,
}

impl SummedAreaTable {
    /// Builds the table from a grayscale plane.
    ///
    /// Recurrence: `sat(x, y) = src(x, y) + sat(x-1, y) + sat(x, y-1) - sat(x-1, y-1)`.
    #[must_use]
    pub fn from_plane(plane: &Image<Luma<u8>>) -> Self {
        let (width, height) = plane.dimensions();
        let mut data = vec![0u64; width as usize * height as usize];

        iproduct!(0..height, 0..width).for_each(|(y, x)| {
            let Luma([value]) = *plane.get_pixel(x, y);
            let index = (y * width + x) as usize;
            let mut sum = u64::from(value);

            if x > 0 {
                sum += data[index - 1];
            }
            if y > 0 {
                sum += data[((y - 1) * width + x) as usize];
            }
            if x > 0 && y > 0 {
                sum -= data[((y - 1) * width + (x - 1)) as usize];
            }

            data[index] = sum;
        });

        Self {
            data,
            width,
            height,
        }
    }

    /// Cumulative sum at `(x, y)`, or 0 outside the plane.
    #[must_use]
    fn get(&self, x: i64, y: i64) -> u64 {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            0
        } else {
            self.data[(y as u64 * u64::from(self.width) + x as u64) as usize]
        }
    }

    /// Sum of the source values inside the inclusive rectangle
    /// `(x1, y1)..=(x2, y2)`, clamped to the plane bounds.
    ///
    /// `Sum = sat(x2, y2) - sat(x1-1, y2) - sat(x2, y1-1) + sat(x1-1, y1-1)`
    #[must_use]
    pub fn rectangle_sum(&self, x1: i64, y1: i64, x2: i64, y2: i64) -> u64 {
        let x1 = x1.max(0);
        let y1 = y1.max(0);
        let x2 = x2.min(i64::from(self.width) - 1);
        let y2 = y2.min(i64::from(self.height) - 1);

        if x1 > x2 || y1 > y2 {
            return 0;
        }

        let bottom_right = self.get(x2, y2);
        let top_right = self.get(x2, y1 - 1);
        let bottom_left = self.get(x1 - 1, y2);
        let top_left = self.get(x1 - 1, y1 - 1);

        (bottom_right + top_left) - (top_right + bottom_left)
    }

    /// Width of the underlying plane.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the underlying plane.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }
}
