//! Test utilities for chromakey
//!
//! Synthetic bitmap constructors shared by the unit tests. Only compiled for
//! test builds.

use image::{Luma, Rgba};
use imageproc::definitions::Image;

/// Creates an RGBA image from a per-coordinate fill function.
pub fn rgba_image_from_fn(
    width: u32,
    height: u32,
    fill: impl Fn(u32, u32) -> Rgba<u8>,
) -> Image<Rgba<u8>> {
    let mut image: Image<Rgba<u8>> = Image::new(width, height);
    for y in 0..height {
        for x in 0..width {
            image.put_pixel(x, y, fill(x, y));
        }
    }
    image
}

/// A 3x3 near-white backdrop around a single dark subject pixel.
///
/// - backdrop: [250, 250, 250, 255] (background for any uniform rule < 250)
/// - center (1,1): [180, 90, 30, 255]
pub fn backdrop_rgba_image() -> Image<Rgba<u8>> {
    rgba_image_from_fn(3, 3, |x, y| {
        if (x, y) == (1, 1) {
            Rgba([180, 90, 30, 255])
        } else {
            Rgba([250, 250, 250, 255])
        }
    })
}

/// A 3x3 fully opaque alpha plane with a single transparent pixel in the
/// middle, the canonical box-blur fixture.
pub fn single_hole_alpha_plane() -> Image<Luma<u8>> {
    let mut plane: Image<Luma<u8>> = Image::new(3, 3);
    plane.pixels_mut().for_each(|p| *p = Luma([255]));
    plane.put_pixel(1, 1, Luma([0]));
    plane
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backdrop_image_has_the_advertised_layout() {
        let image = backdrop_rgba_image();
        assert_eq!(image.dimensions(), (3, 3));
        assert_eq!(image.get_pixel(1, 1), &Rgba([180, 90, 30, 255]));
        assert_eq!(image.get_pixel(2, 0), &Rgba([250, 250, 250, 255]));
    }

    #[test]
    fn single_hole_plane_has_one_transparent_pixel() {
        let plane = single_hole_alpha_plane();
        assert_eq!(plane.get_pixel(1, 1), &Luma([0]));
        assert_eq!(plane.pixels().filter(|p| p[0] == 0).count(), 1);
    }
}
