use image::{Rgb, Rgba};
use imageproc::definitions::Image;
use imageproc::map::map_colors;

use crate::chromakey::rule::ChromaKeyRule;
use crate::error::ChromaKeyError;
use crate::utils::validate_non_empty;

/// Trait providing chroma-key classification over a whole bitmap.
///
/// Background pixels (per the rule) get their alpha forced to zero; their
/// color channels are left untouched so the original color survives for
/// later compositing. Foreground pixels are copied unchanged.
///
/// Classification has no cross-pixel dependency, so the pass is
/// order-independent. With the `rayon` feature the RGBA implementation runs
/// over parallel pixel chunks and produces bit-identical output.
pub trait KeyBackgroundExt {
    /// Result image type of the keying pass
    type Output;

    /// Keys out every pixel matching `rule`, consuming the image.
    ///
    /// # Errors
    ///
    /// * [`ChromaKeyError::EmptyImage`] - when width or height is zero
    ///
    /// # Examples
    ///
    /// ```
    /// use chromakey::{ChromaKeyRule, Image, KeyBackgroundExt};
    /// use image::Rgba;
    ///
    /// let mut image: Image<Rgba<u8>> = Image::new(2, 1);
    /// image.put_pixel(0, 0, Rgba([250, 250, 250, 255])); // near-white backdrop
    /// image.put_pixel(1, 0, Rgba([180, 90, 30, 255])); // subject
    ///
    /// let keyed = image.key_background(ChromaKeyRule::uniform(240))?;
    /// assert_eq!(keyed.get_pixel(0, 0), &Rgba([250, 250, 250, 0]));
    /// assert_eq!(keyed.get_pixel(1, 0), &Rgba([180, 90, 30, 255]));
    /// # Ok::<(), chromakey::ChromaKeyError>(())
    /// ```
    fn key_background(self, rule: ChromaKeyRule) -> Result<Self::Output, ChromaKeyError>;
}

impl KeyBackgroundExt for Image<Rgba<u8>> {
    type Output = Self;

    fn key_background(mut self, rule: ChromaKeyRule) -> Result<Self, ChromaKeyError> {
        let (width, height) = self.dimensions();
        validate_non_empty(width, height)?;

        key_alpha_in_place(&mut self, rule);
        Ok(self)
    }
}

/// Keying an RGB image attaches the alpha channel it lacks: background
/// pixels come out fully transparent, everything else fully opaque.
///
/// This is the common path for JPEG sources, which decode without alpha.
impl KeyBackgroundExt for Image<Rgb<u8>> {
    type Output = Image<Rgba<u8>>;

    fn key_background(self, rule: ChromaKeyRule) -> Result<Image<Rgba<u8>>, ChromaKeyError> {
        let (width, height) = self.dimensions();
        validate_non_empty(width, height)?;

        Ok(map_colors(&self, |Rgb([red, green, blue])| {
            let alpha = if rule.is_background(red, green, blue) {
                0
            } else {
                u8::MAX
            };
            Rgba([red, green, blue, alpha])
        }))
    }
}

#[cfg(not(feature = "rayon"))]
fn key_alpha_in_place(image: &mut Image<Rgba<u8>>, rule: ChromaKeyRule) {
    image.pixels_mut().for_each(|pixel| {
        let Rgba([red, green, blue, _]) = *pixel;
        if rule.is_background(red, green, blue) {
            pixel[3] = 0;
        }
    });
}

#[cfg(feature = "rayon")]
fn key_alpha_in_place(image: &mut Image<Rgba<u8>>, rule: ChromaKeyRule) {
    use rayon::prelude::*;

    image.par_chunks_exact_mut(4).for_each(|pixel| {
        if rule.is_background(pixel[0], pixel[1], pixel[2]) {
            pixel[3] = 0;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{backdrop_rgba_image, rgba_image_from_fn};

    #[test]
    fn background_pixels_lose_alpha_and_keep_color() {
        let image = backdrop_rgba_image();
        let keyed = image.key_background(ChromaKeyRule::uniform(240)).unwrap();

        // corners were the 250-valued backdrop
        assert_eq!(keyed.get_pixel(0, 0), &Rgba([250, 250, 250, 0]));
        assert_eq!(keyed.get_pixel(2, 2), &Rgba([250, 250, 250, 0]));
        // center subject untouched
        assert_eq!(keyed.get_pixel(1, 1), &Rgba([180, 90, 30, 255]));
    }

    #[test]
    fn foreground_pixels_are_copied_verbatim() {
        let image = rgba_image_from_fn(3, 3, |x, y| {
            Rgba([(x * 40) as u8, (y * 40) as u8, 90, 200])
        });
        let expected = image.clone();

        // dark pixels never exceed a 240 bound
        let keyed = image.key_background(ChromaKeyRule::uniform(240)).unwrap();
        assert_eq!(keyed, expected);
    }

    #[test]
    fn keying_preserves_existing_transparency() {
        let image = rgba_image_from_fn(2, 2, |_, _| Rgba([10, 10, 10, 77]));
        let keyed = image.key_background(ChromaKeyRule::uniform(240)).unwrap();
        assert_eq!(keyed.get_pixel(0, 0)[3], 77);
    }

    #[test]
    fn rgb_input_gains_an_alpha_channel() {
        let mut image: Image<Rgb<u8>> = Image::new(2, 1);
        image.put_pixel(0, 0, Rgb([250, 250, 250]));
        image.put_pixel(1, 0, Rgb([12, 34, 56]));

        let keyed = image.key_background(ChromaKeyRule::uniform(240)).unwrap();
        assert_eq!(keyed.get_pixel(0, 0), &Rgba([250, 250, 250, 0]));
        assert_eq!(keyed.get_pixel(1, 0), &Rgba([12, 34, 56, 255]));
    }

    #[test]
    fn empty_image_is_rejected() {
        let image: Image<Rgba<u8>> = Image::new(0, 5);
        assert_eq!(
            image.key_background(ChromaKeyRule::uniform(240)),
            Err(ChromaKeyError::EmptyImage {
                width: 0,
                height: 5
            })
        );
    }

    #[test]
    fn keying_twice_equals_keying_once() {
        let rule = ChromaKeyRule::uniform(200);
        let image = backdrop_rgba_image();

        let once = image.clone().key_background(rule).unwrap();
        let twice = once.clone().key_background(rule).unwrap();
        assert_eq!(once, twice);
    }
}
