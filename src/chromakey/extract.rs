use image::{Rgb, Rgba};
use imageproc::definitions::Image;

use crate::chromakey::alpha::AlphaChannelExt;
use crate::chromakey::box_filter::{BoxFilterExt, EdgeSmoothing};
use crate::chromakey::keying::KeyBackgroundExt;
use crate::chromakey::rule::ChromaKeyRule;
use crate::error::ChromaKeyError;

/// The composed background-extraction transform: classify, then optionally
/// soften the cut-out edge.
///
/// This is a pure, single-shot function of its inputs: no I/O, no retained
/// state, and calling it twice with the same rule yields the same output.
/// The result always has the same dimensions as the input, and foreground
/// pixels keep their exact color and alpha.
pub trait ExtractBackgroundExt {
    /// Result image type
    type Output;

    /// Keys out background pixels per `rule`; when `smoothing` carries a
    /// non-zero radius, box blurs the alpha channel afterwards.
    ///
    /// Smoothing may lift background alpha above zero near the
    /// foreground/background boundary. That is the intended soft-edge
    /// effect; color channels are still never touched.
    ///
    /// # Errors
    ///
    /// * [`ChromaKeyError::EmptyImage`] - when width or height is zero
    ///
    /// # Examples
    ///
    /// ```
    /// use chromakey::{ChromaKeyRule, EdgeSmoothing, ExtractBackgroundExt, Image};
    /// use image::Rgba;
    ///
    /// let mut image: Image<Rgba<u8>> = Image::new(3, 3);
    /// image.pixels_mut().for_each(|p| *p = Rgba([250, 250, 250, 255]));
    /// image.put_pixel(1, 1, Rgba([170, 80, 20, 255]));
    ///
    /// let cut = image.extract_background(
    ///     ChromaKeyRule::uniform(240),
    ///     Some(EdgeSmoothing::new(1)),
    /// )?;
    /// assert_eq!(cut.dimensions(), (3, 3));
    /// // subject color survives, backdrop color survives with alpha keyed out
    /// assert_eq!(&cut.get_pixel(1, 1).0[..3], &[170, 80, 20]);
    /// assert_eq!(&cut.get_pixel(0, 0).0[..3], &[250, 250, 250]);
    /// # Ok::<(), chromakey::ChromaKeyError>(())
    /// ```
    fn extract_background(
        self,
        rule: ChromaKeyRule,
        smoothing: Option<EdgeSmoothing>,
    ) -> Result<Self::Output, ChromaKeyError>;
}

impl ExtractBackgroundExt for Image<Rgba<u8>> {
    type Output = Self;

    fn extract_background(
        self,
        rule: ChromaKeyRule,
        smoothing: Option<EdgeSmoothing>,
    ) -> Result<Self, ChromaKeyError> {
        smooth_edges(self.key_background(rule)?, smoothing)
    }
}

impl ExtractBackgroundExt for Image<Rgb<u8>> {
    type Output = Image<Rgba<u8>>;

    fn extract_background(
        self,
        rule: ChromaKeyRule,
        smoothing: Option<EdgeSmoothing>,
    ) -> Result<Image<Rgba<u8>>, ChromaKeyError> {
        smooth_edges(self.key_background(rule)?, smoothing)
    }
}

fn smooth_edges(
    keyed: Image<Rgba<u8>>,
    smoothing: Option<EdgeSmoothing>,
) -> Result<Image<Rgba<u8>>, ChromaKeyError> {
    match smoothing {
        Some(config) if config.is_enabled() => {
            let blurred = keyed.alpha_plane().box_filter(config.radius())?;
            keyed.replace_alpha(&blurred)
        }
        _ => Ok(keyed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::backdrop_rgba_image;

    #[test]
    fn no_smoothing_equals_plain_keying() {
        let rule = ChromaKeyRule::uniform(240);
        let keyed = backdrop_rgba_image().key_background(rule).unwrap();

        let none = backdrop_rgba_image().extract_background(rule, None).unwrap();
        let zero = backdrop_rgba_image()
            .extract_background(rule, Some(EdgeSmoothing::new(0)))
            .unwrap();

        assert_eq!(none, keyed);
        assert_eq!(zero, keyed);
    }

    #[test]
    fn smoothing_lifts_boundary_alpha_without_touching_color() {
        let rule = ChromaKeyRule::uniform(240);
        let cut = backdrop_rgba_image()
            .extract_background(rule, Some(EdgeSmoothing::new(1)))
            .unwrap();

        // backdrop color survives even where alpha was keyed out
        assert_eq!(&cut.get_pixel(0, 0).0[..3], &[250, 250, 250]);
        // the lone opaque center leaks opacity into its neighborhood:
        // corner windows hold 4 alphas, one of them 255 -> round(255/4) = 64
        assert_eq!(cut.get_pixel(0, 0)[3], 64);
        // center window holds 9 alphas, one of them 255 -> round(255/9) = 28
        assert_eq!(cut.get_pixel(1, 1)[3], 28);
    }

    #[test]
    fn dimensions_are_preserved() {
        let cut = backdrop_rgba_image()
            .extract_background(ChromaKeyRule::uniform(10), Some(EdgeSmoothing::new(2)))
            .unwrap();
        assert_eq!(cut.dimensions(), (3, 3));
    }

    #[test]
    fn rgb_input_produces_rgba_output() {
        let mut image: Image<Rgb<u8>> = Image::new(2, 2);
        image.pixels_mut().for_each(|p| *p = Rgb([245, 245, 245]));
        image.put_pixel(0, 0, Rgb([50, 60, 70]));

        let cut = image
            .extract_background(ChromaKeyRule::uniform(240), None)
            .unwrap();
        assert_eq!(cut.get_pixel(0, 0), &Rgba([50, 60, 70, 255]));
        assert_eq!(cut.get_pixel(1, 1), &Rgba([245, 245, 245, 0]));
    }

    #[test]
    fn empty_image_is_rejected_before_any_work() {
        let image: Image<Rgba<u8>> = Image::new(0, 0);
        assert_eq!(
            image.extract_background(ChromaKeyRule::uniform(240), None),
            Err(ChromaKeyError::EmptyImage {
                width: 0,
                height: 0
            })
        );
    }
}
