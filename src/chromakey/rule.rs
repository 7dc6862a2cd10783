use crate::error::ChromaKeyError;

/// Per-channel lower bounds deciding which pixels belong to the background.
///
/// A pixel is classified as background when every color channel strictly
/// exceeds its threshold: `R > min_red && G > min_green && B > min_blue`.
/// The strict comparison means a threshold of 255 can never match, and a
/// pixel sitting exactly on the threshold is kept as foreground.
///
/// Alpha takes no part in classification, so re-keying an already keyed
/// image with the same rule is a no-op.
///
/// # Examples
///
/// ```
/// use chromakey::ChromaKeyRule;
///
/// // Near-white backdrop, uniform across channels
/// let rule = ChromaKeyRule::uniform(240);
/// assert!(rule.is_background(241, 241, 241));
/// assert!(!rule.is_background(240, 240, 240)); // on the boundary: kept
/// assert!(!rule.is_background(241, 241, 239)); // one channel below: kept
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChromaKeyRule {
    min_red: u8,
    min_green: u8,
    min_blue: u8,
}

impl ChromaKeyRule {
    /// Creates a rule from per-channel lower bounds.
    #[must_use]
    pub const fn new(min_red: u8, min_green: u8, min_blue: u8) -> Self {
        Self {
            min_red,
            min_green,
            min_blue,
        }
    }

    /// Creates a rule with the same lower bound on all three channels.
    ///
    /// Near-white backdrops are usually keyed this way.
    #[must_use]
    pub const fn uniform(min: u8) -> Self {
        Self::new(min, min, min)
    }

    /// Creates a rule from untrusted integer values, validating the range.
    ///
    /// # Errors
    ///
    /// Returns [`ChromaKeyError::ThresholdOutOfRange`] naming the first
    /// channel whose value falls outside `0..=255`.
    pub fn try_new(min_red: i64, min_green: i64, min_blue: i64) -> Result<Self, ChromaKeyError> {
        Ok(Self::new(
            checked_threshold("red", min_red)?,
            checked_threshold("green", min_green)?,
            checked_threshold("blue", min_blue)?,
        ))
    }

    /// The per-channel lower bounds as a `(red, green, blue)` triple.
    #[must_use]
    pub const fn thresholds(&self) -> (u8, u8, u8) {
        (self.min_red, self.min_green, self.min_blue)
    }

    /// Classifies a color: `true` means background.
    ///
    /// All three channels must strictly exceed their bound.
    #[inline]
    #[must_use]
    pub const fn is_background(&self, red: u8, green: u8, blue: u8) -> bool {
        red > self.min_red && green > self.min_green && blue > self.min_blue
    }
}

fn checked_threshold(channel: &'static str, value: i64) -> Result<u8, ChromaKeyError> {
    u8::try_from(value).map_err(|_| ChromaKeyError::ThresholdOutOfRange { channel, value })
}
