//! Chroma-key background extraction for static images.
//!
//! The crate removes a near-uniform background (e.g. the near-white backdrop
//! of a product shot) from a decoded bitmap by classifying pixels against a
//! per-channel threshold rule and forcing matching pixels' alpha to zero.
//! An optional box blur over the alpha channel softens the cut-out edge.
//! Color channels are never modified; only opacity changes.

mod chromakey;
mod error;
mod utils;

#[cfg(test)]
mod test_utils;

pub use chromakey::alpha::AlphaChannelExt;
pub use chromakey::box_filter::{BoxFilterExt, EdgeSmoothing};
pub use chromakey::extract::ExtractBackgroundExt;
pub use chromakey::keying::KeyBackgroundExt;
pub use chromakey::rule::ChromaKeyRule;
pub use chromakey::summed_area_table::SummedAreaTable;
pub use error::ChromaKeyError;

pub use imageproc::definitions::Image;
