//! Per-visual-word inverted files with Hamming embedding, used to find candidate
//! database images for a query image in bag-of-binary-words retrieval.
//!
//! One [`InvertedFile`] is kept per vocabulary word. It stores `(image_id, binary code)`
//! entries, learns the per-dimension thresholds of the Hamming embedding, keeps the idf
//! weight of the word and scores a query feature against all images that contain the word.

pub mod common;
pub mod core;

use std::cmp::Ordering;
use ordered_float::OrderedFloat;

pub use crate::common::{HammingDistance, ImageId, InvertedFileLibError, ScoreType};
pub use crate::core::*;

/// Similarity contribution of one word to one database image.
///
/// Ordered by score, ties broken by image id, so two scores are only equal for the same image.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageScore {
    pub image_id: ImageId,
    pub score: ScoreType,
}

impl ImageScore {
    pub fn new(image_id: ImageId, score: ScoreType) -> Self {
        Self { image_id, score }
    }
}

impl Eq for ImageScore {}

impl PartialEq<Self> for ImageScore {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Ord for ImageScore {
    fn cmp(&self, other: &Self) -> Ordering {
        OrderedFloat(self.score).cmp(&OrderedFloat(other.score)).then_with(|| self.image_id.cmp(&other.image_id))
    }
}

impl PartialOrd for ImageScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
