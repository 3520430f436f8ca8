use std::sync::Arc;

use fnv::FnvHashSet;
use log::{debug, error, trace};

use crate::core::embedding::CodeWidth;
use crate::core::{BinaryCode, HammingEmbedding, HammingWeightTable, InvertedFileConfig, InvertedFileEntry, Status};
use crate::ImageId;

/// Inverted file of a single visual word.
///
/// `N` is the length of the projected descriptors and the number of bits of the Hamming
/// embedding, `B = N / 8` is the byte width of the stored codes.
#[derive(Debug, Clone)]
pub struct InvertedFile<const N: usize, const B: usize> {
    pub(super) status: Status,
    /// Inverse document frequency weight of this word.
    pub(super) idf_weight: f32,
    pub(super) entries: Vec<InvertedFileEntry<B>>,
    pub(super) embedding: HammingEmbedding<N>,
    /// Turns a Hamming distance into a vote, shared by all files of the same width.
    pub(super) weight_table: Arc<HammingWeightTable>,
}

pub type InvertedFile32 = InvertedFile<32, 4>;
pub type InvertedFile64 = InvertedFile<64, 8>;
pub type InvertedFile128 = InvertedFile<128, 16>;
pub type InvertedFile256 = InvertedFile<256, 32>;

impl<const N: usize, const B: usize> Default for InvertedFile<N, B> {
    fn default() -> Self {
        Self::new()
    }
}

/// Persistent state only, the weight table is a shared collaborator.
impl<const N: usize, const B: usize> PartialEq for InvertedFile<N, B> {
    fn eq(&self, other: &Self) -> bool {
        self.status == other.status
            && self.idf_weight.to_bits() == other.idf_weight.to_bits()
            && self.embedding == other.embedding
            && self.entries == other.entries
    }
}

impl<const N: usize, const B: usize> InvertedFile<N, B> {
    /// Empty, unusable file voting with the default Gaussian weighting.
    pub fn new() -> Self {
        let config = InvertedFileConfig::default();
        Self::with_weight_table(HammingWeightTable::shared_gaussian(N, config.sigma, config.max_hamming_distance()))
    }

    /// Empty, unusable file voting with `weight_table`.
    /// The table must cover every distance `0..=N`.
    pub fn with_weight_table(weight_table: Arc<HammingWeightTable>) -> Self {
        let () = CodeWidth::<N, B>::VALID;
        if weight_table.bits() != N {
            let error_msg = format!("Hamming weight table covers {} bits, inverted file codes have {} bits", weight_table.bits(), N);
            error!("{}", error_msg);
            panic!("{}", error_msg);
        }
        Self {
            status: Status::UNUSABLE,
            idf_weight: 0.0,
            entries: Vec::new(),
            embedding: HammingEmbedding::default(),
            weight_table,
        }
    }

    /// The number of added entries.
    pub fn num_entries(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn has_hamming_embedding(&self) -> bool {
        self.status.contains(Status::HAS_HAMMING_EMBEDDING)
    }

    pub fn entries_sorted(&self) -> bool {
        self.status.contains(Status::ENTRIES_SORTED)
    }

    /// Sorted entries and a learned embedding, both are required by [`Self::score_feature`].
    pub fn is_usable(&self) -> bool {
        self.status.is_usable()
    }

    pub fn idf_weight(&self) -> f32 {
        self.idf_weight
    }

    pub fn thresholds(&self) -> &[f32; N] {
        self.embedding.thresholds()
    }

    pub fn entries(&self) -> &[InvertedFileEntry<B>] {
        &self.entries
    }

    pub fn weight_table(&self) -> &Arc<HammingWeightTable> {
        &self.weight_table
    }

    /// Binarize a projected descriptor with the current thresholds.
    pub fn convert_to_binary_descriptor(&self, descriptor: &[f32; N]) -> BinaryCode<B> {
        self.embedding.quantize::<B>(descriptor)
    }

    /// Quantize `descriptor` and append it as a feature of `image_id`. Invalidates the sort order.
    ///
    /// Panics if `image_id` is negative.
    pub fn add_entry(&mut self, image_id: ImageId, descriptor: &[f32; N]) {
        if image_id < 0 {
            let error_msg = format!("Can't add entry with negative image_id: {}", image_id);
            error!("{}", error_msg);
            panic!("{}", error_msg);
        }
        let code = self.convert_to_binary_descriptor(descriptor);
        trace!("Add inverted file entry, image_id: {}, code: {}", image_id, code);
        self.entries.push(InvertedFileEntry::new(image_id, code));
        self.status.remove(Status::ENTRIES_SORTED);
    }

    /// Sort entries by ascending image id. Required before scoring.
    pub fn sort_entries(&mut self) {
        // Stable, so features of one image keep their insertion order.
        self.entries.sort_by_key(|entry| entry.image_id);
        self.status.insert(Status::ENTRIES_SORTED);
        debug!("Sorted {} inverted file entries.", self.entries.len());
    }

    /// Drop all entries; thresholds and idf weight are kept.
    pub fn clear_entries(&mut self) {
        self.entries.clear();
        self.status.remove(Status::ENTRIES_SORTED);
    }

    /// Back to the freshly constructed state.
    pub fn reset(&mut self) {
        self.status = Status::UNUSABLE;
        self.idf_weight = 0.0;
        self.entries.clear();
        self.embedding.reset();
    }

    /// Identifiers of all indexed images in this file.
    pub fn image_ids(&self) -> FnvHashSet<ImageId> {
        self.entries.iter().map(|entry| entry.image_id).collect()
    }
}
