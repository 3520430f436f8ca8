use log::{debug, error};

use crate::core::{InvertedFile, Status};

impl<const N: usize, const B: usize> InvertedFile<N, B> {
    /// Learn the Hamming embedding thresholds from the projected training descriptors of this word.
    /// Each row of `descriptors` is one descriptor.
    ///
    /// Fewer than two rows is a no-op, the file then stays without embedding.
    pub fn compute_hamming_embedding(&mut self, descriptors: &[[f32; N]]) -> bool {
        if !self.embedding.train(descriptors) {
            return false;
        }
        self.status.insert(Status::HAS_HAMMING_EMBEDDING);
        true
    }

    /// `idf = ln(1 + num_total_images / num_images_in_file)`.
    ///
    /// An empty file keeps its previous weight.
    pub fn compute_idf_weight(&mut self, num_total_images: usize) {
        if self.entries.is_empty() {
            return;
        }
        let num_images = self.image_ids().len();
        self.idf_weight = (1.0 + num_total_images as f64 / num_images as f64).ln() as f32;
        debug!(
            "Computed idf weight {} for {} images out of {} total images.",
            self.idf_weight, num_images, num_total_images
        );
    }

    /// Add `idf²` to `self_similarities[image_id]` for every entry, i.e. the part of each
    /// image's self-similarity caused by this word. The caller sums these over all words to
    /// normalize image scores.
    ///
    /// Panics if `self_similarities` doesn't cover every image id in the file.
    pub fn compute_image_self_similarities(&self, self_similarities: &mut [f64]) {
        let squared_idf_weight = (self.idf_weight * self.idf_weight) as f64;
        for entry in self.entries.iter() {
            let len = self_similarities.len();
            let slot = self_similarities.get_mut(entry.image_id as usize).unwrap_or_else(|| {
                let error_msg = format!("image_id {} overflow when accumulating self similarities, length is {}", entry.image_id, len);
                error!("{}", error_msg);
                panic!("{}", error_msg);
            });
            *slot += squared_idf_weight;
        }
    }
}
