use itertools::Itertools;
use log::trace;

use crate::core::InvertedFile;
use crate::{ImageScore, ScoreType};

impl<const N: usize, const B: usize> InvertedFile<N, B> {
    /// Score a projected query feature against every image in this file.
    ///
    /// Returns one score per distinct image in ascending image id order, or nothing when
    /// the file isn't usable or is empty.
    pub fn score_feature(&self, descriptor: &[f32; N]) -> Vec<ImageScore> {
        let mut image_scores = Vec::new();
        self.score_feature_into(descriptor, &mut image_scores);
        image_scores
    }

    /// Same as [`Self::score_feature`], reusing `image_scores` (it is cleared first).
    pub fn score_feature_into(&self, descriptor: &[f32; N], image_scores: &mut Vec<ImageScore>) {
        image_scores.clear();

        if !self.is_usable() || self.entries.is_empty() {
            return;
        }

        let squared_idf_weight = self.idf_weight * self.idf_weight;
        let query_code = self.convert_to_binary_descriptor(descriptor);

        // Runs of equal image ids are contiguous because the entries are sorted.
        let image_runs = self.entries.iter().chunk_by(|entry| entry.image_id);
        for (image_id, run) in &image_runs {
            let mut score: ScoreType = 0.0;
            let mut num_image_votes: usize = 0;
            for entry in run {
                let hamming_distance = query_code.hamming_distance(&entry.code);
                score += self.weight_table.weight(hamming_distance);
                num_image_votes += 1;
            }
            // Burstiness normalization (Arandjelovic & Zisserman, ACCV 2014, Eqn. 2): many
            // features of one image matching the same query feature only count `sqrt(n)` times.
            score /= (num_image_votes as ScoreType).sqrt();
            score *= squared_idf_weight;
            image_scores.push(ImageScore::new(image_id, score));
        }
        trace!("Scored query feature {} against {} images.", query_code, image_scores.len());
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rand::{thread_rng, Rng};

    use super::super::test::{init_logger, random_descriptor};
    use crate::core::{HammingWeightTable, InvertedFile};
    use crate::ImageScore;

    fn linear_weight_file() -> InvertedFile<8, 1> {
        InvertedFile::<8, 1>::with_weight_table(Arc::new(HammingWeightTable::from_fn(8, |d| 8.0 - d as f32)))
    }

    fn mark_embedded(file: &mut InvertedFile<8, 1>) {
        // Two symmetric rows keep the thresholds at zero.
        assert!(file.compute_hamming_embedding(&[[-1.0; 8], [1.0; 8]]));
        assert_eq!(file.thresholds(), &[0.0; 8]);
    }

    #[test]
    fn test_score_two_images() {
        init_logger();
        let mut file = linear_weight_file();
        mark_embedded(&mut file);

        file.add_entry(1, &[-1.0; 8]);
        file.add_entry(1, &[1.0; 8]);
        file.add_entry(2, &[-1.0; 8]);
        file.sort_entries();
        file.compute_idf_weight(3);
        assert!(file.is_usable());

        let scores = file.score_feature(&[-1.0; 8]);
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0].image_id, 1);
        assert_eq!(scores[1].image_id, 2);
        // idf = ln(1 + 3 / 2) ~ 0.9163, idf^2 ~ 0.8396.
        assert!((file.idf_weight() - 0.916_291).abs() < 1e-5);
        assert!((scores[0].score - 4.750).abs() < 1e-3, "{:?}", scores);
        assert!((scores[1].score - 6.717).abs() < 1e-3, "{:?}", scores);

        let squared_idf_weight = 2.5f32.ln() * 2.5f32.ln();
        assert!((scores[0].score - 8.0 / 2.0f32.sqrt() * squared_idf_weight).abs() < 1e-5);
        assert!((scores[1].score - 8.0 * squared_idf_weight).abs() < 1e-5);
    }

    #[test]
    fn test_unusable_file_scores_nothing() {
        let mut file = linear_weight_file();
        file.add_entry(1, &[-1.0; 8]);
        file.compute_idf_weight(3);

        // Neither flag.
        assert!(file.score_feature(&[-1.0; 8]).is_empty());

        // Sorted without embedding.
        file.sort_entries();
        assert!(file.score_feature(&[-1.0; 8]).is_empty());

        // Embedding, but sort order invalidated by a later add.
        mark_embedded(&mut file);
        file.add_entry(0, &[1.0; 8]);
        assert!(!file.is_usable());
        assert!(file.score_feature(&[-1.0; 8]).is_empty());

        file.sort_entries();
        assert_eq!(file.score_feature(&[-1.0; 8]).len(), 2);
    }

    #[test]
    fn test_empty_usable_file_scores_nothing() {
        let mut file = linear_weight_file();
        mark_embedded(&mut file);
        file.sort_entries();
        assert!(file.is_usable());
        assert!(file.score_feature(&[0.5; 8]).is_empty());
    }

    #[test]
    fn test_score_feature_into_reuses_buffer() {
        let mut file = linear_weight_file();
        mark_embedded(&mut file);
        file.add_entry(5, &[1.0; 8]);
        file.sort_entries();
        file.compute_idf_weight(1);

        let mut image_scores = vec![ImageScore::new(99, 1.0); 4];
        file.score_feature_into(&[1.0; 8], &mut image_scores);
        assert_eq!(image_scores.len(), 1);
        assert_eq!(image_scores[0].image_id, 5);
        assert!((image_scores[0].score - 8.0 * 2.0f32.ln() * 2.0f32.ln()).abs() < 1e-5);

        file.clear_entries();
        file.score_feature_into(&[1.0; 8], &mut image_scores);
        assert!(image_scores.is_empty());
    }

    #[test]
    fn test_one_score_per_image_in_ascending_order() {
        let mut rng = thread_rng();
        let mut file = InvertedFile::<64, 8>::new();
        let training: Vec<[f32; 64]> = (0..64).map(|_| random_descriptor(&mut rng)).collect();
        assert!(file.compute_hamming_embedding(&training));

        for _ in 0..1000 {
            file.add_entry(rng.gen_range(0..50), &random_descriptor(&mut rng));
        }
        file.sort_entries();
        file.compute_idf_weight(500);

        let mut expected_ids: Vec<_> = file.image_ids().into_iter().collect();
        expected_ids.sort();

        let query = random_descriptor(&mut rng);
        let scores = file.score_feature(&query);
        let ids: Vec<_> = scores.iter().map(|s| s.image_id).collect();
        assert_eq!(ids, expected_ids);
        assert!(scores.iter().all(|s| s.score >= 0.0 && s.score.is_finite()));
    }

    #[test]
    fn test_exact_match_scores_highest() {
        let mut file = InvertedFile::<64, 8>::new();
        let mut rng = thread_rng();
        let training: Vec<[f32; 64]> = (0..32).map(|_| random_descriptor(&mut rng)).collect();
        assert!(file.compute_hamming_embedding(&training));

        let query = random_descriptor(&mut rng);
        let opposite: [f32; 64] = std::array::from_fn(|i| if query[i] > file.thresholds()[i] { -10.0 } else { 10.0 });
        file.add_entry(0, &opposite);
        file.add_entry(1, &query);
        file.sort_entries();
        file.compute_idf_weight(10);

        let scores = file.score_feature(&query);
        assert_eq!(scores.len(), 2);
        // Default Gaussian weighting: distance 0 votes 1, distance 64 is past the cut-off.
        assert_eq!(scores[0].score, 0.0);
        assert!((scores[1].score - file.idf_weight() * file.idf_weight()).abs() < 1e-6);
        assert_eq!(scores.iter().max().map(|s| s.image_id), Some(1));
    }
}
