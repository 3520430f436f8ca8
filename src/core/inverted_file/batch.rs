//! Word-level parallel helpers over the inverted files of a whole vocabulary.
//!
//! Inverted files share no mutable state, so each one is handed to exactly one worker.

use log::{error, info};
use measure_time::debug_time;
use rayon::prelude::*;

use crate::core::InvertedFile;

/// Sort the entries of every file.
pub fn sort_all_entries<const N: usize, const B: usize>(files: &mut [InvertedFile<N, B>]) {
    debug_time!("sort entries of {} inverted files", files.len());
    files.par_iter_mut().for_each(|file| file.sort_entries());
}

/// Learn the embedding of `files[i]` from `descriptors[i]`. Returns how many files got one.
///
/// Panics if both slices differ in length.
pub fn compute_hamming_embeddings<const N: usize, const B: usize>(
    files: &mut [InvertedFile<N, B>],
    descriptors: &[Vec<[f32; N]>],
) -> usize {
    if files.len() != descriptors.len() {
        let error_msg = format!("Got training descriptors for {} words, but {} inverted files", descriptors.len(), files.len());
        error!("{}", error_msg);
        panic!("{}", error_msg);
    }
    debug_time!("compute hamming embeddings of {} inverted files", files.len());
    let embedded = files
        .par_iter_mut()
        .zip(descriptors.par_iter())
        .map(|(file, word_descriptors)| file.compute_hamming_embedding(word_descriptors))
        .filter(|&embedded| embedded)
        .count();
    info!("Computed hamming embeddings for {} of {} inverted files.", embedded, files.len());
    embedded
}

pub fn compute_idf_weights<const N: usize, const B: usize>(files: &mut [InvertedFile<N, B>], num_total_images: usize) {
    debug_time!("compute idf weights of {} inverted files", files.len());
    files.par_iter_mut().for_each(|file| file.compute_idf_weight(num_total_images));
}

/// Self-similarity of every image `0..num_images` summed over all words.
pub fn image_self_similarities<const N: usize, const B: usize>(files: &[InvertedFile<N, B>], num_images: usize) -> Vec<f64> {
    debug_time!("compute self similarities of {} images", num_images);
    files
        .par_iter()
        .fold(
            || vec![0.0f64; num_images],
            |mut self_similarities, file| {
                file.compute_image_self_similarities(&mut self_similarities);
                self_similarities
            },
        )
        .reduce(
            || vec![0.0f64; num_images],
            |mut lhs, rhs| {
                lhs.iter_mut().zip(rhs.iter()).for_each(|(l, r)| *l += r);
                lhs
            },
        )
}
