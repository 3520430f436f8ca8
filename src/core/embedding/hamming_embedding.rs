use log::{trace, warn};

use crate::common::constants::MIN_EMBEDDING_TRAINING_ROWS;
use crate::core::embedding::{median, BinaryCode, CodeWidth};

/// Per-dimension thresholds turning a projected descriptor into a binary code.
///
/// Bit `i` of a code is set iff `descriptor[i] > thresholds[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct HammingEmbedding<const N: usize> {
    thresholds: [f32; N],
}

impl<const N: usize> Default for HammingEmbedding<N> {
    fn default() -> Self {
        Self { thresholds: [0.0; N] }
    }
}

impl<const N: usize> HammingEmbedding<N> {
    pub fn from_thresholds(thresholds: [f32; N]) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &[f32; N] {
        &self.thresholds
    }

    pub fn reset(&mut self) {
        self.thresholds = [0.0; N];
    }

    pub fn quantize<const B: usize>(&self, descriptor: &[f32; N]) -> BinaryCode<B> {
        let () = CodeWidth::<N, B>::VALID;
        let mut code = BinaryCode::<B>::zeros();
        for (i, (value, threshold)) in descriptor.iter().zip(self.thresholds.iter()).enumerate() {
            // Strict comparison, a value equal to its threshold maps to 0.
            if value > threshold {
                code.set_bit(i, true);
            }
        }
        code
    }

    /// Learn every threshold as the median of its column in `descriptors`.
    ///
    /// Returns `false` and leaves the thresholds untouched when fewer than two rows are given.
    pub fn train(&mut self, descriptors: &[[f32; N]]) -> bool {
        if descriptors.len() < MIN_EMBEDDING_TRAINING_ROWS {
            warn!(
                "Skip learning hamming embedding thresholds, got {} training descriptors, need at least {}.",
                descriptors.len(),
                MIN_EMBEDDING_TRAINING_ROWS
            );
            return false;
        }

        let mut column: Vec<f32> = vec![0.0; descriptors.len()];
        for dim in 0..N {
            for (slot, row) in column.iter_mut().zip(descriptors.iter()) {
                *slot = row[dim];
            }
            // `column` is non-empty here.
            self.thresholds[dim] = median(&mut column).unwrap_or_default();
        }
        trace!("Learned {} hamming embedding thresholds from {} descriptors.", N, descriptors.len());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_strict_threshold() {
        let embedding = HammingEmbedding::<8>::from_thresholds([0.5; 8]);
        let mut descriptor = [0.5f32; 8];
        assert_eq!(embedding.quantize::<1>(&descriptor), BinaryCode::zeros());

        descriptor[3] = f32::from_bits(0.5f32.to_bits() + 1);
        descriptor[7] = 10.0;
        assert_eq!(embedding.quantize::<1>(&descriptor).as_bytes(), &[0b1000_1000]);
    }

    #[test]
    fn test_quantize_with_zero_thresholds() {
        let embedding = HammingEmbedding::<16>::default();
        let descriptor: [f32; 16] = std::array::from_fn(|i| if i % 2 == 0 { 1.0 } else { -1.0 });
        assert_eq!(embedding.quantize::<2>(&descriptor).as_bytes(), &[0x55, 0x55]);
    }

    #[test]
    fn test_train_requires_two_rows() {
        let mut embedding = HammingEmbedding::<8>::from_thresholds([0.25; 8]);
        assert!(!embedding.train(&[]));
        assert!(!embedding.train(&[[3.0; 8]]));
        assert_eq!(embedding.thresholds(), &[0.25; 8]);
    }

    #[test]
    fn test_train_column_medians() {
        let rows: Vec<[f32; 8]> = vec![
            [1.0, 0.0, -4.0, 2.0, 0.0, 0.0, 0.0, 9.0],
            [3.0, 0.0, -2.0, 2.0, 0.0, 0.0, 0.0, 1.0],
            [2.0, 6.0, -3.0, 2.0, 0.0, 0.0, 0.0, 5.0],
        ];
        let mut embedding = HammingEmbedding::<8>::default();
        assert!(embedding.train(&rows));
        assert_eq!(embedding.thresholds(), &[2.0, 0.0, -3.0, 2.0, 0.0, 0.0, 0.0, 5.0]);

        let even_rows = &rows[..2];
        assert!(embedding.train(even_rows));
        assert_eq!(embedding.thresholds(), &[2.0, 0.0, -3.0, 2.0, 0.0, 0.0, 0.0, 5.0]);

        embedding.reset();
        assert_eq!(embedding.thresholds(), &[0.0; 8]);
    }
}
