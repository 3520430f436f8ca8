mod hamming_weight;

pub use hamming_weight::HammingWeightTable;
