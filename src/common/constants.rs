/// Bandwidth of the default Gaussian Hamming-distance weighting.
pub const DEFAULT_HAMMING_SIGMA: f32 = 16.0;

/// Default cut-off is `1.5 * sigma`, codes further away than this don't vote.
pub const DEFAULT_MAX_HAMMING_DISTANCE_FACTOR: f32 = 1.5;

/// Number of training rows required before thresholds are learned.
pub const MIN_EMBEDDING_TRAINING_ROWS: usize = 2;

pub const INVERTED_FILE_CONFIG_FILE: &str = "inverted_file_config.json";
