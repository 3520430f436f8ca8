use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::common::constants::{DEFAULT_HAMMING_SIGMA, DEFAULT_MAX_HAMMING_DISTANCE_FACTOR, INVERTED_FILE_CONFIG_FILE};
use crate::core::{atomic_save_json, read_json, FileOperationError, HammingWeightTable, InvertedFileError};
use crate::HammingDistance;

fn default_sigma() -> f32 {
    DEFAULT_HAMMING_SIGMA
}

/// Parameters of the Hamming-distance voting weight shared by all inverted files of an index.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Copy, TypedBuilder)]
#[serde(rename_all = "snake_case")]
pub struct InvertedFileConfig {
    #[serde(default = "default_sigma")]
    #[serde(rename = "sigma")]
    #[builder(default = DEFAULT_HAMMING_SIGMA)]
    pub sigma: f32,

    /// Distances above this don't vote. Defaults to `round(1.5 * sigma)`.
    #[serde(default)]
    #[serde(rename = "max_hamming_distance")]
    #[builder(default, setter(strip_option))]
    pub max_hamming_distance: Option<HammingDistance>,
}

impl Default for InvertedFileConfig {
    fn default() -> Self {
        InvertedFileConfig::builder().build()
    }
}

impl InvertedFileConfig {
    pub fn is_valid(&self) -> Result<bool, InvertedFileError> {
        if !self.sigma.is_finite() || self.sigma <= 0.0 {
            return Err(InvertedFileError::InvalidConfig(format!("`sigma` must be a positive number, got {}.", self.sigma)));
        }
        Ok(true)
    }

    pub fn max_hamming_distance(&self) -> HammingDistance {
        match self.max_hamming_distance {
            Some(distance) => distance,
            None => (DEFAULT_MAX_HAMMING_DISTANCE_FACTOR * self.sigma).round() as HammingDistance,
        }
    }

    /// Shared Gaussian weight table for `bits`-wide codes.
    pub fn weight_table(&self, bits: usize) -> Result<Arc<HammingWeightTable>, InvertedFileError> {
        self.is_valid()?;
        Ok(HammingWeightTable::shared_gaussian(bits, self.sigma, self.max_hamming_distance()))
    }

    pub fn load(index_path: &Path) -> Result<Self, FileOperationError> {
        let file_path = index_path.join(INVERTED_FILE_CONFIG_FILE);
        read_json(&file_path)
    }

    pub fn save(&self, index_path: &Path) -> Result<(), FileOperationError> {
        let file_path = index_path.join(INVERTED_FILE_CONFIG_FILE);
        if !index_path.exists() {
            std::fs::create_dir_all(index_path).map_err(FileOperationError::IoError)?;
        }
        atomic_save_json(&file_path, self)
    }
}
