use std::sync::Arc;

use fnv::FnvHashMap;
use log::debug;
use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::HammingDistance;

/// `(code bits, sigma bits, max distance)`
type WeightTableKey = (usize, u32, usize);

static HAMMING_WEIGHT_TABLE_CACHE: Lazy<RwLock<FnvHashMap<WeightTableKey, Arc<HammingWeightTable>>>> =
    Lazy::new(|| RwLock::new(FnvHashMap::default()));

/// Look-up table from a Hamming distance in `0..=bits` to a voting weight.
///
/// Closer codes should vote more, so tables are expected to be non-increasing in the distance.
#[derive(Debug, Clone, PartialEq)]
pub struct HammingWeightTable {
    table: Vec<f32>,
}

impl HammingWeightTable {
    /// Tabulate `weight_fn` for every distance a `bits`-wide code can produce.
    pub fn from_fn<F>(bits: usize, weight_fn: F) -> Self
    where
        F: Fn(HammingDistance) -> f32,
    {
        Self { table: (0..=bits).map(weight_fn).collect() }
    }

    /// `exp(-d² / sigma²)` up to `max_distance`, zero beyond.
    pub fn gaussian(bits: usize, sigma: f32, max_distance: HammingDistance) -> Self {
        let sigma_squared = sigma * sigma;
        Self::from_fn(bits, |distance| {
            if distance <= max_distance {
                let distance = distance as f32;
                (-distance * distance / sigma_squared).exp()
            } else {
                0.0
            }
        })
    }

    /// Gaussian table shared by every caller asking for the same parameters.
    /// The table is built on first use and never mutated afterwards.
    pub fn shared_gaussian(bits: usize, sigma: f32, max_distance: HammingDistance) -> Arc<Self> {
        let key: WeightTableKey = (bits, sigma.to_bits(), max_distance);
        if let Some(table) = HAMMING_WEIGHT_TABLE_CACHE.read().get(&key) {
            return table.clone();
        }
        let mut cache = HAMMING_WEIGHT_TABLE_CACHE.write();
        cache
            .entry(key)
            .or_insert_with(|| {
                debug!("Building hamming weight table, bits: {}, sigma: {}, max distance: {}", bits, sigma, max_distance);
                Arc::new(Self::gaussian(bits, sigma, max_distance))
            })
            .clone()
    }

    /// Widest code this table covers.
    pub fn bits(&self) -> usize {
        self.table.len() - 1
    }

    #[inline]
    pub fn weight(&self, distance: HammingDistance) -> f32 {
        self.table[distance]
    }

    pub fn is_non_increasing(&self) -> bool {
        self.table.windows(2).all(|pair| pair[0] >= pair[1])
    }
}
