pub mod common;
pub mod embedding;
pub mod inverted_file;
pub mod weighting;

pub use common::ops::*;
pub use embedding::*;
pub use inverted_file::*;
pub use weighting::*;
