pub mod batch;
mod codec;
mod entry;
mod errors;
mod inverted_file;
mod inverted_file_config;
mod scorer;
mod statistics;
mod status;

pub use entry::InvertedFileEntry;
pub use errors::InvertedFileError;
pub use inverted_file::{InvertedFile, InvertedFile128, InvertedFile256, InvertedFile32, InvertedFile64};
pub use inverted_file_config::InvertedFileConfig;
pub use status::Status;
