use std::io;

use thiserror::Error;

use crate::core::FileOperationError;
use crate::ImageId;

#[derive(Debug, Error)]
pub enum InvertedFileError {
    #[error("An IO error occurred: '{0}'")]
    IoError(#[from] io::Error),

    #[error("Inverted file data is truncated while reading {0}")]
    Truncated(&'static str),

    #[error("Entry {index} stores an invalid image id {image_id}")]
    InvalidImageId { index: u32, image_id: ImageId },

    #[error("Too many entries to serialize: {0}")]
    TooManyEntries(usize),

    #[error("Invalid InvertedFileConfig: '{0}'")]
    InvalidConfig(String),

    #[error("'{0:?}'")]
    FileOperationError(#[from] FileOperationError),
}

impl InvertedFileError {
    /// Turn an early end-of-stream into [`InvertedFileError::Truncated`], keep other IO errors.
    pub(crate) fn reading(field: &'static str) -> impl FnOnce(io::Error) -> InvertedFileError {
        move |error| match error.kind() {
            io::ErrorKind::UnexpectedEof => InvertedFileError::Truncated(field),
            _ => InvertedFileError::IoError(error),
        }
    }
}

impl From<InvertedFileError> for io::Error {
    fn from(error: InvertedFileError) -> Self {
        match error {
            InvertedFileError::IoError(e) => e,
            InvertedFileError::FileOperationError(e) => e.into(),
            InvertedFileError::Truncated(_) => io::Error::new(io::ErrorKind::UnexpectedEof, error.to_string()),
            _ => io::Error::new(io::ErrorKind::InvalidData, error.to_string()),
        }
    }
}
