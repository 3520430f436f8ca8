use std::io;

use thiserror::Error;

use crate::core::{FileOperationError, InvertedFileError};

#[derive(Debug, Error)]
pub enum InvertedFileLibError {
    #[error(transparent)]
    InvertedFileError(#[from] InvertedFileError),

    #[error(transparent)]
    FileOperationError(#[from] FileOperationError),
}

impl From<InvertedFileLibError> for io::Error {
    fn from(error: InvertedFileLibError) -> Self {
        match error {
            InvertedFileLibError::InvertedFileError(e) => e.into(),
            InvertedFileLibError::FileOperationError(e) => e.into(),
        }
    }
}
