use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use atomicwrites::{AtomicFile, OverwriteBehavior};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

pub fn atomic_save_json<T: Serialize>(path: &Path, object: &T) -> Result<(), FileOperationError> {
    let af = AtomicFile::new(path, OverwriteBehavior::AllowOverwrite);
    af.write(|f| serde_json::to_writer(BufWriter::new(f), object))?;
    Ok(())
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, FileOperationError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let data = serde_json::from_reader(reader)?;
    Ok(data)
}

/// Atomically replace `path` with whatever `write_fn` produces.
/// Readers never observe a half-written file.
pub fn atomic_save_with<F>(path: &Path, write_fn: F) -> Result<(), FileOperationError>
where
    F: FnOnce(&mut BufWriter<&mut File>) -> io::Result<()>,
{
    let af = AtomicFile::new(path, OverwriteBehavior::AllowOverwrite);
    af.write(|f| {
        let mut writer = BufWriter::new(f);
        write_fn(&mut writer)?;
        writer.flush()
    })?;
    Ok(())
}

pub fn open_buffered(path: &Path) -> Result<BufReader<File>, FileOperationError> {
    Ok(BufReader::new(File::open(path)?))
}

#[derive(Debug, Error)]
pub enum FileOperationError {
    #[error(transparent)]
    IoError(#[from] io::Error),

    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),

    #[error(transparent)]
    AtomicWriteError(#[from] atomicwrites::Error<io::Error>),

    #[error(transparent)]
    AtomicWriteSerdeJsonError(#[from] atomicwrites::Error<serde_json::Error>),
}

use std::io::{Error as IoError, ErrorKind};

impl From<FileOperationError> for IoError {
    fn from(error: FileOperationError) -> Self {
        match error {
            FileOperationError::IoError(e) => e,
            _ => IoError::new(ErrorKind::Other, error.to_string()),
        }
    }
}
