//! Binary layout of one inverted file, all fields little-endian:
//!
//! ```text
//! status: u8 | idf_weight: f32 | thresholds: [f32; N] | entry_count: u32 | entries: [i32 image_id, [u8; N / 8] code] * entry_count
//! ```
//!
//! There is no header or version marker, the record of one word can be concatenated with others
//! by an outer index file as long as all of them share the same `N`.

use std::io::{Read, Write};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use log::debug;

use crate::core::common::ops::{atomic_save_with, open_buffered, read_f32_array, write_f32_array};
use crate::core::{HammingEmbedding, InvertedFile, InvertedFileEntry, InvertedFileError, Status};

impl<const N: usize, const B: usize> InvertedFile<N, B> {
    /// Number of bytes [`Self::write`] produces for the current state.
    pub fn serialized_size(&self) -> usize {
        1 + 4 + 4 * N + 4 + self.entries.len() * InvertedFileEntry::<B>::RECORD_SIZE
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), InvertedFileError> {
        let num_entries = u32::try_from(self.entries.len()).map_err(|_| InvertedFileError::TooManyEntries(self.entries.len()))?;

        writer.write_u8(self.status.bits())?;
        writer.write_f32::<LittleEndian>(self.idf_weight)?;
        write_f32_array(writer, self.embedding.thresholds())?;
        writer.write_u32::<LittleEndian>(num_entries)?;
        for entry in self.entries.iter() {
            entry.write(writer)?;
        }
        Ok(())
    }

    /// Replace the state of this file with the record read from `reader`.
    ///
    /// The file is only modified once the whole record was decoded, on error it is left as it was.
    pub fn read<R: Read>(&mut self, reader: &mut R) -> Result<(), InvertedFileError> {
        let status = reader.read_u8().map_err(InvertedFileError::reading("status"))?;
        let idf_weight = reader.read_f32::<LittleEndian>().map_err(InvertedFileError::reading("idf weight"))?;
        let thresholds = read_f32_array::<R, N>(reader).map_err(InvertedFileError::reading("thresholds"))?;
        let num_entries = reader.read_u32::<LittleEndian>().map_err(InvertedFileError::reading("entry count"))?;

        // Don't trust the count for the allocation size, a corrupt file could claim billions.
        let mut entries: Vec<InvertedFileEntry<B>> = Vec::with_capacity((num_entries as usize).min(1 << 16));
        for index in 0..num_entries {
            let entry = InvertedFileEntry::<B>::read(reader)?;
            if entry.image_id < 0 {
                return Err(InvertedFileError::InvalidImageId { index, image_id: entry.image_id });
            }
            entries.push(entry);
        }

        self.status = Status::from_bits(status);
        self.idf_weight = idf_weight;
        self.embedding = HammingEmbedding::from_thresholds(thresholds);
        self.entries = entries;
        debug!("Read inverted file with {} entries, {}.", self.entries.len(), self.status);
        Ok(())
    }

    /// Atomically write this file alone to `path`.
    pub fn save(&self, path: &Path) -> Result<(), InvertedFileError> {
        atomic_save_with(path, |writer| self.write(writer).map_err(Into::into))?;
        debug!("Saved inverted file with {} entries to {:?}.", self.entries.len(), path);
        Ok(())
    }

    /// Read a file previously written by [`Self::save`].
    pub fn load(&mut self, path: &Path) -> Result<(), InvertedFileError> {
        let mut reader = open_buffered(path)?;
        self.read(&mut reader)
    }
}
