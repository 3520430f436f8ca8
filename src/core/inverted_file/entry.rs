use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::core::common::ops::read_byte_array;
use crate::core::{BinaryCode, InvertedFileError};
use crate::ImageId;

/// One indexed feature: the image it came from and its binary code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InvertedFileEntry<const B: usize> {
    pub image_id: ImageId,
    pub code: BinaryCode<B>,
}

impl<const B: usize> std::fmt::Display for InvertedFileEntry<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(image_id: {}, code: {})", self.image_id, self.code)
    }
}

impl<const B: usize> InvertedFileEntry<B> {
    /// `image_id: i32 LE` followed by `B` packed code bytes.
    pub const RECORD_SIZE: usize = std::mem::size_of::<ImageId>() + B;

    pub fn new(image_id: ImageId, code: BinaryCode<B>) -> Self {
        Self { image_id, code }
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), InvertedFileError> {
        writer.write_i32::<LittleEndian>(self.image_id)?;
        writer.write_all(self.code.as_bytes())?;
        Ok(())
    }

    pub fn read<R: Read>(reader: &mut R) -> Result<Self, InvertedFileError> {
        let image_id = reader.read_i32::<LittleEndian>().map_err(InvertedFileError::reading("entry image id"))?;
        let bytes = read_byte_array::<R, B>(reader).map_err(InvertedFileError::reading("entry code"))?;
        Ok(Self { image_id, code: BinaryCode::from_bytes(bytes) })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_record_layout() {
        let entry = InvertedFileEntry::<8>::new(0x0102_0304, BinaryCode::from_bytes([1, 2, 3, 4, 5, 6, 7, 0x80]));
        let mut buffer: Vec<u8> = Vec::new();
        entry.write(&mut buffer).unwrap();

        assert_eq!(buffer.len(), InvertedFileEntry::<8>::RECORD_SIZE);
        assert_eq!(buffer, vec![0x04, 0x03, 0x02, 0x01, 1, 2, 3, 4, 5, 6, 7, 0x80]);

        // A 64-bit code is the little-endian packing of the bitset as one integer.
        assert_eq!(u64::from_le_bytes(buffer[4..].try_into().unwrap()), 0x8007_0605_0403_0201);

        let decoded = InvertedFileEntry::<8>::read(&mut Cursor::new(buffer)).unwrap();
        assert_eq!(decoded, entry);
    }

    #[test]
    fn test_read_truncated_record() {
        let bytes: Vec<u8> = vec![0x07, 0x00, 0x00, 0x00, 0xff];
        let result = InvertedFileEntry::<2>::read(&mut Cursor::new(bytes));
        assert!(matches!(result, Err(InvertedFileError::Truncated("entry code"))));
    }
}
