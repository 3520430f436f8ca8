use std::io::{self, Read, Write};

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt, WriteBytesExt};

/// Write a fixed-size `f32` array as consecutive little-endian values.
pub fn write_f32_array<W: Write, const N: usize>(writer: &mut W, values: &[f32; N]) -> io::Result<()> {
    for &value in values.iter() {
        writer.write_f32::<LittleEndian>(value)?;
    }
    Ok(())
}

/// Read `N` consecutive little-endian `f32` values.
pub fn read_f32_array<R: Read, const N: usize>(reader: &mut R) -> io::Result<[f32; N]> {
    let mut values = [0.0f32; N];
    reader.read_f32_into::<LittleEndian>(&mut values)?;
    Ok(values)
}

/// Read exactly `B` raw bytes.
pub fn read_byte_array<R: Read, const B: usize>(reader: &mut R) -> io::Result<[u8; B]> {
    let mut bytes = [0u8; B];
    reader.read_exact(&mut bytes)?;
    Ok(bytes)
}

/// Load a little-endian `u64` from the first 8 bytes of `bytes`.
#[inline]
pub fn load_u64_le(bytes: &[u8]) -> u64 {
    LittleEndian::read_u64(bytes)
}
