use std::fmt;
use std::ops::BitXor;

use crate::core::common::ops::load_u64_le;
use crate::HammingDistance;

/// Fixed-width binary string of `B * 8` bits.
///
/// Bit `i` lives in byte `i / 8` at position `i % 8`, so the byte array is exactly the
/// little-endian packing used on disk.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BinaryCode<const B: usize> {
    bytes: [u8; B],
}

impl<const B: usize> Default for BinaryCode<B> {
    fn default() -> Self {
        Self::zeros()
    }
}

impl<const B: usize> BinaryCode<B> {
    pub const BITS: usize = B * 8;

    pub fn zeros() -> Self {
        Self { bytes: [0u8; B] }
    }

    pub fn ones() -> Self {
        Self { bytes: [u8::MAX; B] }
    }

    pub fn from_bytes(bytes: [u8; B]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; B] {
        &self.bytes
    }

    pub fn bit(&self, index: usize) -> bool {
        (self.bytes[index / 8] >> (index % 8)) & 1 == 1
    }

    pub fn set_bit(&mut self, index: usize, value: bool) {
        let mask = 1u8 << (index % 8);
        if value {
            self.bytes[index / 8] |= mask;
        } else {
            self.bytes[index / 8] &= !mask;
        }
    }

    /// Population count, 64 bits at a time.
    pub fn count_ones(&self) -> usize {
        let words = self.bytes.chunks_exact(8);
        let tail: usize = words.remainder().iter().map(|b| b.count_ones() as usize).sum();
        words.map(|w| load_u64_le(w).count_ones() as usize).sum::<usize>() + tail
    }

    /// Popcount of the XOR of both codes, without materialising the XOR.
    pub fn hamming_distance(&self, other: &Self) -> HammingDistance {
        let mut lhs = self.bytes.chunks_exact(8);
        let mut rhs = other.bytes.chunks_exact(8);
        let mut distance = 0;
        for (l, r) in lhs.by_ref().zip(rhs.by_ref()) {
            distance += (load_u64_le(l) ^ load_u64_le(r)).count_ones() as usize;
        }
        for (l, r) in lhs.remainder().iter().zip(rhs.remainder()) {
            distance += (l ^ r).count_ones() as usize;
        }
        distance
    }
}

impl<const B: usize> BitXor for BinaryCode<B> {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self::Output {
        let mut bytes = self.bytes;
        for (byte, other) in bytes.iter_mut().zip(rhs.bytes.iter()) {
            *byte ^= other;
        }
        Self { bytes }
    }
}

impl<const B: usize> fmt::Display for BinaryCode<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Most significant byte first, like printing the packed integer.
        for byte in self.bytes.iter().rev() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl<const B: usize> fmt::Debug for BinaryCode<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BinaryCode<{}>(0x{})", Self::BITS, self)
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    fn random_code<const B: usize>() -> BinaryCode<B> {
        let mut rng = rand::thread_rng();
        let mut bytes = [0u8; B];
        rng.fill(&mut bytes[..]);
        BinaryCode::from_bytes(bytes)
    }

    fn naive_distance<const B: usize>(l: &BinaryCode<B>, r: &BinaryCode<B>) -> usize {
        (0..BinaryCode::<B>::BITS).filter(|&i| l.bit(i) != r.bit(i)).count()
    }

    #[test]
    fn test_set_and_get_bit() {
        let mut code = BinaryCode::<2>::zeros();
        code.set_bit(0, true);
        code.set_bit(9, true);
        code.set_bit(15, true);
        assert_eq!(code.as_bytes(), &[0b0000_0001, 0b1000_0010]);
        assert!(code.bit(9));
        assert!(!code.bit(8));

        code.set_bit(9, false);
        assert_eq!(code.as_bytes(), &[0b0000_0001, 0b1000_0000]);
        assert_eq!(code.count_ones(), 2);
    }

    #[test]
    fn test_hamming_distance_extremes() {
        assert_eq!(BinaryCode::<1>::zeros().hamming_distance(&BinaryCode::ones()), 8);
        assert_eq!(BinaryCode::<8>::zeros().hamming_distance(&BinaryCode::ones()), 64);
        assert_eq!(BinaryCode::<12>::ones().hamming_distance(&BinaryCode::ones()), 0);
        assert_eq!(BinaryCode::<12>::zeros().hamming_distance(&BinaryCode::ones()), 96);
    }

    #[test]
    fn test_hamming_distance_matches_bitwise() {
        for _ in 0..64 {
            let (a, b) = (random_code::<4>(), random_code::<4>());
            assert_eq!(a.hamming_distance(&b), naive_distance(&a, &b));
            assert_eq!(a.hamming_distance(&b), (a ^ b).count_ones());

            let (a, b) = (random_code::<20>(), random_code::<20>());
            assert_eq!(a.hamming_distance(&b), naive_distance(&a, &b));
            assert_eq!(a.hamming_distance(&b), b.hamming_distance(&a));
        }
    }

    #[test]
    fn test_display() {
        let code = BinaryCode::from_bytes([0x01, 0xab]);
        assert_eq!(code.to_string(), "ab01");
        assert_eq!(format!("{:?}", code), "BinaryCode<16>(0xab01)");
    }
}
