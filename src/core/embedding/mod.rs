mod binary_code;
mod hamming_embedding;
mod median;

pub use binary_code::BinaryCode;
pub use hamming_embedding::HammingEmbedding;
pub use median::median;

/// Compile-time check tying the code width in bits (`N`) to its width in bytes (`B`).
pub(crate) struct CodeWidth<const N: usize, const B: usize>;

impl<const N: usize, const B: usize> CodeWidth<N, B> {
    pub(crate) const VALID: () = {
        assert!(N > 0, "Dimensionality of projected space needs to be > 0.");
        assert!(N % 8 == 0, "Dimensionality of projected space needs to be a multiple of 8.");
        assert!(B * 8 == N, "Binary code byte width must equal N / 8.");
    };
}
