/// Identifier of an indexed database image. Stored on disk as a 4-byte signed integer,
/// only non-negative values are valid.
pub type ImageId = i32;

pub type ScoreType = f32;

/// Number of differing bits between two binary codes.
pub type HammingDistance = usize;
