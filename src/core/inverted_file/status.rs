use std::fmt;

/// Status byte of an inverted file, persisted verbatim as the first byte of the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Status(u8);

impl Status {
    pub const UNUSABLE: Status = Status(0x00);
    pub const HAS_HAMMING_EMBEDDING: Status = Status(0x01);
    pub const ENTRIES_SORTED: Status = Status(0x02);
    pub const USABLE: Status = Status(0x03);

    pub fn from_bits(bits: u8) -> Self {
        Status(bits)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, other: Status) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Status) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Status) {
        self.0 &= !other.0;
    }

    /// Both the embedding is learned and the entries are sorted.
    pub fn is_usable(self) -> bool {
        self.contains(Status::USABLE)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Status[embedding: {}, sorted: {}]",
            self.contains(Status::HAS_HAMMING_EMBEDDING),
            self.contains(Status::ENTRIES_SORTED)
        )
    }
}
