use core::fmt;

use crate::prefix::BinaryPrefix;

/// Size of the flash sectors used to address bitstreams.
pub const SECTOR_SIZE: u64 = 4096;
const SECTOR_SHIFT: u32 = 12;

/// A length or offset in the flash, counted in 4 KiB sectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sectors(pub u16);

impl Sectors {
    pub const fn bytes(self) -> u64 {
        (self.0 as u64) << SECTOR_SHIFT
    }
}

impl fmt::Display for Sectors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", BinaryPrefix::new(self.bytes(), "B"))
    }
}

/// Where the power-on bitstream lives in flash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BitstreamLayout {
    /// Actual size of the stored bitstream.
    pub size: Sectors,
    /// Space reserved for the bitstream.
    pub capacity: Sectors,
    /// Offset of the first sector of the bitstream.
    pub start: Sectors,
}

impl BitstreamLayout {
    /// Whether a bitstream is stored at all.
    pub const fn is_empty(&self) -> bool {
        self.size.0 == 0
    }
}

impl fmt::Display for BitstreamLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Size({}), Capacity({}), Start({})",
            self.size, self.capacity, self.start
        )
    }
}
