use core::fmt;

use crate::{UNKNOWN, prefix::BinaryPrefix};

/// Encoded RAM capacity.
///
/// The high nibble is a mantissa kept in place (`b & 0xF0`) and the low
/// nibble an exponent offset by 16, so the capacity in bytes is
/// `(b & 0xF0) << ((b & 0x0F) + 16)`. A value of zero means no RAM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RamSize(pub u8);

impl RamSize {
    /// Capacity in bytes.
    pub const fn bytes(self) -> u64 {
        ((self.0 & 0xF0) as u64) << ((self.0 & 0x0F) as u32 + 16)
    }
}

impl fmt::Display for RamSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", BinaryPrefix::new(self.bytes(), "B"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RamType(pub u8);

impl RamType {
    pub const fn name(self) -> Option<&'static str> {
        Some(match self.0 {
            1 => "DDR-200 SDRAM",
            2 => "DDR-266 SDRAM",
            3 => "DDR-333 SDRAM",
            4 => "DDR-400 SDRAM",
            5 => "DDR2-400 SDRAM",
            6 => "DDR2-533 SDRAM",
            7 => "DDR2-667 SDRAM",
            8 => "DDR2-800 SDRAM",
            9 => "DDR2-1066 SDRAM",
            10 => "DDR3-800 SDRAM",
            _ => return None,
        })
    }
}

impl fmt::Display for RamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or(UNKNOWN))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RamConfiguration {
    pub size: RamSize,
    pub ram_type: RamType,
}

impl fmt::Display for RamConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Size({}), Type({})", self.size, self.ram_type)
    }
}
