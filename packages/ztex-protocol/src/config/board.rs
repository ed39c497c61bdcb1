use core::fmt;

use crate::{UNKNOWN, field::ZeroPadded};

/// The carrier board family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoardType {
    /// Generic ZTEX FPGA module.
    FpgaModule,
    /// USB-FPGA module built around a Cypress CY7C68013A EZ-USB FX2.
    Fx2,
    /// USB3-FPGA module built around a Cypress CYUSB3033 EZ-USB FX3S.
    Fx3,
    Unknown(u8),
}

impl BoardType {
    pub const fn new(raw: u8) -> Self {
        match raw {
            1 => Self::FpgaModule,
            2 => Self::Fx2,
            3 => Self::Fx3,
            v => Self::Unknown(v),
        }
    }

    pub const fn raw(self) -> u8 {
        match self {
            Self::FpgaModule => 1,
            Self::Fx2 => 2,
            Self::Fx3 => 3,
            Self::Unknown(v) => v,
        }
    }
}

impl fmt::Display for BoardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FpgaModule => "ZTEX FPGA Module",
            Self::Fx2 => "ZTEX USB-FPGA Module (Cypress CY7C68013A EZ-USB FX2)",
            Self::Fx3 => "ZTEX USB3-FPGA Module (Cypress CYUSB3033 EZ-USB FX3S)",
            Self::Unknown(_) => UNKNOWN,
        })
    }
}

/// Series, number and variant of a module, e.g. `2.14b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardVersion {
    /// Board generation. Only series 1 and 2 exist.
    pub series: u8,
    /// Board within the series; 255 means not programmed.
    pub number: u8,
    pub variant: ZeroPadded<2>,
}

impl fmt::Display for BoardVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.series {
            1 | 2 => write!(f, "{}", self.series)?,
            _ => f.write_str(UNKNOWN)?,
        }
        f.write_str(".")?;
        match self.number {
            255 => f.write_str(UNKNOWN)?,
            n => write!(f, "{n}")?,
        }
        write!(f, "{}", self.variant)
    }
}

/// The board section of the device configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardIdentity {
    pub board_type: BoardType,
    pub version: BoardVersion,
}

impl fmt::Display for BoardIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type({}), Version({})", self.board_type, self.version)
    }
}
