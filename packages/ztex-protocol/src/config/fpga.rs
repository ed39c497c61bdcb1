use core::fmt;

use crate::{UNKNOWN, field::ZeroPadded};

/// The FPGA part fitted to the module, stored as a little-endian `u16`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FpgaType(pub u16);

impl FpgaType {
    /// Part name and long description, or `None` for unknown codes.
    pub const fn part(self) -> Option<(&'static str, &'static str)> {
        Some(match self.0 {
            1 => ("XC6SLX9", "Xilinx Spartan-6 XC6SLX9"),
            2 => ("XC6SLX16", "Xilinx Spartan-6 XC6SLX16"),
            3 => ("XC6SLX25", "Xilinx Spartan-6 XC6SLX25"),
            4 => ("XC6SLX45", "Xilinx Spartan-6 XC6SLX45"),
            5 => ("XC6SLX75", "Xilinx Spartan-6 XC6SLX75"),
            6 => ("XC6SLX100", "Xilinx Spartan-6 XC6SLX100"),
            7 => ("XC6SLX150", "Xilinx Spartan-6 XC6SLX150"),
            8 => ("XC7A35T", "Xilinx Artix-7 XC7A35T"),
            9 => ("XC7A50T", "Xilinx Artix-7 XC7A50T"),
            10 => ("XC7A75T", "Xilinx Artix-7 XC7A75T"),
            11 => ("XC7A100T", "Xilinx Artix-7 XC7A100T"),
            12 => ("XC7A200T", "Xilinx Artix-7 XC7A200T"),
            13 => ("XC6SLX150", "Xilinx Spartan-6 XC6SLX150 x 4"),
            14 => ("XC7A15T", "Xilinx Artix-7 XC7A15T"),
            _ => return None,
        })
    }
}

impl fmt::Display for FpgaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.part() {
            Some((name, description)) => write!(f, "{name} [{description}]"),
            None => f.write_str(UNKNOWN),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FpgaPackage {
    Ftg256,
    Csg324,
    Csg484,
    Fbg484,
    Unknown(u8),
}

impl FpgaPackage {
    pub const fn new(raw: u8) -> Self {
        match raw {
            1 => Self::Ftg256,
            2 => Self::Csg324,
            3 => Self::Csg484,
            4 => Self::Fbg484,
            v => Self::Unknown(v),
        }
    }

    pub const fn raw(self) -> u8 {
        match self {
            Self::Ftg256 => 1,
            Self::Csg324 => 2,
            Self::Csg484 => 3,
            Self::Fbg484 => 4,
            Self::Unknown(v) => v,
        }
    }
}

impl fmt::Display for FpgaPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ftg256 => "FTG256",
            Self::Csg324 => "CSG324",
            Self::Csg484 => "CSG484",
            Self::Fbg484 => "FBG484",
            Self::Unknown(_) => UNKNOWN,
        })
    }
}

/// Part, package and speed grade of the FPGA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FpgaIdentity {
    pub fpga_type: FpgaType,
    pub package: FpgaPackage,
    /// Speed grade, voltage and temperature range suffix, e.g. `2C` or `3LI`.
    pub grade: ZeroPadded<3>,
}

impl fmt::Display for FpgaIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Type({}), Package({}), Grade({})",
            self.fpga_type, self.package, self.grade
        )
    }
}
