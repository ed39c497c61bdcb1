//! The extended device configuration stored in the MAC EEPROM.
//!
//! The firmware answers [`READ_CONFIGURATION`](crate::vreq::READ_CONFIGURATION)
//! with a 128-byte block that begins with the ASCII signature `CD0` and
//! describes the board, the FPGA, the on-board RAM and where the power-on
//! bitstream is stored in flash.

use core::fmt;

use crate::{
    decode::{Decode, DecodeError, DecodeErrorKind, FixedResponse},
    encode::{Encode, MessageEncoder},
    field::ZeroPadded,
};

mod bitstream;
mod board;
mod fpga;
mod ram;

pub use bitstream::{BitstreamLayout, SECTOR_SIZE, Sectors};
pub use board::{BoardIdentity, BoardType, BoardVersion};
pub use fpga::{FpgaIdentity, FpgaPackage, FpgaType};
pub use ram::{RamConfiguration, RamSize, RamType};

/// Signature at the start of every configuration block.
pub const CONFIGURATION_SIGNATURE: [u8; 3] = *b"CD0";

/// The decoded configuration block.
///
/// # Encoding
///
/// | Offset | Size | Field |
/// |--------|------|-------|
/// | 0      | 3    | signature, `"CD0"` |
/// | 3      | 1    | board type |
/// | 4      | 1    | board series |
/// | 5      | 1    | board number |
/// | 6      | 2    | board variant, zero-padded |
/// | 8      | 2    | FPGA type (`u16`) |
/// | 10     | 1    | FPGA package |
/// | 11     | 3    | FPGA grade, zero-padded |
/// | 14     | 1    | RAM size |
/// | 15     | 1    | RAM type |
/// | 16     | 10   | reserved |
/// | 26     | 2    | bitstream size in sectors (`u16`) |
/// | 28     | 2    | bitstream capacity in sectors (`u16`) |
/// | 30     | 2    | bitstream start sector (`u16`) |
/// | 32     | 96   | user data |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceConfiguration {
    pub board: BoardIdentity,
    pub fpga: FpgaIdentity,
    pub ram: RamConfiguration,
    pub bitstream: BitstreamLayout,
}

impl DeviceConfiguration {
    pub const SIZE: usize = 128;

    const BITSTREAM_OFFSET: usize = 26;
}

impl FixedResponse for DeviceConfiguration {
    const LENGTH: usize = Self::SIZE;
}

impl Decode for DeviceConfiguration {
    fn decode(data: &mut &[u8]) -> Result<Self, DecodeError> {
        let start = *data;

        let signature = <[u8; 3]>::decode(data)?;
        if signature != CONFIGURATION_SIGNATURE {
            return Err(DecodeError::new::<Self>(
                DecodeErrorKind::SignatureMismatch {
                    found: signature,
                    expected: CONFIGURATION_SIGNATURE,
                },
            ));
        }

        let board = BoardIdentity {
            board_type: BoardType::new(u8::decode(data)?),
            version: BoardVersion {
                series: u8::decode(data)?,
                number: u8::decode(data)?,
                variant: ZeroPadded::decode(data)?,
            },
        };
        let fpga = FpgaIdentity {
            fpga_type: FpgaType(u16::decode(data)?),
            package: FpgaPackage::new(u8::decode(data)?),
            grade: ZeroPadded::decode(data)?,
        };
        let ram = RamConfiguration {
            size: RamSize(u8::decode(data)?),
            ram_type: RamType(u8::decode(data)?),
        };

        let mut rest = start.get(Self::BITSTREAM_OFFSET..).ok_or_else(|| {
            DecodeError::new::<Self>(DecodeErrorKind::UnexpectedEnd)
        })?;
        let bitstream = BitstreamLayout {
            size: Sectors(u16::decode(&mut rest)?),
            capacity: Sectors(u16::decode(&mut rest)?),
            start: Sectors(u16::decode(&mut rest)?),
        };
        *data = rest;

        Ok(Self {
            board,
            fpga,
            ram,
            bitstream,
        })
    }
}

impl Encode for DeviceConfiguration {
    fn size(&self) -> usize {
        Self::SIZE
    }

    fn encode(&self, data: &mut [u8]) {
        let mut enc = MessageEncoder::new(data);

        enc.write(&CONFIGURATION_SIGNATURE);
        enc.write(&self.board.board_type.raw());
        enc.write(&self.board.version.series);
        enc.write(&self.board.version.number);
        enc.write(&self.board.version.variant);
        enc.write(&self.fpga.fpga_type.0);
        enc.write(&self.fpga.package.raw());
        enc.write(&self.fpga.grade);
        enc.write(&self.ram.size.0);
        enc.write(&self.ram.ram_type.0);

        enc.seek(Self::BITSTREAM_OFFSET);
        enc.write(&self.bitstream.size.0);
        enc.write(&self.bitstream.capacity.0);
        enc.write(&self.bitstream.start.0);
    }
}

impl fmt::Display for DeviceConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Board({}), FPGA({}), RAM({}), Bitstream({})",
            self.board, self.fpga, self.ram, self.bitstream
        )
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    /// Configuration block of a USB-FPGA Module 2.14b with an XC7A35T-2C.
    fn module_2_14b() -> [u8; 128] {
        let mut buf = [0u8; 128];
        buf[..16].copy_from_slice(&[
            b'C', b'D', b'0', // signature
            2, 2, 14, b'b', 0, // board type, series, number, variant
            8, 0, 3, b'2', b'C', 0, // fpga type, package, grade
            0x44, 10, // ram size, type
        ]);
        buf[26..32].copy_from_slice(&[0x55, 0x00, 0x00, 0x01, 0x00, 0x00]);
        // Trailing user data is not part of the decoded value.
        buf[100] = 0xAA;
        buf
    }

    #[test]
    fn decode() {
        let config = DeviceConfiguration::decode_response(&module_2_14b()).unwrap();

        assert_eq!(config.board.board_type, BoardType::Fx2);
        assert_eq!(config.board.version.to_string(), "2.14b");
        assert_eq!(config.board.version.variant.raw(), &[b'b', 0]);
        assert_eq!(config.fpga.fpga_type, FpgaType(8));
        assert_eq!(config.fpga.package, FpgaPackage::Csg484);
        assert_eq!(config.fpga.grade.to_string(), "2C");
        assert_eq!(config.ram.size.bytes(), 64 << 20);
        assert_eq!(config.bitstream.size, Sectors(0x55));
        assert_eq!(config.bitstream.capacity, Sectors(0x100));
        assert_eq!(config.bitstream.start, Sectors(0));
    }

    #[test]
    fn display() {
        let config = DeviceConfiguration::decode_response(&module_2_14b()).unwrap();

        assert_eq!(
            config.to_string(),
            "Board(Type(ZTEX USB-FPGA Module (Cypress CY7C68013A EZ-USB FX2)), Version(2.14b)), \
             FPGA(Type(XC7A35T [Xilinx Artix-7 XC7A35T]), Package(CSG484), Grade(2C)), \
             RAM(Size(64MiB (67108864B)), Type(DDR3-800 SDRAM)), \
             Bitstream(Size(340KiB (348160B)), Capacity(1MiB (1048576B)), Start(0B))"
        );
    }

    #[test]
    fn encode_reproduces_known_fields() {
        let mut expected = module_2_14b();
        expected[100] = 0;

        let config = DeviceConfiguration::decode_response(&module_2_14b()).unwrap();
        assert_eq!(config.to_bytes(), expected);
    }

    #[test]
    fn signature_mismatch() {
        let mut buf = module_2_14b();
        buf[2] = b'1';

        let err = DeviceConfiguration::decode_response(&buf).unwrap_err();
        assert_eq!(
            err.kind(),
            DecodeErrorKind::SignatureMismatch {
                found: *b"CD1",
                expected: *b"CD0",
            }
        );
    }

    #[test]
    fn wrong_length() {
        let err = DeviceConfiguration::decode_response(&[b'C', b'D', b'0']).unwrap_err();

        assert_eq!(
            err.kind(),
            DecodeErrorKind::MalformedLength {
                expected: 128,
                found: 3
            }
        );
    }
}
