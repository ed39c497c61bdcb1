//! The ZTEX device descriptor.

use core::fmt;

use crate::{
    UNKNOWN,
    capability::CapabilitySet,
    decode::{Decode, DecodeError, DecodeErrorKind, FixedResponse},
    encode::{Encode, MessageEncoder},
    field::ZeroPadded,
};

/// Magic bytes carried by every ZTEX firmware.
pub const DESCRIPTOR_MAGIC: [u8; 4] = *b"ZTEX";

/// A ZTEX product identifier.
///
/// The four bytes form a dotted identifier (`10.14.0.0`). The first two
/// bytes select a product family; a few families are further split on the
/// third and fourth byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProductId(pub [u8; 4]);

impl ProductId {
    /// Name of the product family, as matched against the known product table.
    pub const fn name(&self) -> &'static str {
        match self.0 {
            [0, 0, 0, 0] => "Default",
            [1, ..] => "Experimental",
            [10, 0, 1, 1] => "ZTEX BTCMiner",
            [10, 11, ..] => "ZTEX USB-FPGA Module 1.2",
            [10, 12, 2, 1..=4] => "NIT",
            [10, 12, ..] => "ZTEX USB-FPGA Module 1.11",
            [10, 13, ..] => "ZTEX USB-FPGA Module 1.15",
            [10, 14, ..] => "ZTEX USB-FPGA Module 1.15x",
            [10, 15, ..] => "ZTEX USB-FPGA Module 1.15y",
            [10, 16, ..] => "ZTEX USB-FPGA Module 2.16",
            [10, 17, ..] => "ZTEX USB-FPGA Module 2.13",
            [10, 18, ..] => "ZTEX USB-FPGA Module 2.01",
            [10, 19, ..] => "ZTEX USB-FPGA Module 2.04",
            [10, 20, ..] => "ZTEX USB Module 1.0",
            [10, 30, ..] => "ZTEX USB-XMEGA Module 1.0",
            [10, 40, ..] => "ZTEX USB-FPGA Module 2.02",
            [10, 41, ..] => "ZTEX USB-FPGA Module 2.14",
            [10, 42, ..] => "ZTEX USB3-FPGA Module 2.18",
            [10, ..] => "ZTEX",
            _ => UNKNOWN,
        }
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "{a}.{b}.{c}.{d} [{}]", self.name())
    }
}

/// The 40-byte ZTEX descriptor, read with [`READ_DESCRIPTOR`](crate::vreq::READ_DESCRIPTOR).
///
/// # Encoding
///
/// | Offset | Size | Field |
/// |--------|------|-------|
/// | 0      | 1    | `size`, always 40 |
/// | 1      | 1    | `version`, always 1 |
/// | 2      | 4    | `magic`, `"ZTEX"` |
/// | 6      | 4    | `product` |
/// | 10     | 1    | `firmware_version` |
/// | 11     | 1    | `interface_version` |
/// | 12     | 6    | `capabilities` |
/// | 18     | 12   | `module`, product specific |
/// | 30     | 10   | `serial`, zero-padded ASCII |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceDescriptor {
    pub magic: [u8; 4],
    pub product: ProductId,
    pub firmware_version: u8,
    pub interface_version: u8,
    pub capabilities: CapabilitySet,
    pub module: [u8; 12],
    pub serial: ZeroPadded<10>,
}

impl DeviceDescriptor {
    pub const SIZE: u8 = 40;
    pub const VERSION: u8 = 1;

    /// Whether the magic field reads `"ZTEX"`.
    pub fn has_ztex_magic(&self) -> bool {
        self.magic == DESCRIPTOR_MAGIC
    }
}

impl FixedResponse for DeviceDescriptor {
    const LENGTH: usize = Self::SIZE as usize;
}

impl Decode for DeviceDescriptor {
    fn decode(data: &mut &[u8]) -> Result<Self, DecodeError> {
        let size = u8::decode(data)?;
        if size != Self::SIZE {
            return Err(DecodeError::new::<Self>(DecodeErrorKind::MalformedHeader {
                name: "size",
                value: size,
                expected: &[Self::SIZE],
            }));
        }

        let version = u8::decode(data)?;
        if version != Self::VERSION {
            return Err(DecodeError::new::<Self>(DecodeErrorKind::MalformedHeader {
                name: "version",
                value: version,
                expected: &[Self::VERSION],
            }));
        }

        Ok(Self {
            magic: Decode::decode(data)?,
            product: ProductId(Decode::decode(data)?),
            firmware_version: u8::decode(data)?,
            interface_version: u8::decode(data)?,
            capabilities: CapabilitySet::decode(data)?,
            module: Decode::decode(data)?,
            serial: ZeroPadded::decode(data)?,
        })
    }
}

impl Encode for DeviceDescriptor {
    fn size(&self) -> usize {
        Self::SIZE as usize
    }

    fn encode(&self, data: &mut [u8]) {
        let mut enc = MessageEncoder::new(data);

        enc.write(&Self::SIZE);
        enc.write(&Self::VERSION);
        enc.write(&self.magic);
        enc.write(&self.product.0);
        enc.write(&self.firmware_version);
        enc.write(&self.interface_version);
        enc.write(&self.capabilities);
        enc.write(&self.module);
        enc.write(&self.serial);
    }
}

impl fmt::Display for DeviceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Size({}), Version({}), Magic({}), Product({}), Firmware({}), Interface({}), Capability({}), Module({:?}), Serial({})",
            Self::SIZE,
            Self::VERSION,
            self.magic.escape_ascii(),
            self.product,
            self.firmware_version,
            self.interface_version,
            self.capabilities,
            self.module,
            self.serial,
        )
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;
    use crate::capability::Capability;

    /// A descriptor as returned by a USB-FPGA Module 2.14 running the default firmware.
    const MODULE_2_14: [u8; 40] = [
        40, 1, b'Z', b'T', b'E', b'X', // size, version, magic
        10, 41, 0, 0, // product
        1, 1, // firmware, interface
        0b0100_0111, 0b0001_0000, 0, 0, 0, 0, // capabilities
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // module
        b'0', b'4', b'A', b'3', b'2', b'B', b'F', b'0', b'1', 0, // serial
    ];

    #[test]
    fn decode() {
        let desc = DeviceDescriptor::decode_response(&MODULE_2_14).unwrap();

        assert!(desc.has_ztex_magic());
        assert_eq!(desc.product.name(), "ZTEX USB-FPGA Module 2.14");
        assert_eq!(desc.firmware_version, 1);
        assert_eq!(desc.interface_version, 1);
        assert!(desc.capabilities.has(Capability::Eeprom));
        assert!(desc.capabilities.has(Capability::FpgaConfiguration));
        assert!(desc.capabilities.has(Capability::FlashMemory));
        assert!(desc.capabilities.has(Capability::MacEeprom));
        assert!(desc.capabilities.has(Capability::DefaultFirmware));
        assert!(!desc.capabilities.has(Capability::Fx3Firmware));
        assert_eq!(desc.serial.to_string(), "04A32BF01");
    }

    #[test]
    fn raw_fields_round_trip() {
        let mut buf = MODULE_2_14;
        // Garbage past the serial's terminator and in reserved capability bytes must survive.
        buf[38] = 0;
        buf[39] = 0x7E;
        buf[17] = 0xA5;
        buf[20] = 0x42;

        let desc = DeviceDescriptor::decode_response(&buf).unwrap();
        assert_eq!(desc.to_bytes(), buf);
    }

    #[test]
    fn wrong_length() {
        let err = DeviceDescriptor::decode_response(&MODULE_2_14[..39]).unwrap_err();

        assert_eq!(
            err.kind(),
            DecodeErrorKind::MalformedLength {
                expected: 40,
                found: 39
            }
        );
    }

    #[test]
    fn wrong_size_field() {
        let mut buf = MODULE_2_14;
        buf[0] = 41;

        let err = DeviceDescriptor::decode_response(&buf).unwrap_err();
        assert!(matches!(
            err.kind(),
            DecodeErrorKind::MalformedHeader {
                name: "size",
                value: 41,
                ..
            }
        ));
    }

    #[test]
    fn unsupported_version() {
        let mut buf = MODULE_2_14;
        buf[1] = 2;

        let err = DeviceDescriptor::decode_response(&buf).unwrap_err();
        assert!(matches!(
            err.kind(),
            DecodeErrorKind::MalformedHeader {
                name: "version",
                value: 2,
                ..
            }
        ));
    }

    #[test]
    fn product_names() {
        let cases: &[([u8; 4], &str)] = &[
            ([0, 0, 0, 0], "Default"),
            ([1, 2, 3, 4], "Experimental"),
            ([10, 0, 1, 1], "ZTEX BTCMiner"),
            ([10, 0, 1, 2], "ZTEX"),
            ([10, 12, 2, 1], "NIT"),
            ([10, 12, 2, 4], "NIT"),
            ([10, 12, 2, 5], "ZTEX USB-FPGA Module 1.11"),
            ([10, 12, 0, 0], "ZTEX USB-FPGA Module 1.11"),
            ([10, 15, 0, 0], "ZTEX USB-FPGA Module 1.15y"),
            ([10, 30, 0, 0], "ZTEX USB-XMEGA Module 1.0"),
            ([10, 42, 0, 0], "ZTEX USB3-FPGA Module 2.18"),
            ([10, 99, 0, 0], "ZTEX"),
            ([0, 0, 0, 1], "Unknown"),
            ([11, 14, 0, 0], "Unknown"),
        ];

        for (id, name) in cases {
            assert_eq!(ProductId(*id).name(), *name, "product {id:?}");
        }
    }

    #[test]
    fn product_display() {
        assert_eq!(
            ProductId([10, 14, 0, 0]).to_string(),
            "10.14.0.0 [ZTEX USB-FPGA Module 1.15x]"
        );
    }
}
