//! Capability flags advertised in the device descriptor.

use core::fmt;

use crate::{
    decode::{Decode, DecodeError},
    encode::Encode,
};

/// A feature a ZTEX firmware may advertise.
///
/// Each capability is identified by a fixed `(byte, bit)` position in the
/// descriptor's capability field. Positions are never reused, so new
/// capabilities are only ever appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Capability {
    /// EEPROM support.
    Eeprom,
    /// Basic FPGA configuration.
    FpgaConfiguration,
    /// Flash memory support.
    FlashMemory,
    /// Basic debug helper.
    DebugHelper,
    /// ATxmega auxiliary microcontroller support.
    Xmega,
    /// High-speed FPGA configuration over a bulk endpoint.
    HighSpeedFpgaConfiguration,
    /// MAC EEPROM support.
    MacEeprom,
    /// Multi-FPGA support.
    MultiFpga,
    /// Temperature sensor support.
    TemperatureSensor,
    /// Advanced flash memory support.
    FlashMemory2,
    /// Cypress FX3 firmware support.
    Fx3Firmware,
    /// Advanced debug helper.
    DebugHelper2,
    /// Default firmware interface.
    DefaultFirmware,
}

impl Capability {
    /// Every known capability, in bit order.
    pub const ALL: [Capability; 13] = [
        Self::Eeprom,
        Self::FpgaConfiguration,
        Self::FlashMemory,
        Self::DebugHelper,
        Self::Xmega,
        Self::HighSpeedFpgaConfiguration,
        Self::MacEeprom,
        Self::MultiFpga,
        Self::TemperatureSensor,
        Self::FlashMemory2,
        Self::Fx3Firmware,
        Self::DebugHelper2,
        Self::DefaultFirmware,
    ];

    /// Returns the `(byte, bit)` position of this capability.
    pub const fn position(self) -> (usize, u8) {
        match self {
            Self::Eeprom => (0, 0),
            Self::FpgaConfiguration => (0, 1),
            Self::FlashMemory => (0, 2),
            Self::DebugHelper => (0, 3),
            Self::Xmega => (0, 4),
            Self::HighSpeedFpgaConfiguration => (0, 5),
            Self::MacEeprom => (0, 6),
            Self::MultiFpga => (0, 7),
            Self::TemperatureSensor => (1, 0),
            Self::FlashMemory2 => (1, 1),
            Self::Fx3Firmware => (1, 2),
            Self::DebugHelper2 => (1, 3),
            Self::DefaultFirmware => (1, 4),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Eeprom => "EEPROM",
            Self::FpgaConfiguration => "FPGA Configuration",
            Self::FlashMemory => "Flash Memory",
            Self::DebugHelper => "Debug Helper",
            Self::Xmega => "XMEGA",
            Self::HighSpeedFpgaConfiguration => "High Speed FPGA Configuration",
            Self::MacEeprom => "MAC EEPROM",
            Self::MultiFpga => "MultiFPGA",
            Self::TemperatureSensor => "Temperature Sensor",
            Self::FlashMemory2 => "Flash Memory 2",
            Self::Fx3Firmware => "FX3 Firmware",
            Self::DebugHelper2 => "Debug Helper 2",
            Self::DefaultFirmware => "Default Firmware",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The raw capability field of a device descriptor.
///
/// # Encoding
///
/// Six bytes; capability `(i, j)` is set when bit `j` of byte `i` is one.
/// Only the first two bytes carry known capabilities, the rest are kept
/// verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CapabilitySet([u8; CAPABILITY_BYTES]);

const CAPABILITY_BYTES: usize = 6;

impl CapabilitySet {
    pub const SIZE: usize = CAPABILITY_BYTES;

    pub const fn from_bytes(bytes: [u8; Self::SIZE]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; Self::SIZE] {
        &self.0
    }

    /// Returns `true` if the device advertises `capability`.
    pub const fn has(&self, capability: Capability) -> bool {
        let (byte, bit) = capability.position();
        self.0[byte] & (1 << bit) != 0
    }

    /// Returns a copy of this set with `capability` set.
    #[must_use]
    pub const fn with(mut self, capability: Capability) -> Self {
        let (byte, bit) = capability.position();
        self.0[byte] |= 1 << bit;
        self
    }

    /// Iterates over the known capabilities present in this set.
    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        Capability::ALL.into_iter().filter(|&c| self.has(c))
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        iter.into_iter().fold(Self::default(), Self::with)
    }
}

impl fmt::Display for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, capability) in Capability::ALL.into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}({})", capability, self.has(capability))?;
        }

        Ok(())
    }
}

impl Encode for CapabilitySet {
    fn size(&self) -> usize {
        Self::SIZE
    }

    fn encode(&self, data: &mut [u8]) {
        self.0.encode(data)
    }
}

impl Decode for CapabilitySet {
    fn decode(data: &mut &[u8]) -> Result<Self, DecodeError> {
        Ok(Self(<[u8; Self::SIZE]>::decode(data)?))
    }
}
