//! Vendor control requests understood by ZTEX firmware.

use bitflags::bitflags;

/// Vendor request codes.
///
/// Requests marked VR return data, those marked VC are commands without a
/// data stage. This module is non-exhaustive.
pub mod vreq {
    /// VR 0x22: read the ZTEX descriptor.
    pub const READ_DESCRIPTOR: u8 = 0x22;
    /// VR 0x30: get FPGA state.
    pub const FPGA_STATUS: u8 = 0x30;
    /// VC 0x31: reset FPGA.
    pub const RESET_FPGA: u8 = 0x31;
    /// VR 0x33: read high-speed FPGA configuration endpoint settings.
    pub const HS_CONFIG_SETTINGS: u8 = 0x33;
    /// VR 0x3B: read from MAC EEPROM. The first 128 bytes hold the device configuration.
    pub const READ_CONFIGURATION: u8 = 0x3B;
    /// VR 0x40: get flash state.
    pub const FLASH_STATUS: u8 = 0x40;
    /// VC 0x60: reset the default firmware interface.
    pub const RESET_DEFAULT_FIRMWARE: u8 = 0x60;
    /// VR 0x64: default firmware interface information.
    pub const DEFAULT_INTERFACE_INFO: u8 = 0x64;
    /// VC 0xA1: FX3 controller control. Value 1 resets and boots from flash.
    pub const FX3_CONTROL: u8 = 0xA1;
}

bitflags! {
    /// The `bmRequestType` field of a USB setup packet.
    #[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct RequestType: u8 {
        /// Bit 7 is set for device-to-host transfers.
        const DEVICE_TO_HOST = 1 << 7;
        /// Bits 5..6 select the request type; `0b10` is vendor.
        const VENDOR = 1 << 6;
    }
}

impl RequestType {
    /// Vendor request reading data from the device (`0xC0`).
    pub const VENDOR_IN: Self = Self::DEVICE_TO_HOST.union(Self::VENDOR);
    /// Vendor request without a data stage or writing to the device (`0x40`).
    pub const VENDOR_OUT: Self = Self::VENDOR;

    pub const fn is_in(self) -> bool {
        self.contains(Self::DEVICE_TO_HOST)
    }
}

/// A single control transfer, described independently of any USB stack.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlRequest {
    pub request_type: RequestType,
    pub request: u8,
    pub value: u16,
    pub index: u16,
    /// Number of bytes requested from the device; zero for commands.
    pub length: u16,
}

impl ControlRequest {
    /// A vendor read of `length` bytes.
    pub const fn read(request: u8, length: u16) -> Self {
        Self {
            request_type: RequestType::VENDOR_IN,
            request,
            value: 0,
            index: 0,
            length,
        }
    }

    /// A vendor command without a data stage.
    pub const fn command(request: u8, value: u16) -> Self {
        Self {
            request_type: RequestType::VENDOR_OUT,
            request,
            value,
            index: 0,
            length: 0,
        }
    }

    pub const READ_DESCRIPTOR: Self = Self::read(vreq::READ_DESCRIPTOR, 40);
    pub const READ_CONFIGURATION: Self = Self::read(vreq::READ_CONFIGURATION, 128);
    pub const FPGA_STATUS: Self = Self::read(vreq::FPGA_STATUS, 9);
    pub const FLASH_STATUS: Self = Self::read(vreq::FLASH_STATUS, 8);
    pub const HS_CONFIG_SETTINGS: Self = Self::read(vreq::HS_CONFIG_SETTINGS, 2);
    pub const DEFAULT_INTERFACE_INFO: Self = Self::read(vreq::DEFAULT_INTERFACE_INFO, 4);
    pub const RESET_FPGA: Self = Self::command(vreq::RESET_FPGA, 0);
    pub const RESET_FX3: Self = Self::command(vreq::FX3_CONTROL, 1);
    pub const RESET_DEFAULT_FIRMWARE: Self = Self::command(vreq::RESET_DEFAULT_FIRMWARE, 0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_type_bytes() {
        assert_eq!(RequestType::VENDOR_IN.bits(), 0xC0);
        assert_eq!(RequestType::VENDOR_OUT.bits(), 0x40);
        assert!(ControlRequest::FPGA_STATUS.request_type.is_in());
        assert!(!ControlRequest::RESET_FPGA.request_type.is_in());
    }

    #[test]
    fn fx3_reset_uses_value_one() {
        let req = ControlRequest::RESET_FX3;

        assert_eq!(req.request, 0xA1);
        assert_eq!(req.value, 1);
        assert_eq!(req.index, 0);
        assert_eq!(req.length, 0);
    }
}
