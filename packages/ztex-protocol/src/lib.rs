//! Decoders for the vendor requests of ZTEX USB-FPGA modules.
//!
//! Every reply is a fixed-layout little-endian structure. Types that always
//! have the same length implement [`FixedResponse`], which checks the length
//! of the buffer returned by the control transfer before handing it to
//! [`Decode`]. Everything here is pure: no I/O happens in this crate.

#![no_std]

extern crate alloc;

pub mod capability;
pub mod config;
pub mod descriptor;
pub mod interface;
pub mod status;

mod decode;
mod encode;
mod field;
mod prefix;
mod request;

pub use capability::{Capability, CapabilitySet};
pub use config::DeviceConfiguration;
pub use decode::{Decode, DecodeError, DecodeErrorKind, FixedResponse, expect_length};
pub use descriptor::{DeviceDescriptor, ProductId};
pub use encode::{Encode, MessageEncoder};
pub use field::ZeroPadded;
pub use interface::{DefaultInterfaceInfo, HighSpeedEndpoints};
pub use prefix::{BinaryPrefix, binary_prefix};
pub use request::{ControlRequest, RequestType, vreq};
pub use status::{
    ConfiguredPolarity, FlashError, FlashSectorSize, FlashStatus, FpgaResult, FpgaStatus,
    ResultCodes, StatusConvention, StatusFlag,
};

/// ZTEX USB vendor ID.
pub const VENDOR_ID: u16 = 0x221A;

/// Standard ZTEX USB product ID.
pub const PRODUCT_ID: u16 = 0x0100;

/// Rendering used for values outside the known tables.
pub const UNKNOWN: &str = "Unknown";
