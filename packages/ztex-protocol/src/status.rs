//! FPGA and flash status replies.

use core::fmt;

use crate::{
    decode::{Decode, DecodeError, FixedResponse, expect_length},
    encode::{Encode, MessageEncoder},
    UNKNOWN,
    prefix::BinaryPrefix,
};

/// Which raw value of the "configured" byte means the FPGA is configured.
///
/// Firmware revisions disagree on this, so it is never assumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConfiguredPolarity {
    /// A non-zero byte means configured.
    ActiveHigh,
    /// A zero byte means configured.
    ActiveLow,
}

impl ConfiguredPolarity {
    pub const fn is_configured(self, raw: u8) -> bool {
        match self {
            Self::ActiveHigh => raw != 0,
            Self::ActiveLow => raw == 0,
        }
    }
}

/// A status byte that firmware reports as `0` or `1`.
///
/// Other values are kept as received and render as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusFlag(pub u8);

impl StatusFlag {
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Returns `true` for any non-zero byte.
    pub const fn is_set(self) -> bool {
        self.0 != 0
    }

    /// `Some` for `0` and `1`, `None` for anything else.
    pub const fn get(self) -> Option<bool> {
        match self.0 {
            0 => Some(false),
            1 => Some(true),
            _ => None,
        }
    }

    const fn label(self, set: &'static str, clear: &'static str) -> &'static str {
        match self.get() {
            Some(true) => set,
            Some(false) => clear,
            None => UNKNOWN,
        }
    }
}

impl From<u8> for StatusFlag {
    fn from(raw: u8) -> Self {
        Self(raw)
    }
}

/// How the FPGA configuration result byte is to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResultCodes {
    /// Zero is success; every other value is an unspecified failure.
    Legacy,
    /// Non-zero values carry a specific [`FpgaResult`] reason.
    Extended,
}

/// Interpretation rules for [`FpgaStatus`] replies of a given firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusConvention {
    pub polarity: ConfiguredPolarity,
    pub result_codes: ResultCodes,
}

impl StatusConvention {
    /// Early firmware: `1` means configured, result codes carry no reason.
    pub const LEGACY: Self = Self {
        polarity: ConfiguredPolarity::ActiveHigh,
        result_codes: ResultCodes::Legacy,
    };

    /// ZTEX SDK firmware: `0` means configured, result codes carry a reason.
    pub const SDK: Self = Self {
        polarity: ConfiguredPolarity::ActiveLow,
        result_codes: ResultCodes::Extended,
    };

    /// Conventions assumed per firmware version.
    ///
    /// Each entry covers an inclusive range of descriptor firmware versions.
    /// Version 0 follows the early host driver, which reads `1` as
    /// configured. Versions 1 to 4 follow the ZTEX SDK firmware, which
    /// reports `0` once the FPGA is configured. Neither range has been
    /// verified on every board.
    pub const KNOWN_FIRMWARE: &'static [(u8, u8, StatusConvention)] =
        &[(0, 0, Self::LEGACY), (1, 4, Self::SDK)];

    /// Looks up the convention for a firmware version.
    ///
    /// Returns `None` for firmware that is not in [`Self::KNOWN_FIRMWARE`];
    /// callers must then pick a convention explicitly.
    pub fn for_firmware(firmware_version: u8) -> Option<Self> {
        Self::KNOWN_FIRMWARE
            .iter()
            .find(|(first, last, _)| (*first..=*last).contains(&firmware_version))
            .map(|&(_, _, convention)| convention)
    }
}

/// Outcome of the last FPGA configuration attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FpgaResult {
    Success,
    AlreadyConfigured,
    FlashError,
    NoBitstream,
    ConfigurationError,
    /// A failure without a known reason.
    Unsuccessful(u8),
}

impl FpgaResult {
    pub const fn new(raw: u8, codes: ResultCodes) -> Self {
        match (codes, raw) {
            (_, 0) => Self::Success,
            (ResultCodes::Extended, 1) => Self::AlreadyConfigured,
            (ResultCodes::Extended, 2) => Self::FlashError,
            (ResultCodes::Extended, 3) => Self::NoBitstream,
            (ResultCodes::Extended, 4) => Self::ConfigurationError,
            (_, v) => Self::Unsuccessful(v),
        }
    }

    pub const fn raw(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::AlreadyConfigured => 1,
            Self::FlashError => 2,
            Self::NoBitstream => 3,
            Self::ConfigurationError => 4,
            Self::Unsuccessful(v) => v,
        }
    }

    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for FpgaResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("Successful"),
            Self::AlreadyConfigured => f.write_str("Already Configured"),
            Self::FlashError => f.write_str("Flash Error"),
            Self::NoBitstream => f.write_str("No Bitstream"),
            Self::ConfigurationError => f.write_str("Configuration Error"),
            Self::Unsuccessful(v) => write!(f, "Unsuccessful [{v}]"),
        }
    }
}

/// Reply to [`FPGA_STATUS`](crate::vreq::FPGA_STATUS).
///
/// # Encoding
///
/// | Offset | Size | Field |
/// |--------|------|-------|
/// | 0      | 1    | configured flag, see [`ConfiguredPolarity`] |
/// | 1      | 1    | checksum of the transferred bitstream |
/// | 2      | 4    | transferred bytes (`u32`) |
/// | 6      | 1    | INIT_B pulse counter |
/// | 7      | 1    | result of the last configuration |
/// | 8      | 1    | bitstream bit order swapped |
///
/// The meaning of the first and the eighth byte depends on the firmware, so
/// this type is decoded with [`FpgaStatus::decode_with`] rather than through
/// [`Decode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FpgaStatus {
    /// Raw "configured" byte. Use [`FpgaStatus::is_configured`] to read it.
    pub configured: StatusFlag,
    pub checksum: u8,
    pub transferred: u32,
    pub init_pulses: u8,
    pub result: FpgaResult,
    pub bit_order_swapped: StatusFlag,
    /// Convention the reply was decoded with.
    pub convention: StatusConvention,
}

impl FpgaStatus {
    pub const SIZE: usize = 9;

    /// Reads the "configured" byte with the convention it was decoded with.
    pub const fn is_configured(&self) -> bool {
        self.convention.polarity.is_configured(self.configured.raw())
    }

    /// Decodes a full 9-byte reply using the given convention.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedLength`](crate::DecodeErrorKind::MalformedLength)
    /// if `data` is not exactly 9 bytes long.
    pub fn decode_with(data: &[u8], convention: StatusConvention) -> Result<Self, DecodeError> {
        expect_length::<Self>(data, Self::SIZE)?;
        let data = &mut &data[..];

        Ok(Self {
            configured: StatusFlag(u8::decode(data)?),
            checksum: u8::decode(data)?,
            transferred: u32::decode(data)?,
            init_pulses: u8::decode(data)?,
            result: FpgaResult::new(u8::decode(data)?, convention.result_codes),
            bit_order_swapped: StatusFlag(u8::decode(data)?),
            convention,
        })
    }
}

impl Encode for FpgaStatus {
    fn size(&self) -> usize {
        Self::SIZE
    }

    fn encode(&self, data: &mut [u8]) {
        let mut enc = MessageEncoder::new(data);

        enc.write(&self.configured.raw());
        enc.write(&self.checksum);
        enc.write(&self.transferred);
        enc.write(&self.init_pulses);
        enc.write(&self.result.raw());
        enc.write(&self.bit_order_swapped.raw());
    }
}

impl fmt::Display for FpgaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Configured({}), Checksum({:#04x}), Transferred({}), Init({}), Result({}), Swapped({})",
            match self.configured.get() {
                Some(_) if self.is_configured() => "Configured",
                Some(_) => "Unconfigured",
                None => UNKNOWN,
            },
            self.checksum,
            BinaryPrefix::new(self.transferred.into(), "B"),
            self.init_pulses,
            self.result,
            self.bit_order_swapped.label("Swapped", "Unswapped"),
        )
    }
}

/// Size of a flash sector.
///
/// # Encoding
///
/// A little-endian `u16`. When the top bit is set the low 15 bits are an
/// exponent and the size is `2^exponent` bytes; otherwise the low 15 bits
/// are the size in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlashSectorSize(pub u16);

impl FlashSectorSize {
    const EXPONENT_FLAG: u16 = 0x8000;

    /// Sector size in bytes, or `None` if the exponent does not fit a `u64`.
    pub const fn bytes(self) -> Option<u64> {
        let low = (self.0 & !Self::EXPONENT_FLAG) as u32;

        if self.0 & Self::EXPONENT_FLAG != 0 {
            1u64.checked_shl(low)
        } else {
            Some(low as u64)
        }
    }
}

impl fmt::Display for FlashSectorSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bytes() {
            Some(bytes) => write!(f, "{}", BinaryPrefix::new(bytes, "B")),
            None => write!(f, "2^{}B", self.0 & !Self::EXPONENT_FLAG),
        }
    }
}

/// Error code reported by the flash driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlashError {
    None,
    Command,
    Timeout,
    Busy,
    Pending,
    Read,
    Write,
    Unsupported,
    Runtime,
    Unknown(u8),
}

impl FlashError {
    pub const fn new(raw: u8) -> Self {
        match raw {
            0 => Self::None,
            1 => Self::Command,
            2 => Self::Timeout,
            3 => Self::Busy,
            4 => Self::Pending,
            5 => Self::Read,
            6 => Self::Write,
            7 => Self::Unsupported,
            8 => Self::Runtime,
            v => Self::Unknown(v),
        }
    }

    pub const fn raw(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Command => 1,
            Self::Timeout => 2,
            Self::Busy => 3,
            Self::Pending => 4,
            Self::Read => 5,
            Self::Write => 6,
            Self::Unsupported => 7,
            Self::Runtime => 8,
            Self::Unknown(v) => v,
        }
    }
}

impl fmt::Display for FlashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Command => f.write_str("Command Error"),
            Self::Timeout => f.write_str("Timeout Error"),
            Self::Busy => f.write_str("Busy Error"),
            Self::Pending => f.write_str("Pending Error"),
            Self::Read => f.write_str("Read Error"),
            Self::Write => f.write_str("Write Error"),
            Self::Unsupported => f.write_str("Unsupported Error"),
            Self::Runtime => f.write_str("Runtime Error"),
            Self::Unknown(v) => write!(f, "Unknown Error [{v}]"),
        }
    }
}

/// Reply to [`FLASH_STATUS`](crate::vreq::FLASH_STATUS).
///
/// # Encoding
///
/// | Offset | Size | Field |
/// |--------|------|-------|
/// | 0      | 1    | flash enabled |
/// | 1      | 2    | sector size, see [`FlashSectorSize`] |
/// | 3      | 4    | sector count (`u32`) |
/// | 7      | 1    | error code |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlashStatus {
    pub enabled: StatusFlag,
    pub sector_size: FlashSectorSize,
    pub sector_count: u32,
    pub error: FlashError,
}

impl FlashStatus {
    pub const SIZE: usize = 8;

    /// Total flash capacity in bytes.
    pub fn capacity(&self) -> Option<u64> {
        self.sector_size
            .bytes()?
            .checked_mul(u64::from(self.sector_count))
    }
}

impl FixedResponse for FlashStatus {
    const LENGTH: usize = Self::SIZE;
}

impl Decode for FlashStatus {
    fn decode(data: &mut &[u8]) -> Result<Self, DecodeError> {
        Ok(Self {
            enabled: StatusFlag(u8::decode(data)?),
            sector_size: FlashSectorSize(u16::decode(data)?),
            sector_count: u32::decode(data)?,
            error: FlashError::new(u8::decode(data)?),
        })
    }
}

impl Encode for FlashStatus {
    fn size(&self) -> usize {
        Self::SIZE
    }

    fn encode(&self, data: &mut [u8]) {
        let mut enc = MessageEncoder::new(data);

        enc.write(&self.enabled.raw());
        enc.write(&self.sector_size.0);
        enc.write(&self.sector_count);
        enc.write(&self.error.raw());
    }
}

impl fmt::Display for FlashStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Enabled({}), Sector({}), Count({}), Error({})",
            self.enabled.label("Enabled", "Disabled"),
            self.sector_size,
            self.sector_count,
            self.error
        )
    }
}
