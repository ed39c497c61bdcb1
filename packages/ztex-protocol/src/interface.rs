//! Endpoint settings of the high-speed configuration and default firmware interfaces.

use core::fmt;

use crate::decode::{Decode, DecodeError, DecodeErrorKind, FixedResponse};

/// Reply to [`HS_CONFIG_SETTINGS`](crate::vreq::HS_CONFIG_SETTINGS).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HighSpeedEndpoints {
    /// Bulk endpoint used to stream bitstreams. Zero means unsupported.
    pub endpoint: u8,
    /// Interface that owns [`Self::endpoint`]. Zero means unsupported.
    pub interface: u8,
}

impl HighSpeedEndpoints {
    pub const fn is_supported(&self) -> bool {
        self.endpoint != 0
    }
}

impl FixedResponse for HighSpeedEndpoints {
    const LENGTH: usize = 2;
}

impl Decode for HighSpeedEndpoints {
    fn decode(data: &mut &[u8]) -> Result<Self, DecodeError> {
        Ok(Self {
            endpoint: u8::decode(data)?,
            interface: u8::decode(data)?,
        })
    }
}

impl fmt::Display for HighSpeedEndpoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Endpoint({:#04x}), Interface({})",
            self.endpoint, self.interface
        )
    }
}

/// Reply to [`DEFAULT_INTERFACE_INFO`](crate::vreq::DEFAULT_INTERFACE_INFO).
///
/// Older firmware answers with three bytes and has no minor version.
///
/// # Encoding
///
/// | Offset | Size | Field |
/// |--------|------|-------|
/// | 0      | 1    | major version |
/// | 1      | 1    | output endpoint number |
/// | 2      | 1    | input endpoint number |
/// | 3      | 0–1  | minor version |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefaultInterfaceInfo {
    pub major_version: u8,
    pub minor_version: Option<u8>,
    /// OUT endpoint address (direction bit cleared).
    pub output_endpoint: u8,
    /// IN endpoint address (direction bit set).
    pub input_endpoint: u8,
}

impl DefaultInterfaceInfo {
    pub const MIN_LENGTH: usize = 3;
    pub const MAX_LENGTH: usize = 4;

    /// Decodes a 3- or 4-byte reply.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedLength`](DecodeErrorKind::MalformedLength) for any
    /// other length.
    pub fn decode_response(data: &[u8]) -> Result<Self, DecodeError> {
        let expected = if data.len() < Self::MIN_LENGTH {
            Self::MIN_LENGTH
        } else {
            Self::MAX_LENGTH
        };
        if !(Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&data.len()) {
            return Err(DecodeError::new::<Self>(DecodeErrorKind::MalformedLength {
                expected,
                found: data.len(),
            }));
        }

        let data = &mut &data[..];
        let major_version = u8::decode(data)?;
        let output_endpoint = u8::decode(data)? & 0x7F;
        let input_endpoint = u8::decode(data)? | 0x80;
        let minor_version = match u8::decode(data) {
            Ok(minor) => Some(minor),
            Err(e) if e.kind() == DecodeErrorKind::UnexpectedEnd => None,
            Err(e) => return Err(e),
        };

        Ok(Self {
            major_version,
            minor_version,
            output_endpoint,
            input_endpoint,
        })
    }
}

impl fmt::Display for DefaultInterfaceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Version({}", self.major_version)?;
        if let Some(minor) = self.minor_version {
            write!(f, ".{minor}")?;
        }
        write!(
            f,
            "), Out({:#04x}), In({:#04x})",
            self.output_endpoint, self.input_endpoint
        )
    }
}
