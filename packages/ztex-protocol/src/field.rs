use core::fmt;

use crate::{
    decode::{Decode, DecodeError},
    encode::Encode,
};

/// A fixed-width byte field whose contents end at the first zero byte.
///
/// Board variants, FPGA speed grades and serial numbers are stored in
/// zero-padded buffers of a fixed size. The raw buffer is kept verbatim so
/// the field encodes back to exactly what the device sent; the trimmed view
/// is only used when rendering.
///
/// # Invariants
///
/// - [`len`](Self::len) is the index of the first zero byte, or `N`.
/// - Bytes past the first zero are preserved but never rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZeroPadded<const N: usize>([u8; N]);

impl<const N: usize> ZeroPadded<N> {
    pub const fn new(raw: [u8; N]) -> Self {
        Self(raw)
    }

    /// The untruncated buffer, exactly as it appeared on the wire.
    pub const fn raw(&self) -> &[u8; N] {
        &self.0
    }

    /// Number of bytes before the first zero byte.
    pub fn len(&self) -> usize {
        self.0.iter().position(|&b| b == 0).unwrap_or(N)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The meaningful prefix of the field.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0[..self.len()]
    }
}

impl<const N: usize> Default for ZeroPadded<N> {
    fn default() -> Self {
        Self([0; N])
    }
}

impl<const N: usize> From<[u8; N]> for ZeroPadded<N> {
    fn from(raw: [u8; N]) -> Self {
        Self(raw)
    }
}

impl<const N: usize> AsRef<[u8]> for ZeroPadded<N> {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<const N: usize> fmt::Display for ZeroPadded<N> {
    // Printable ASCII as-is, anything else escaped.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &byte in self.as_bytes() {
            if byte.is_ascii_graphic() || byte == b' ' {
                write!(f, "{}", byte as char)?;
            } else {
                write!(f, "{}", byte.escape_ascii())?;
            }
        }

        Ok(())
    }
}

impl<const N: usize> Encode for ZeroPadded<N> {
    fn size(&self) -> usize {
        N
    }

    fn encode(&self, data: &mut [u8]) {
        self.0.encode(data)
    }
}

impl<const N: usize> Decode for ZeroPadded<N> {
    fn decode(data: &mut &[u8]) -> Result<Self, DecodeError> {
        Ok(Self(<[u8; N]>::decode(data)?))
    }
}

// serde only derives for arrays up to 32 elements, not for `[u8; N]`.
#[cfg(feature = "serde")]
impl<const N: usize> serde::Serialize for ZeroPadded<N> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de, const N: usize> serde::Deserialize<'de> for ZeroPadded<N> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = <alloc::vec::Vec<u8> as serde::Deserialize>::deserialize(deserializer)?;
        let raw = <[u8; N]>::try_from(bytes.as_slice()).map_err(|_| {
            serde::de::Error::invalid_length(bytes.len(), &"a zero-padded byte field")
        })?;

        Ok(Self(raw))
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::ZeroPadded;

    #[test]
    fn variant_truncation() {
        assert_eq!(ZeroPadded::new([0x00, 0x00]).to_string(), "");
        assert_eq!(ZeroPadded::new([0x62, 0x00]).to_string(), "b");
        assert_eq!(ZeroPadded::new([0x62, 0x31]).to_string(), "b1");
    }

    #[test]
    fn bytes_after_first_zero_are_kept_raw() {
        let field = ZeroPadded::new([0x00, 0x62]);

        assert!(field.is_empty());
        assert_eq!(field.to_string(), "");
        assert_eq!(field.raw(), &[0x00, 0x62]);
    }

    #[test]
    fn grade() {
        let grade = ZeroPadded::new(*b"2C\0");

        assert_eq!(grade.len(), 2);
        assert_eq!(grade.as_bytes(), b"2C");
        assert_eq!(ZeroPadded::new(*b"3LI").to_string(), "3LI");
    }

    #[test]
    fn non_printable_bytes_are_escaped() {
        assert_eq!(ZeroPadded::new([b'A', 0x7F, 0xFF]).to_string(), "A\\x7f\\xff");
    }
}
