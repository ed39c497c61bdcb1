use core::mem::MaybeUninit;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub struct DecodeError {
    kind: DecodeErrorKind,
    type_name: &'static str,
}

impl DecodeError {
    pub fn new<T>(kind: DecodeErrorKind) -> Self {
        Self {
            kind,
            type_name: core::any::type_name::<T>(),
        }
    }

    pub const fn kind(&self) -> DecodeErrorKind {
        self.kind
    }

    /// Name of the type that failed to decode.
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Failed to decode {}: {}", self.type_name, self.kind)
    }
}

#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeErrorKind {
    #[error("Response was too short.")]
    UnexpectedEnd,

    #[error("Response had a length of {found} bytes, expected {expected} bytes.")]
    MalformedLength { expected: usize, found: usize },

    #[error(
        "Response declared an unexpected {name}. Found {value}, expected one of: {expected:?}."
    )]
    MalformedHeader {
        name: &'static str,
        value: u8,
        expected: &'static [u8],
    },

    #[error("Response signature mismatch. Found {found:x?}, expected {expected:x?}.")]
    SignatureMismatch {
        found: [u8; 3],
        expected: [u8; 3],
    },
}

/// A type that can be reconstructed (decoded) from a raw sequence of bytes.
///
/// The input slice will be advanced by the number of bytes consumed during
/// decoding. Multi-byte integers are always read little-endian.
pub trait Decode {
    /// Attempts to decode `Self` from the beginning of the provided byte slice.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if the input is malformed or insufficient
    /// to decode a complete value of this type.
    fn decode(data: &mut &[u8]) -> Result<Self, DecodeError>
    where
        Self: Sized;
}

/// A reply to a vendor request with a fixed wire length.
///
/// Unlike [`Decode`], a response is decoded from the *whole* buffer handed
/// back by the control transfer, and the buffer length is checked first.
pub trait FixedResponse: Decode {
    /// Exact number of bytes the device returns.
    const LENGTH: usize;

    /// Checks the buffer length and decodes it.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeErrorKind::MalformedLength`] when `data` is not exactly
    /// [`Self::LENGTH`] bytes long, or any error raised by [`Decode::decode`].
    fn decode_response(data: &[u8]) -> Result<Self, DecodeError>
    where
        Self: Sized,
    {
        expect_length::<Self>(data, Self::LENGTH)?;
        Self::decode(&mut &data[..])
    }
}

/// Fails with [`DecodeErrorKind::MalformedLength`] unless `data` is exactly
/// `expected` bytes long.
pub fn expect_length<T>(data: &[u8], expected: usize) -> Result<(), DecodeError> {
    if data.len() != expected {
        return Err(DecodeError::new::<T>(DecodeErrorKind::MalformedLength {
            expected,
            found: data.len(),
        }));
    }

    Ok(())
}

macro_rules! impl_decode_for_primitive {
    ($($t:ty),*) => {
        $(
            impl Decode for $t {
                fn decode(data: &mut &[u8]) -> Result<Self, DecodeError> {
                    let (bytes, rest) = data
                        .split_first_chunk::<{ size_of::<$t>() }>()
                        .ok_or_else(|| DecodeError::new::<Self>(DecodeErrorKind::UnexpectedEnd))?;
                    *data = rest;
                    Ok(Self::from_le_bytes(*bytes))
                }
            }
        )*
    };
}

impl_decode_for_primitive!(u8, u16, u32, u64);

// TODO: Switch to try_from_fn and/or array::try_map once stabilized
impl<const N: usize, T: Decode> Decode for [T; N] {
    fn decode(data: &mut &[u8]) -> Result<Self, DecodeError> {
        let mut arr: [MaybeUninit<T>; N] = [const { MaybeUninit::uninit() }; N];

        for slot in arr.iter_mut() {
            *slot = MaybeUninit::new(T::decode(data)?);
        }

        // SAFETY: every element was initialized by the loop above.
        Ok(unsafe { core::mem::transmute_copy::<_, [T; N]>(&arr) })
    }
}
