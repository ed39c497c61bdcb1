use alloc::vec;
use alloc::vec::Vec;

/// A type that can be encoded into a sequence of bytes.
///
/// The codec only ever encodes values back into the exact layout they were
/// decoded from, so this is mostly useful for building test fixtures and
/// for comparing raw fields.
pub trait Encode {
    /// Returns the number of bytes this value will take when encoded.
    fn size(&self) -> usize;

    /// Encodes this instance into the provided byte slice.
    fn encode(&self, data: &mut [u8]);

    /// Encodes this instance into a freshly allocated buffer.
    fn to_bytes(&self) -> Vec<u8> {
        let mut data = vec![0; self.size()];
        self.encode(&mut data);
        data
    }
}

macro_rules! impl_encode_for_primitive {
    ($($t:ty),*) => {
        $(
            impl Encode for $t {
                fn size(&self) -> usize {
                    size_of::<Self>()
                }

                fn encode(&self, data: &mut [u8]) {
                    data[..size_of::<Self>()].copy_from_slice(&self.to_le_bytes());
                }
            }
        )*
    };
}

impl_encode_for_primitive!(u8, u16, u32, u64);

impl<const N: usize> Encode for [u8; N] {
    fn size(&self) -> usize {
        N
    }

    fn encode(&self, data: &mut [u8]) {
        data[..N].copy_from_slice(self);
    }
}

/// Writes a sequence of [`Encode`] values into a buffer, one after another.
pub struct MessageEncoder<'a> {
    data: &'a mut [u8],
    position: usize,
}

impl<'a> MessageEncoder<'a> {
    pub fn new(data: &'a mut [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Encodes `value` at the current position and advances past it.
    pub fn write(&mut self, value: &impl Encode) {
        value.encode(&mut self.data[self.position..]);
        self.position += value.size();
    }

    /// Moves the write position to `position`, leaving skipped bytes untouched.
    pub fn seek(&mut self, position: usize) {
        self.position = position;
    }

    pub fn position(&self) -> usize {
        self.position
    }
}
