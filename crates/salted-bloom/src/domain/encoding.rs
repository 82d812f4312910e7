//! Element-to-bytes encoding
//!
//! The filter hashes bytes. Element types opt in by implementing
//! [`ByteEncodable`]; numbers, characters and booleans encode as the UTF-8
//! bytes of their decimal/`Display` text, so `10000_i32` and `"10000"` land on
//! the same bits.

use std::borrow::Cow;

/// Canonical byte representation of a filter element
pub trait ByteEncodable {
    /// Bytes fed to the hash functions for this element
    fn encode_bytes(&self) -> Cow<'_, [u8]>;
}

impl<T: ByteEncodable + ?Sized> ByteEncodable for &T {
    fn encode_bytes(&self) -> Cow<'_, [u8]> {
        (**self).encode_bytes()
    }
}

impl ByteEncodable for str {
    fn encode_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_bytes())
    }
}

impl ByteEncodable for String {
    fn encode_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_bytes())
    }
}

impl ByteEncodable for [u8] {
    fn encode_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self)
    }
}

impl ByteEncodable for Vec<u8> {
    fn encode_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_slice())
    }
}

impl<const N: usize> ByteEncodable for [u8; N] {
    fn encode_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_slice())
    }
}

macro_rules! impl_display_encoding {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ByteEncodable for $ty {
                fn encode_bytes(&self) -> Cow<'_, [u8]> {
                    Cow::Owned(self.to_string().into_bytes())
                }
            }
        )*
    };
}

impl_display_encoding!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, char, bool,
);
