//! Zero-copy views over untrusted account bytes
//!
//! Every wire struct is `#[repr(C)]` and built only from byte arrays, so it has
//! alignment 1 and no invalid bit patterns. Such types implement [`Pod`] and
//! can be cast in place at any offset once the length is known to suffice.

use crate::error::{BridgeError, BridgeResult};
use core::mem::{align_of, size_of};

/// Plain-old-data marker for wire layouts
///
/// # Safety
/// Implementors must have alignment 1, no padding, and accept every bit
/// pattern as a valid value.
pub unsafe trait Pod: Sized + Copy {
    const LEN: usize = size_of::<Self>();

    fn zeroed() -> Self {
        // SAFETY: all-zero is a valid bit pattern for every Pod type
        unsafe { core::mem::zeroed() }
    }

    fn as_bytes(&self) -> &[u8] {
        // SAFETY: Pod has no padding, so every byte is initialised
        unsafe { core::slice::from_raw_parts(self as *const Self as *const u8, Self::LEN) }
    }

    /// View the first `LEN` bytes as `Self`
    fn ref_from(bytes: &[u8]) -> Option<&Self> {
        debug_assert_eq!(align_of::<Self>(), 1);
        if bytes.len() < Self::LEN {
            return None;
        }
        // SAFETY: length checked; alignment 1; every bit pattern valid
        Some(unsafe { &*(bytes.as_ptr() as *const Self) })
    }

    /// Mutable view over the first `LEN` bytes
    fn mut_from(bytes: &mut [u8]) -> Option<&mut Self> {
        debug_assert_eq!(align_of::<Self>(), 1);
        if bytes.len() < Self::LEN {
            return None;
        }
        // SAFETY: as in `ref_from`, and the borrow is unique
        Some(unsafe { &mut *(bytes.as_mut_ptr() as *mut Self) })
    }
}

unsafe impl Pod for u8 {}
unsafe impl<T: Pod, const N: usize> Pod for [T; N] {}

macro_rules! le_int {
    ($(#[$doc:meta])* $name:ident, $ty:ty) => {
        $(#[$doc])*
        #[repr(transparent)]
        #[derive(Clone, Copy, Default, PartialEq, Eq)]
        pub struct $name([u8; size_of::<$ty>()]);

        impl $name {
            #[inline]
            pub const fn new(value: $ty) -> Self {
                Self(value.to_le_bytes())
            }

            #[inline]
            pub const fn get(&self) -> $ty {
                <$ty>::from_le_bytes(self.0)
            }
        }

        impl From<$ty> for $name {
            fn from(value: $ty) -> Self {
                Self::new(value)
            }
        }

        impl core::fmt::Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Debug::fmt(&self.get(), f)
            }
        }

        unsafe impl Pod for $name {}
    };
}

le_int!(
    /// Little-endian u16 stored as bytes
    LeU16, u16
);
le_int!(
    /// Little-endian u32 stored as bytes
    LeU32, u32
);
le_int!(
    /// Little-endian i32 stored as bytes
    LeI32, i32
);
le_int!(
    /// Little-endian u64 stored as bytes
    LeU64, u64
);
le_int!(
    /// Little-endian i64 stored as bytes
    LeI64, i64
);

/// Cast a buffer that must be exactly one `T`
pub fn from_bytes_exact<T: Pod>(bytes: &[u8]) -> BridgeResult<&T> {
    if bytes.len() != T::LEN {
        return Err(BridgeError::AccountDataTooSmall);
    }
    T::ref_from(bytes).ok_or(BridgeError::AccountDataTooSmall)
}

/// Forward-only reader that hands out typed views into a byte slice
#[derive(Clone, Copy)]
pub struct ByteCursor<'a> {
    bytes: &'a [u8],
}

impl<'a> ByteCursor<'a> {
    #[inline]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Bytes not yet consumed
    #[inline]
    pub fn rest(&self) -> &'a [u8] {
        self.bytes
    }

    /// Take the next `T` in place
    pub fn take<T: Pod>(&mut self) -> BridgeResult<&'a T> {
        let bytes = self.bytes;
        let view = T::ref_from(bytes).ok_or(BridgeError::AccountDataTooSmall)?;
        self.bytes = &bytes[T::LEN..];
        Ok(view)
    }

    /// Consume a leading tag
    pub fn strip_prefix(&mut self, tag: &[u8]) -> BridgeResult<()> {
        match self.bytes.strip_prefix(tag) {
            Some(rest) => {
                self.bytes = rest;
                Ok(())
            }
            None => Err(BridgeError::InvalidAccountData),
        }
    }

    /// Consume a trailing tag
    pub fn strip_suffix(&mut self, tag: &[u8]) -> BridgeResult<()> {
        match self.bytes.strip_suffix(tag) {
            Some(rest) => {
                self.bytes = rest;
                Ok(())
            }
            None => Err(BridgeError::InvalidAccountData),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[repr(C)]
    #[derive(Clone, Copy)]
    struct Pair {
        a: LeU32,
        b: LeU64,
    }

    unsafe impl Pod for Pair {}

    #[test]
    fn test_le_wrappers() {
        assert_eq!(LeU64::new(0x0102030405060708).get(), 0x0102030405060708);
        assert_eq!(LeI64::new(-5).get(), -5);
        assert_eq!(LeI32::new(i32::MIN).get(), i32::MIN);
        assert_eq!(LeU16::from(7).get(), 7);
        assert_eq!(LeU32::new(1).as_bytes(), &[1, 0, 0, 0]);
        assert_eq!(align_of::<LeU64>(), 1);
    }

    #[test]
    fn test_pod_size_and_align() {
        assert_eq!(Pair::LEN, 12);
        assert_eq!(align_of::<Pair>(), 1);
        assert_eq!(<[LeU64; 3]>::LEN, 24);
    }

    #[test]
    fn test_cursor_take_sequence() {
        let mut data = [0u8; 14];
        data[0..4].copy_from_slice(&7u32.to_le_bytes());
        data[4..12].copy_from_slice(&9u64.to_le_bytes());
        data[12] = 0xAA;

        let mut cursor = ByteCursor::new(&data);
        let pair = cursor.take::<Pair>().unwrap();
        assert_eq!(pair.a.get(), 7);
        assert_eq!(pair.b.get(), 9);
        assert_eq!(cursor.rest().len(), 2);
        assert_eq!(cursor.take::<u8>().unwrap(), &0xAA);
        assert_eq!(cursor.rest(), &[0]);
    }

    #[test]
    fn test_cursor_short_buffer() {
        let data = [0u8; 11];
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.take::<Pair>().err(), Some(BridgeError::AccountDataTooSmall));
        // A failed take leaves the cursor untouched
        assert_eq!(cursor.rest().len(), 11);
        assert_eq!(cursor.take::<[u8; 11]>().unwrap().len(), 11);
        assert_eq!(cursor.take::<u8>().err(), Some(BridgeError::AccountDataTooSmall));
    }

    #[test]
    fn test_cursor_unaligned_offset() {
        let data = [1u8; 13];
        let mut cursor = ByteCursor::new(&data);
        cursor.take::<u8>().unwrap();
        let pair = cursor.take::<Pair>().unwrap();
        assert_eq!(pair.a.get(), 0x01010101);
    }

    #[test]
    fn test_cursor_framing() {
        let data = *b"serum1234padding";
        let mut cursor = ByteCursor::new(&data);
        cursor.strip_prefix(b"serum").unwrap();
        cursor.strip_suffix(b"padding").unwrap();
        assert_eq!(cursor.rest(), b"1234");

        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.strip_prefix(b"serun"), Err(BridgeError::InvalidAccountData));
        assert_eq!(cursor.strip_suffix(b"paddinh"), Err(BridgeError::InvalidAccountData));
        assert_eq!(cursor.rest(), &data[..]);

        let mut short = ByteCursor::new(b"ser");
        assert_eq!(short.strip_prefix(b"serum"), Err(BridgeError::InvalidAccountData));
    }

    #[test]
    fn test_from_bytes_exact() {
        let data = [0u8; 12];
        assert!(from_bytes_exact::<Pair>(&data).is_ok());
        assert_eq!(
            from_bytes_exact::<Pair>(&data[..11]).err(),
            Some(BridgeError::AccountDataTooSmall)
        );
        let long = [0u8; 13];
        assert_eq!(
            from_bytes_exact::<Pair>(&long).err(),
            Some(BridgeError::AccountDataTooSmall)
        );
    }

    #[test]
    fn test_mut_from_writes_through() {
        let mut data = [0u8; 12];
        {
            let pair = Pair::mut_from(&mut data).unwrap();
            pair.b = LeU64::new(u64::MAX);
        }
        assert_eq!(&data[4..], &[0xFF; 8]);
        assert!(Pair::mut_from(&mut data[..5]).is_none());
    }
}
