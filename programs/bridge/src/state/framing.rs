//! Exchange account envelope: `"serum"` + flags word + body + `"padding"`

use book_oracle_common::{BridgeError, BridgeResult, ByteCursor, LeU64};
use pinocchio::msg;

/// Leading tag on every exchange-owned account
pub const HEAD_TAG: &[u8] = b"serum";

/// Trailing tag on every exchange-owned account
pub const TAIL_TAG: &[u8] = b"padding";

/// Account kind and lifecycle bits stored after the leading tag
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccountFlags(u64);

impl AccountFlags {
    pub const INITIALIZED: Self = Self(1 << 0);
    pub const MARKET: Self = Self(1 << 1);
    pub const OPEN_ORDERS: Self = Self(1 << 2);
    pub const REQUEST_QUEUE: Self = Self(1 << 3);
    pub const EVENT_QUEUE: Self = Self(1 << 4);
    pub const BIDS: Self = Self(1 << 5);
    pub const ASKS: Self = Self(1 << 6);
    pub const DISABLED: Self = Self(1 << 7);

    /// Bits 8..64 must be zero
    pub const RESERVED_MASK: u64 = !0xFF;

    #[inline]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    #[inline]
    pub const fn bits(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Initialized, of the given kind, not disabled, reserved bits clear
    pub const fn is_valid_for(self, kind: Self) -> bool {
        self.contains(Self::INITIALIZED)
            && self.contains(kind)
            && !self.contains(Self::DISABLED)
            && self.0 & Self::RESERVED_MASK == 0
    }
}

/// Strip the framing tags and check the flags word
///
/// Returns a cursor positioned at the start of the body. The trailing tag is
/// matched against what remains after the leading tag, so the two never
/// overlap.
pub fn open_envelope(data: &[u8], kind: AccountFlags) -> BridgeResult<ByteCursor<'_>> {
    let mut cursor = ByteCursor::new(data);
    if cursor.strip_prefix(HEAD_TAG).is_err() || cursor.strip_suffix(TAIL_TAG).is_err() {
        msg!("Error: Exchange account framing is missing");
        return Err(BridgeError::InvalidAccountData);
    }

    let flags = AccountFlags::from_bits(cursor.take::<LeU64>()?.get());
    if !flags.is_valid_for(kind) {
        msg!("Error: Exchange account flags are invalid");
        return Err(BridgeError::InvalidAccountData);
    }

    Ok(cursor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn framed(flags: u64, body: &[u8]) -> Vec<u8> {
        let mut data = HEAD_TAG.to_vec();
        data.extend_from_slice(&flags.to_le_bytes());
        data.extend_from_slice(body);
        data.extend_from_slice(TAIL_TAG);
        data
    }

    const MARKET_OK: u64 = 0b11;

    #[test]
    fn test_flag_bits() {
        assert_eq!(AccountFlags::INITIALIZED.bits(), 1);
        assert_eq!(AccountFlags::BIDS.bits(), 32);
        assert_eq!(AccountFlags::ASKS.bits(), 64);
        assert_eq!(AccountFlags::DISABLED.bits(), 128);
        assert_eq!(AccountFlags::RESERVED_MASK, 0xFFFF_FFFF_FFFF_FF00);
    }

    #[test]
    fn test_flag_validity() {
        let kind = AccountFlags::MARKET;
        let valid = AccountFlags::INITIALIZED.union(kind);
        assert!(valid.is_valid_for(kind));
        // Extra kind bits are tolerated as long as the expected one is set
        assert!(valid.union(AccountFlags::OPEN_ORDERS).is_valid_for(kind));

        assert!(!kind.is_valid_for(kind));
        assert!(!AccountFlags::INITIALIZED.is_valid_for(kind));
        assert!(!valid.union(AccountFlags::DISABLED).is_valid_for(kind));
        assert!(!AccountFlags::from_bits(valid.bits() | 1 << 8).is_valid_for(kind));
        assert!(!AccountFlags::from_bits(valid.bits() | 1 << 63).is_valid_for(kind));
        assert!(!valid.is_valid_for(AccountFlags::BIDS));
    }

    #[test]
    fn test_open_envelope_returns_body() {
        let data = framed(MARKET_OK, &[9, 8, 7]);
        let cursor = open_envelope(&data, AccountFlags::MARKET).unwrap();
        assert_eq!(cursor.rest(), &[9, 8, 7]);
    }

    #[test]
    fn test_open_envelope_bad_framing() {
        let mut data = framed(MARKET_OK, &[0; 4]);
        data[0] = b'S';
        assert_eq!(
            open_envelope(&data, AccountFlags::MARKET).err(),
            Some(BridgeError::InvalidAccountData)
        );

        let mut data = framed(MARKET_OK, &[0; 4]);
        let last = data.len() - 1;
        data[last] = b'G';
        assert_eq!(
            open_envelope(&data, AccountFlags::MARKET).err(),
            Some(BridgeError::InvalidAccountData)
        );

        assert_eq!(
            open_envelope(b"serumpadding", AccountFlags::MARKET).err(),
            Some(BridgeError::AccountDataTooSmall)
        );
        assert_eq!(
            open_envelope(b"serumpaddin", AccountFlags::MARKET).err(),
            Some(BridgeError::InvalidAccountData)
        );
        assert_eq!(open_envelope(&[], AccountFlags::MARKET).err(), Some(BridgeError::InvalidAccountData));
    }

    #[test]
    fn test_open_envelope_bad_flags() {
        let data = framed(0b1 | AccountFlags::BIDS.bits(), &[]);
        assert_eq!(
            open_envelope(&data, AccountFlags::ASKS).err(),
            Some(BridgeError::InvalidAccountData)
        );
        assert!(open_envelope(&data, AccountFlags::BIDS).is_ok());
    }
}
