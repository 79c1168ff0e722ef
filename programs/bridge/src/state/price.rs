//! Oracle price account (version 2 layout)
//!
//! Only the header fields are read: magic, version, account type, price type
//! and exponent. The rest is mapped so the size check covers the whole account.

use book_oracle_common::{from_bytes_exact, BridgeError, BridgeResult, LeI32, LeI64, LeU32, LeU64, Pod};
use pinocchio::{msg, pubkey::Pubkey};

pub const PRICE_ACCOUNT_SIZE: usize = 3312;

pub const MAGIC: u32 = 0xa1b2c3d4;
pub const VERSION: u32 = 2;
pub const ACCOUNT_TYPE_PRICE: u32 = 3;
pub const PRICE_TYPE_PRICE: u32 = 1;

/// Publisher slots per price account
pub const MAX_COMPONENTS: usize = 32;

/// Oracle-side divisor bounding confidence relative to price
pub const MAX_CI_DIVISOR: u64 = 20;

/// Trading status carried by a price update
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PriceStatus {
    Unknown = 0,
    Trading = 1,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct PriceInfo {
    pub price: LeI64,
    pub conf: LeU64,
    pub status: LeU32,
    pub corp_act_status: LeU32,
    pub pub_slot: LeU64,
}

unsafe impl Pod for PriceInfo {}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct Ema {
    pub val: LeI64,
    pub numer: LeI64,
    pub denom: LeI64,
}

unsafe impl Pod for Ema {}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct PriceComponent {
    pub publisher: Pubkey,
    pub agg: PriceInfo,
    pub latest: PriceInfo,
}

unsafe impl Pod for PriceComponent {}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct PriceAccountLayout {
    pub magic: LeU32,
    pub version: LeU32,
    pub account_type: LeU32,
    pub size: LeU32,
    pub price_type: LeU32,
    pub exponent: LeI32,
    pub num_components: LeU32,
    pub num_quoters: LeU32,
    pub last_slot: LeU64,
    pub valid_slot: LeU64,
    pub twap: Ema,
    pub twac: Ema,
    pub timestamp: LeI64,
    pub min_publishers: u8,
    pub drv2: u8,
    pub drv3: [u8; 2],
    pub drv4: [u8; 4],
    pub product: Pubkey,
    pub next: Pubkey,
    pub prev_slot: LeU64,
    pub prev_price: LeI64,
    pub prev_conf: LeU64,
    pub prev_timestamp: LeI64,
    pub agg: PriceInfo,
    pub components: [PriceComponent; MAX_COMPONENTS],
}

unsafe impl Pod for PriceAccountLayout {}

const _: () = assert!(core::mem::size_of::<PriceInfo>() == 32);
const _: () = assert!(core::mem::size_of::<PriceComponent>() == 96);
const _: () = assert!(core::mem::size_of::<PriceAccountLayout>() == PRICE_ACCOUNT_SIZE);

impl PriceAccountLayout {
    /// Cast a buffer of exactly `PRICE_ACCOUNT_SIZE` bytes
    pub fn decode(data: &[u8]) -> BridgeResult<&Self> {
        from_bytes_exact(data)
    }

    /// Check this is an initialised price account of the expected version
    pub fn validate(&self) -> BridgeResult<()> {
        if self.magic.get() != MAGIC
            || self.version.get() != VERSION
            || self.account_type.get() != ACCOUNT_TYPE_PRICE
            || self.price_type.get() != PRICE_TYPE_PRICE
        {
            msg!("Error: Price account header is invalid");
            return Err(BridgeError::InvalidAccountData);
        }
        Ok(())
    }

    /// Decimal places of the published price (negated stored exponent)
    pub fn decimals(&self) -> BridgeResult<i32> {
        self.exponent.get().checked_neg().ok_or_else(|| {
            msg!("Error: Price exponent out of range");
            BridgeError::InvalidAccountData
        })
    }
}
