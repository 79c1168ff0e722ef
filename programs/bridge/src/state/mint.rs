//! Token mint account

use book_oracle_common::{from_bytes_exact, BridgeResult, LeU32, LeU64, Pod};
use pinocchio::pubkey::Pubkey;

pub const MINT_LAYOUT_SIZE: usize = 82;

#[repr(C)]
#[derive(Clone, Copy)]
pub struct MintLayout {
    pub mint_authority_option: LeU32,
    pub mint_authority: Pubkey,
    pub supply: LeU64,
    /// Decimal places of the token
    pub decimals: u8,
    pub is_initialized: u8,
    pub freeze_authority_option: LeU32,
    pub freeze_authority: Pubkey,
}

unsafe impl Pod for MintLayout {}

const _: () = assert!(core::mem::size_of::<MintLayout>() == MINT_LAYOUT_SIZE);

impl MintLayout {
    /// Cast a buffer of exactly `MINT_LAYOUT_SIZE` bytes
    pub fn decode(data: &[u8]) -> BridgeResult<&Self> {
        from_bytes_exact(data)
    }
}
