//! Exchange market header

use super::framing::{open_envelope, AccountFlags};
use book_oracle_common::{BridgeError, BridgeResult, LeU64, Pod};
use pinocchio::{msg, pubkey::Pubkey};

pub const MARKET_LAYOUT_SIZE: usize = 368;

/// Market state following the flags word
#[repr(C)]
#[derive(Clone, Copy)]
pub struct MarketLayout {
    pub own_address: Pubkey,
    pub vault_signer_nonce: LeU64,
    pub base_mint: Pubkey,
    pub quote_mint: Pubkey,
    pub base_vault: Pubkey,
    pub base_deposits_total: LeU64,
    pub base_fees_accrued: LeU64,
    pub quote_vault: Pubkey,
    pub quote_deposits_total: LeU64,
    pub quote_fees_accrued: LeU64,
    pub quote_dust_threshold: LeU64,
    pub request_queue: Pubkey,
    pub event_queue: Pubkey,
    pub bids: Pubkey,
    pub asks: Pubkey,
    pub base_lot_size: LeU64,
    pub quote_lot_size: LeU64,
    pub fee_rate_bps: LeU64,
    pub referrer_rebates_accrued: LeU64,
}

unsafe impl Pod for MarketLayout {}

const _: () = assert!(core::mem::size_of::<MarketLayout>() == MARKET_LAYOUT_SIZE);

/// Keys the market header must point back at
#[derive(Clone, Copy)]
pub struct MarketRefs<'a> {
    pub market: &'a Pubkey,
    pub quote_mint: &'a Pubkey,
    pub base_mint: &'a Pubkey,
    pub bids: &'a Pubkey,
    pub asks: &'a Pubkey,
}

impl MarketLayout {
    /// Decode a framed market account; bytes after the header are ignored
    pub fn decode(data: &[u8]) -> BridgeResult<&Self> {
        let mut cursor = open_envelope(data, AccountFlags::MARKET)?;
        cursor.take::<Self>()
    }

    /// Reject a market whose header names different accounts than supplied
    pub fn check_refs(&self, refs: &MarketRefs) -> BridgeResult<()> {
        if &self.own_address != refs.market
            || &self.quote_mint != refs.quote_mint
            || &self.base_mint != refs.base_mint
            || &self.bids != refs.bids
            || &self.asks != refs.asks
        {
            msg!("Error: Market does not reference the supplied accounts");
            return Err(BridgeError::InvalidAccountData);
        }
        Ok(())
    }
}
