//! Clock sysvar

use book_oracle_common::{from_bytes_exact, BridgeResult, LeI64, LeU64, Pod};
use pinocchio::pubkey::Pubkey;

/// SysvarC1ock11111111111111111111111111111111
pub const CLOCK_SYSVAR_ID: Pubkey = pinocchio_pubkey::pubkey!("SysvarC1ock11111111111111111111111111111111");

pub const CLOCK_LAYOUT_SIZE: usize = 40;

#[repr(C)]
#[derive(Clone, Copy)]
pub struct ClockLayout {
    pub slot: LeU64,
    pub epoch_start_timestamp: LeI64,
    pub epoch: LeU64,
    pub leader_schedule_epoch: LeU64,
    pub unix_timestamp: LeI64,
}

unsafe impl Pod for ClockLayout {}

const _: () = assert!(core::mem::size_of::<ClockLayout>() == CLOCK_LAYOUT_SIZE);

impl ClockLayout {
    pub fn decode(data: &[u8]) -> BridgeResult<&Self> {
        from_bytes_exact(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_id_bytes() {
        assert_eq!(CLOCK_SYSVAR_ID[..4], [6, 167, 213, 23]);
        assert_eq!(CLOCK_SYSVAR_ID[28..], [0, 0, 0, 0]);
    }

    #[test]
    fn test_clock_slot() {
        let mut data = [0u8; CLOCK_LAYOUT_SIZE];
        data[..8].copy_from_slice(&42u64.to_le_bytes());
        assert_eq!(ClockLayout::decode(&data).unwrap().slot.get(), 42);
        assert!(ClockLayout::decode(&data[..39]).is_err());
    }
}
