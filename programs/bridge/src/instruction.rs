//! Outbound price update sent to the oracle program

use crate::state::{PriceStatus, VERSION};

/// Oracle command number for a price update
pub const CMD_UPDATE_PRICE: i32 = 7;

pub const PUBLISH_COMMAND_SIZE: usize = 40;

/// Price update payload
///
/// ```text
/// version: u32
/// command: i32
/// status: u32
/// unused: u32
/// price: i64
/// confidence: u64
/// publish_slot: u64
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublishCommand {
    pub version: u32,
    pub command: i32,
    pub status: PriceStatus,
    pub price: i64,
    pub confidence: u64,
    pub publish_slot: u64,
}

impl PublishCommand {
    pub fn update_price(status: PriceStatus, price: i64, confidence: u64, publish_slot: u64) -> Self {
        Self {
            version: VERSION,
            command: CMD_UPDATE_PRICE,
            status,
            price,
            confidence,
            publish_slot,
        }
    }

    pub fn to_bytes(&self) -> [u8; PUBLISH_COMMAND_SIZE] {
        let mut data = [0u8; PUBLISH_COMMAND_SIZE];
        data[0..4].copy_from_slice(&self.version.to_le_bytes());
        data[4..8].copy_from_slice(&self.command.to_le_bytes());
        data[8..12].copy_from_slice(&(self.status as u32).to_le_bytes());
        // 12..16 unused
        data[16..24].copy_from_slice(&self.price.to_le_bytes());
        data[24..32].copy_from_slice(&self.confidence.to_le_bytes());
        data[32..40].copy_from_slice(&self.publish_slot.to_le_bytes());
        data
    }
}
