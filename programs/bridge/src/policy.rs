//! Publish policy carried in the bridge's instruction data
//!
//! ```text
//! empty              -> default policy
//! fee_bps: u16 LE
//! max_conf_bps: u16 LE
//! ```

use crate::state::MAX_CI_DIVISOR;
use book_oracle_common::{BridgeError, BridgeResult, InstructionReader, BPS_SCALE, DEFAULT_FEE_BPS};
use pinocchio::msg;

pub const POLICY_DATA_LEN: usize = 4;

/// Widest confidence the oracle itself accepts, in basis points of price
pub const DEFAULT_MAX_CONF_BPS: u16 = (BPS_SCALE / MAX_CI_DIVISOR) as u16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublishPolicy {
    /// Aggressive fee assumed when widening the spread
    pub fee_bps: u16,
    /// Confidence above this share of price publishes as Unknown; 0 disables
    pub max_conf_bps: u16,
}

impl Default for PublishPolicy {
    fn default() -> Self {
        Self {
            fee_bps: DEFAULT_FEE_BPS as u16,
            max_conf_bps: DEFAULT_MAX_CONF_BPS,
        }
    }
}

impl PublishPolicy {
    pub fn from_instruction_data(data: &[u8]) -> BridgeResult<Self> {
        if data.is_empty() {
            return Ok(Self::default());
        }
        if data.len() != POLICY_DATA_LEN {
            msg!("Error: Policy data must be empty or 4 bytes");
            return Err(BridgeError::InvalidArgument);
        }

        let mut reader = InstructionReader::new(data);
        let fee_bps = reader.read_u16()?;
        let max_conf_bps = reader.read_u16()?;
        reader.finish()?;

        if fee_bps as u64 > BPS_SCALE {
            msg!("Error: Fee exceeds 100%");
            return Err(BridgeError::InvalidArgument);
        }

        Ok(Self { fee_bps, max_conf_bps })
    }

    pub fn to_instruction_data(&self) -> [u8; POLICY_DATA_LEN] {
        let mut data = [0u8; POLICY_DATA_LEN];
        data[0..2].copy_from_slice(&self.fee_bps.to_le_bytes());
        data[2..4].copy_from_slice(&self.max_conf_bps.to_le_bytes());
        data
    }

    /// `confidence / price > max_conf_bps / 10_000`
    pub fn confidence_too_wide(&self, price: u64, confidence: u64) -> bool {
        if self.max_conf_bps == 0 {
            return false;
        }
        (confidence as u128) * (BPS_SCALE as u128) > (price as u128) * (self.max_conf_bps as u128)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_policy() {
        let policy = PublishPolicy::default();
        assert_eq!(policy.fee_bps, 10);
        assert_eq!(policy.max_conf_bps, 500);
        assert_eq!(PublishPolicy::from_instruction_data(&[]), Ok(policy));
    }

    #[test]
    fn test_parse_policy() {
        let policy = PublishPolicy::from_instruction_data(&[25, 0, 0xE8, 0x03]).unwrap();
        assert_eq!(policy.fee_bps, 25);
        assert_eq!(policy.max_conf_bps, 1000);
        assert_eq!(PublishPolicy::from_instruction_data(&policy.to_instruction_data()), Ok(policy));
    }

    #[test]
    fn test_parse_rejects_bad_length() {
        for len in [1, 2, 3, 5, 8] {
            let data = vec![0u8; len];
            assert_eq!(
                PublishPolicy::from_instruction_data(&data),
                Err(BridgeError::InvalidArgument)
            );
        }
    }

    #[test]
    fn test_parse_fee_limit() {
        let at_limit = PublishPolicy { fee_bps: 10_000, max_conf_bps: 0 };
        assert_eq!(
            PublishPolicy::from_instruction_data(&at_limit.to_instruction_data()),
            Ok(at_limit)
        );
        let over = PublishPolicy { fee_bps: 10_001, max_conf_bps: 0 };
        assert_eq!(
            PublishPolicy::from_instruction_data(&over.to_instruction_data()),
            Err(BridgeError::InvalidArgument)
        );
    }

    #[test]
    fn test_confidence_limit() {
        let policy = PublishPolicy::default();
        // 5% of 1000 is 50
        assert!(!policy.confidence_too_wide(1000, 50));
        assert!(policy.confidence_too_wide(1000, 51));
        assert!(policy.confidence_too_wide(0, 1));
        assert!(!policy.confidence_too_wide(0, 0));
        assert!(!policy.confidence_too_wide(u64::MAX, u64::MAX / 20));

        let disabled = PublishPolicy { max_conf_bps: 0, ..policy };
        assert!(!disabled.confidence_too_wide(1, u64::MAX));
    }

    proptest! {
        #[test]
        fn prop_parse_accepts_fee_up_to_scale(data in any::<[u8; POLICY_DATA_LEN]>()) {
            let fee = u16::from_le_bytes([data[0], data[1]]);
            match PublishPolicy::from_instruction_data(&data) {
                Ok(policy) => {
                    prop_assert!(fee as u64 <= BPS_SCALE);
                    prop_assert_eq!(policy.to_instruction_data(), data);
                }
                Err(e) => {
                    prop_assert!(fee as u64 > BPS_SCALE);
                    prop_assert_eq!(e, BridgeError::InvalidArgument);
                }
            }
        }

        #[test]
        fn prop_limit_matches_ratio(price in 1u64..1_000_000_000, conf in any::<u32>(), bps in 1u16..=10_000) {
            let policy = PublishPolicy { fee_bps: 0, max_conf_bps: bps };
            let ratio_bps = conf as f64 * 10_000.0 / price as f64;
            if ratio_bps > bps as f64 + 1e-6 {
                prop_assert!(policy.confidence_too_wide(price, conf as u64));
            } else if ratio_bps < bps as f64 - 1e-6 {
                prop_assert!(!policy.confidence_too_wide(price, conf as u64));
            }
        }
    }
}
