//! Order-Book Oracle Bridge Program
//!
//! Reads an exchange market's live order book, converts the best bid and ask
//! into the oracle's fixed-point representation and publishes the midpoint
//! with a spread-derived confidence through one cross-program call.
//!
//! ## Instruction
//!
//! A single instruction. Its data is either empty (default policy) or a
//! 4-byte [`policy::PublishPolicy`].
//!
//! ## Price conversion
//!
//! ```text
//! scalar     = quote_lot * 10^(oracle_dp + base_dp - quote_dp) / base_lot
//! bid, ask   = best lot price * scalar
//! price      = (bid + ask) / 2
//! confidence = (|ask - bid| + (bid + ask) * fee_bps / 10_000) / 2
//! ```

#![cfg_attr(target_os = "solana", no_std)]

// Always expose entrypoint for testing, but only register as entrypoint when feature enabled
pub mod entrypoint;

pub mod instruction;
pub mod policy;
pub mod processor;
pub mod state;
pub mod walker;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;

// Panic handler for no_std builds (only for Solana BPF)
#[cfg(all(target_os = "solana", not(test)))]
#[panic_handler]
fn panic(_info: &core::panic::PanicInfo) -> ! {
    loop {}
}

pub use instruction::PublishCommand;
pub use policy::PublishPolicy;
pub use processor::{plan_publish, OutboundMeta, PublishPlan};

pinocchio_pubkey::declare_id!("FZd6ansVk7LbyAoxjpo59CeXLzpDXTRQVft1b7bqzt3");
