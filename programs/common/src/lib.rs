//! Shared kernel for the order-book oracle bridge
//!
//! Error taxonomy, zero-copy layout helpers, fixed-point scaling and the
//! account validation helpers used by the on-chain program.

#![cfg_attr(target_os = "solana", no_std)]

pub mod account;
pub mod error;
pub mod instruction;
pub mod layout;
pub mod math;

pub use account::*;
pub use error::*;
pub use instruction::*;
pub use layout::*;
pub use math::*;
