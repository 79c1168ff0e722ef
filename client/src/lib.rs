//! Off-chain helper for the order-book oracle bridge
//!
//! Loads a market feed description and builds the unsigned publish
//! instruction with the account order the program expects.

pub mod config;
pub mod ix_builder;

pub use config::{ClientError, FeedAccounts, FeedConfig, PolicyConfig};
pub use ix_builder::build_publish_instruction;
