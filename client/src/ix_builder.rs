//! Publish instruction builder
//!
//! Produces the unsigned instruction; signing and submission are left to the
//! caller.

use crate::config::FeedAccounts;
use book_oracle_bridge::PublishPolicy;
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    sysvar,
};

/// Build the bridge's publish instruction
///
/// Account order matches the on-chain pipeline: payer, price, exchange
/// program, market, bids, asks, quote mint, base mint, clock, oracle program
/// and, when configured, the oracle parameter account.
pub fn build_publish_instruction(feed: &FeedAccounts, policy: Option<&PublishPolicy>) -> Instruction {
    let mut accounts = vec![
        AccountMeta::new(feed.payer, true),
        AccountMeta::new(feed.price_account, false),
        AccountMeta::new_readonly(feed.exchange_program, false),
        AccountMeta::new_readonly(feed.market, false),
        AccountMeta::new_readonly(feed.bids, false),
        AccountMeta::new_readonly(feed.asks, false),
        AccountMeta::new_readonly(feed.quote_mint, false),
        AccountMeta::new_readonly(feed.base_mint, false),
        AccountMeta::new_readonly(sysvar::clock::ID, false),
        AccountMeta::new_readonly(feed.oracle_program, false),
    ];
    if let Some(param_account) = feed.param_account {
        accounts.push(AccountMeta::new_readonly(param_account, false));
    }

    let data = policy
        .map(|p| p.to_instruction_data().to_vec())
        .unwrap_or_default();

    log::debug!(
        "Built publish instruction: {} accounts, {} data bytes",
        accounts.len(),
        data.len()
    );

    Instruction {
        program_id: feed.bridge_program,
        accounts,
        data,
    }
}
