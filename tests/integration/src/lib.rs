//! Order-Book Oracle Integration Tests
//!
//! Bridges the host-side client and the on-chain pipeline: the client builds
//! the publish instruction from a feed config, and the accounts it names are
//! looked up in a fixture set and fed to the program in instruction order.

use book_oracle_bridge::fixtures::{AccountFixture, FeedFixture};
use book_oracle_bridge::processor::{
    ASKS, BASE_MINT, BIDS, EXCHANGE_PROGRAM, MARKET, ORACLE_PROGRAM, PARAMS, PAYER, PRICE, QUOTE_MINT,
};
use book_oracle_client::{FeedConfig, PolicyConfig};
use book_oracle_common::AccountView;
use solana_sdk::{instruction::Instruction, pubkey::Pubkey};

fn key_string(account: &AccountFixture) -> String {
    Pubkey::new_from_array(account.key).to_string()
}

/// Feed configuration naming the fixture's accounts
pub fn feed_config(fixture: &FeedFixture, policy: Option<PolicyConfig>) -> FeedConfig {
    let key = |index: usize| key_string(fixture.account(index));
    FeedConfig {
        bridge_program: None,
        payer: key(PAYER),
        price_account: key(PRICE),
        exchange_program: key(EXCHANGE_PROGRAM),
        market: key(MARKET),
        bids: key(BIDS),
        asks: key(ASKS),
        quote_mint: key(QUOTE_MINT),
        base_mint: key(BASE_MINT),
        oracle_program: key(ORACLE_PROGRAM),
        param_account: fixture.accounts.get(PARAMS).map(key_string),
        policy,
    }
}

/// Resolve the instruction's account list against the fixture
///
/// Signer and writable flags come from the instruction metas, the way the
/// runtime would present them. Returns `None` if a key is not in the fixture.
pub fn views_for_instruction<'a>(fixture: &'a FeedFixture, ix: &Instruction) -> Option<Vec<AccountView<'a>>> {
    ix.accounts
        .iter()
        .map(|meta| {
            let account = fixture
                .accounts
                .iter()
                .find(|a| a.key == meta.pubkey.to_bytes())?;
            log::debug!("resolved {} from instruction", meta.pubkey);
            let mut view = account.view();
            view.is_signer = meta.is_signer;
            view.is_writable = meta.is_writable;
            Some(view)
        })
        .collect()
}
