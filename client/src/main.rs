//! Print the publish instruction for a configured feed
//!
//! Reads the feed from `BOOK_ORACLE_CONFIG` (default `book-oracle.toml`) and
//! logs the resulting accounts and data. Nothing is signed or sent.

use anyhow::{Context, Result};
use book_oracle_client::{build_publish_instruction, FeedConfig};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = FeedConfig::load()?;
    let feed = config.resolve().context("Invalid feed accounts")?;
    let policy = config.publish_policy().context("Invalid publish policy")?;

    let ix = build_publish_instruction(&feed, policy.as_ref());

    log::info!("Bridge program: {}", ix.program_id);
    for (index, meta) in ix.accounts.iter().enumerate() {
        log::info!(
            "  {:>2} {} signer={} writable={}",
            index,
            meta.pubkey,
            meta.is_signer,
            meta.is_writable
        );
    }
    log::info!("Instruction data: {:?}", ix.data);

    Ok(())
}
