//! Market feed configuration

use anyhow::{Context, Result};
use book_oracle_bridge::PublishPolicy;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "BOOK_ORACLE_CONFIG";

pub const DEFAULT_CONFIG_PATH: &str = "book-oracle.toml";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClientError {
    #[error("invalid pubkey for `{field}`: {value}")]
    InvalidPubkey { field: &'static str, value: String },

    #[error("fee_bps {0} exceeds 10000")]
    FeeOutOfRange(u16),
}

/// Optional override of the on-chain publish policy
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PolicyConfig {
    pub fee_bps: u16,
    pub max_conf_bps: u16,
}

/// One exchange market feeding one oracle price account
///
/// Keys are base58 strings so the file stays hand-editable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedConfig {
    /// Bridge program; defaults to the compiled-in program id
    #[serde(default)]
    pub bridge_program: Option<String>,

    /// Fee payer, must sign the eventual transaction
    pub payer: String,

    /// Oracle price account to update
    pub price_account: String,

    pub exchange_program: String,
    pub market: String,
    pub bids: String,
    pub asks: String,
    pub quote_mint: String,
    pub base_mint: String,
    pub oracle_program: String,

    /// Oracle parameter account, selects the 11-account variant
    #[serde(default)]
    pub param_account: Option<String>,

    #[serde(default)]
    pub policy: Option<PolicyConfig>,
}

/// Resolved keys for one publish instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedAccounts {
    pub bridge_program: Pubkey,
    pub payer: Pubkey,
    pub price_account: Pubkey,
    pub exchange_program: Pubkey,
    pub market: Pubkey,
    pub bids: Pubkey,
    pub asks: Pubkey,
    pub quote_mint: Pubkey,
    pub base_mint: Pubkey,
    pub oracle_program: Pubkey,
    pub param_account: Option<Pubkey>,
}

fn parse_key(field: &'static str, value: &str) -> Result<Pubkey, ClientError> {
    Pubkey::from_str(value).map_err(|_| ClientError::InvalidPubkey {
        field,
        value: value.to_string(),
    })
}

impl FeedConfig {
    /// Load configuration from the file named by `BOOK_ORACLE_CONFIG`
    pub fn load() -> Result<Self> {
        let config_path =
            std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(Path::new(&config_path))
    }

    /// Load configuration from a TOML file
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: FeedConfig = toml::from_str(&config_str)
            .context("Failed to parse config TOML")?;

        log::debug!("Loaded feed config from {}", path.display());
        Ok(config)
    }

    pub fn resolve(&self) -> Result<FeedAccounts, ClientError> {
        let bridge_program = match &self.bridge_program {
            Some(key) => parse_key("bridge_program", key)?,
            None => Pubkey::new_from_array(book_oracle_bridge::ID),
        };
        let param_account = self
            .param_account
            .as_deref()
            .map(|key| parse_key("param_account", key))
            .transpose()?;

        Ok(FeedAccounts {
            bridge_program,
            payer: parse_key("payer", &self.payer)?,
            price_account: parse_key("price_account", &self.price_account)?,
            exchange_program: parse_key("exchange_program", &self.exchange_program)?,
            market: parse_key("market", &self.market)?,
            bids: parse_key("bids", &self.bids)?,
            asks: parse_key("asks", &self.asks)?,
            quote_mint: parse_key("quote_mint", &self.quote_mint)?,
            base_mint: parse_key("base_mint", &self.base_mint)?,
            oracle_program: parse_key("oracle_program", &self.oracle_program)?,
            param_account,
        })
    }

    /// On-chain policy, or `None` to send empty instruction data
    pub fn publish_policy(&self) -> Result<Option<PublishPolicy>, ClientError> {
        match self.policy {
            None => Ok(None),
            Some(p) if p.fee_bps > 10_000 => Err(ClientError::FeeOutOfRange(p.fee_bps)),
            Some(p) => Ok(Some(PublishPolicy {
                fee_bps: p.fee_bps,
                max_conf_bps: p.max_conf_bps,
            })),
        }
    }
}
