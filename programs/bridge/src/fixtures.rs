//! Host-side account builders for exercising the publish pipeline
//!
//! `FeedFixture::new()` produces ten accounts that pass every check, with a
//! one-order book on each side at price 1 and all exponents and lot sizes at
//! their identity values.

use crate::processor::*;
use crate::state::{
    tag, AccountFlags, BookHeader, ClockLayout, MarketLayout, MintLayout, PriceAccountLayout, Side,
    ACCOUNT_TYPE_PRICE, CLOCK_SYSVAR_ID, HEAD_TAG, MAGIC, NODE_SIZE, PRICE_TYPE_PRICE, TAIL_TAG,
    VERSION,
};
use book_oracle_common::{AccountView, LeI32, LeU32, LeU64, Pod};
use pinocchio::pubkey::Pubkey;

/// Owner of program accounts
pub const LOADER_ID: Pubkey = [0xAA; 32];

/// Owner of wallets and sysvars in fixtures
pub const SYSTEM_ID: Pubkey = [0; 32];

pub const DEFAULT_SLOT: u64 = 42;

#[derive(Clone, Debug)]
pub struct AccountFixture {
    pub key: Pubkey,
    pub owner: Pubkey,
    pub data: Vec<u8>,
    pub is_signer: bool,
    pub is_writable: bool,
    pub executable: bool,
}

impl AccountFixture {
    pub fn new(key: Pubkey, owner: Pubkey, data: Vec<u8>) -> Self {
        Self {
            key,
            owner,
            data,
            is_signer: false,
            is_writable: false,
            executable: false,
        }
    }

    pub fn view(&self) -> AccountView<'_> {
        AccountView {
            key: &self.key,
            owner: &self.owner,
            data: &self.data,
            is_signer: self.is_signer,
            is_writable: self.is_writable,
            executable: self.executable,
        }
    }
}

/// Tree node description for building book accounts
#[derive(Clone, Copy, Debug)]
pub enum NodeSpec {
    Uninitialized,
    Inner { child_a: u32, child_b: u32 },
    Leaf { price: u64 },
    Free,
    LastFree,
    /// Arbitrary tag with an otherwise zeroed body
    Raw(u32),
}

impl NodeSpec {
    pub fn encode(&self) -> [u8; NODE_SIZE] {
        let mut node = [0u8; NODE_SIZE];
        let node_tag = match *self {
            NodeSpec::Uninitialized => tag::UNINITIALIZED,
            NodeSpec::Inner { child_a, child_b } => {
                node[24..28].copy_from_slice(&child_a.to_le_bytes());
                node[28..32].copy_from_slice(&child_b.to_le_bytes());
                tag::INNER
            }
            NodeSpec::Leaf { price } => {
                node[16..24].copy_from_slice(&price.to_le_bytes());
                tag::LEAF
            }
            NodeSpec::Free => tag::FREE,
            NodeSpec::LastFree => tag::LAST_FREE,
            NodeSpec::Raw(raw) => raw,
        };
        node[..4].copy_from_slice(&node_tag.to_le_bytes());
        node
    }
}

/// Wrap a body in the exchange envelope
pub fn framed(flags: AccountFlags, body: &[u8]) -> Vec<u8> {
    let mut data = Vec::with_capacity(HEAD_TAG.len() + 8 + body.len() + TAIL_TAG.len());
    data.extend_from_slice(HEAD_TAG);
    data.extend_from_slice(&flags.bits().to_le_bytes());
    data.extend_from_slice(body);
    data.extend_from_slice(TAIL_TAG);
    data
}

/// Framed book account for `side`
pub fn book_account_data(side: Side, root: u32, leaf_count: u64, nodes: &[NodeSpec]) -> Vec<u8> {
    let mut header = BookHeader::zeroed();
    header.root = LeU32::new(root);
    header.leaf_count = LeU64::new(leaf_count);

    let mut body = header.as_bytes().to_vec();
    for node in nodes {
        body.extend_from_slice(&node.encode());
    }
    framed(AccountFlags::INITIALIZED.union(side.flag()), &body)
}

/// Book whose single order sits one level below an inner root
pub fn one_order_book(side: Side, price: u64) -> Vec<u8> {
    let root = match side {
        Side::Bid => NodeSpec::Inner { child_a: u32::MAX, child_b: 1 },
        Side::Ask => NodeSpec::Inner { child_a: 1, child_b: u32::MAX },
    };
    book_account_data(side, 0, 1, &[root, NodeSpec::Leaf { price }])
}

fn fixture_key(index: usize) -> Pubkey {
    [index as u8 + 1; 32]
}

/// Complete, valid account set for one publish
#[derive(Clone, Debug)]
pub struct FeedFixture {
    pub accounts: Vec<AccountFixture>,
}

impl Default for FeedFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedFixture {
    pub fn new() -> Self {
        let oracle_program_key = fixture_key(ORACLE_PROGRAM);
        let exchange_program_key = fixture_key(EXCHANGE_PROGRAM);

        let mut payer = AccountFixture::new(fixture_key(PAYER), SYSTEM_ID, Vec::new());
        payer.is_signer = true;
        payer.is_writable = true;

        let mut price = AccountFixture::new(fixture_key(PRICE), oracle_program_key, price_account_data(0));
        price.is_writable = true;

        let mut exchange_program = AccountFixture::new(exchange_program_key, LOADER_ID, Vec::new());
        exchange_program.executable = true;

        let mut oracle_program = AccountFixture::new(oracle_program_key, LOADER_ID, Vec::new());
        oracle_program.executable = true;

        let clock = AccountFixture::new(CLOCK_SYSVAR_ID, SYSTEM_ID, clock_data(DEFAULT_SLOT));

        let mut fixture = Self {
            accounts: vec![
                payer,
                price,
                exchange_program,
                AccountFixture::new(fixture_key(MARKET), exchange_program_key, Vec::new()),
                AccountFixture::new(fixture_key(BIDS), exchange_program_key, one_order_book(Side::Bid, 1)),
                AccountFixture::new(fixture_key(ASKS), exchange_program_key, one_order_book(Side::Ask, 1)),
                AccountFixture::new(fixture_key(QUOTE_MINT), TOKEN_PROGRAM_ID, mint_data(0)),
                AccountFixture::new(fixture_key(BASE_MINT), TOKEN_PROGRAM_ID, mint_data(0)),
                clock,
                oracle_program,
            ],
        };
        fixture.rebuild_market(1, 1);
        fixture
    }

    /// Eleven-account variant with an oracle-owned parameter account
    pub fn with_params() -> Self {
        let mut fixture = Self::new();
        let params = AccountFixture::new(fixture_key(PARAMS), fixture_key(ORACLE_PROGRAM), vec![0; 16]);
        fixture.accounts.push(params);
        fixture
    }

    pub fn views(&self) -> Vec<AccountView<'_>> {
        self.accounts.iter().map(AccountFixture::view).collect()
    }

    pub fn account(&self, index: usize) -> &AccountFixture {
        &self.accounts[index]
    }

    pub fn account_mut(&mut self, index: usize) -> &mut AccountFixture {
        &mut self.accounts[index]
    }

    /// Market header consistent with the current account keys
    pub fn rebuild_market(&mut self, quote_lot_size: u64, base_lot_size: u64) {
        let mut layout = MarketLayout::zeroed();
        layout.own_address = self.accounts[MARKET].key;
        layout.base_mint = self.accounts[BASE_MINT].key;
        layout.quote_mint = self.accounts[QUOTE_MINT].key;
        layout.bids = self.accounts[BIDS].key;
        layout.asks = self.accounts[ASKS].key;
        layout.base_lot_size = LeU64::new(base_lot_size);
        layout.quote_lot_size = LeU64::new(quote_lot_size);
        self.accounts[MARKET].data = framed(AccountFlags::INITIALIZED.union(AccountFlags::MARKET), layout.as_bytes());
    }

    pub fn market_mut(&mut self) -> &mut MarketLayout {
        let body = &mut self.accounts[MARKET].data[HEAD_TAG.len() + 8..];
        MarketLayout::mut_from(body).expect("market fixture too small")
    }

    pub fn set_lot_sizes(&mut self, quote_lot_size: u64, base_lot_size: u64) {
        let market = self.market_mut();
        market.quote_lot_size = LeU64::new(quote_lot_size);
        market.base_lot_size = LeU64::new(base_lot_size);
    }

    /// Stored oracle exponent (negative for decimal places)
    pub fn set_price_exponent(&mut self, exponent: i32) {
        self.accounts[PRICE].data = price_account_data(exponent);
    }

    pub fn set_mint_decimals(&mut self, quote_decimals: u8, base_decimals: u8) {
        self.accounts[QUOTE_MINT].data = mint_data(quote_decimals);
        self.accounts[BASE_MINT].data = mint_data(base_decimals);
    }

    /// One resting order per side; `None` leaves that side empty
    pub fn set_best_prices(&mut self, bid: Option<u64>, ask: Option<u64>) {
        self.accounts[BIDS].data = match bid {
            Some(price) => one_order_book(Side::Bid, price),
            None => book_account_data(Side::Bid, 0, 0, &[]),
        };
        self.accounts[ASKS].data = match ask {
            Some(price) => one_order_book(Side::Ask, price),
            None => book_account_data(Side::Ask, 0, 0, &[]),
        };
    }

    pub fn set_slot(&mut self, slot: u64) {
        self.accounts[CLOCK].data = clock_data(slot);
    }
}

pub fn price_account_data(exponent: i32) -> Vec<u8> {
    let mut layout = PriceAccountLayout::zeroed();
    layout.magic = LeU32::new(MAGIC);
    layout.version = LeU32::new(VERSION);
    layout.account_type = LeU32::new(ACCOUNT_TYPE_PRICE);
    layout.size = LeU32::new(PriceAccountLayout::LEN as u32);
    layout.price_type = LeU32::new(PRICE_TYPE_PRICE);
    layout.exponent = LeI32::new(exponent);
    layout.as_bytes().to_vec()
}

pub fn mint_data(decimals: u8) -> Vec<u8> {
    let mut layout = MintLayout::zeroed();
    layout.decimals = decimals;
    layout.is_initialized = 1;
    layout.as_bytes().to_vec()
}

pub fn clock_data(slot: u64) -> Vec<u8> {
    let mut layout = ClockLayout::zeroed();
    layout.slot = LeU64::new(slot);
    layout.as_bytes().to_vec()
}
