//! Publish pipeline
//!
//! Accounts:
//! 0. `[signer, writable]` Payer
//! 1. `[writable]` Oracle price account
//! 2. `[]` Exchange program
//! 3. `[]` Exchange market
//! 4. `[]` Exchange bids
//! 5. `[]` Exchange asks
//! 6. `[]` Quote mint
//! 7. `[]` Base mint
//! 8. `[]` Clock sysvar
//! 9. `[]` Oracle program
//! 10. `[]` Oracle parameter account (optional)
//!
//! Every constraint is checked in the order above before anything is
//! computed. The result is a [`PublishPlan`]; the entrypoint turns it into
//! exactly one cross-program call.

use crate::instruction::PublishCommand;
use crate::policy::PublishPolicy;
use crate::state::{
    BookView, ClockLayout, MarketLayout, MarketRefs, MintLayout, PriceAccountLayout, PriceStatus,
    Side, CLOCK_LAYOUT_SIZE, MINT_LAYOUT_SIZE, PRICE_ACCOUNT_SIZE, CLOCK_SYSVAR_ID,
};
use crate::walker::best_price;
use arrayvec::ArrayVec;
use book_oracle_common::{
    confidence_with_fee, derive_conversion_scalar, midpoint, validate_data_len, validate_executable,
    validate_key, validate_owner, validate_writable, AccountView, BridgeError, BridgeResult,
};
use pinocchio::{
    account_info::AccountInfo,
    cpi::invoke,
    instruction::{AccountMeta, Instruction},
    msg,
    pubkey::Pubkey,
    ProgramResult,
};

/// TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA
pub const TOKEN_PROGRAM_ID: Pubkey = pinocchio_pubkey::pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");

pub const PAYER: usize = 0;
pub const PRICE: usize = 1;
pub const EXCHANGE_PROGRAM: usize = 2;
pub const MARKET: usize = 3;
pub const BIDS: usize = 4;
pub const ASKS: usize = 5;
pub const QUOTE_MINT: usize = 6;
pub const BASE_MINT: usize = 7;
pub const CLOCK: usize = 8;
pub const ORACLE_PROGRAM: usize = 9;
pub const PARAMS: usize = 10;

pub const BASE_ACCOUNT_COUNT: usize = 10;
pub const MAX_ACCOUNT_COUNT: usize = 11;

/// Payer, price, clock and optionally the parameter account
pub const MAX_OUTBOUND: usize = 4;

/// One account reference of the outbound instruction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutboundMeta {
    /// Position in the inbound account list
    pub index: usize,
    pub is_writable: bool,
    pub is_signer: bool,
}

/// Fully validated price update, ready to be sent
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublishPlan {
    pub command: PublishCommand,
    pub outbound: ArrayVec<OutboundMeta, MAX_OUTBOUND>,
    /// Position of the oracle program in the inbound account list
    pub program_index: usize,
}

/// Returns whether the parameter account is present
pub fn check_account_count(count: usize) -> BridgeResult<bool> {
    match count {
        BASE_ACCOUNT_COUNT => Ok(false),
        MAX_ACCOUNT_COUNT => Ok(true),
        _ => {
            msg!("Error: Publish requires 10 or 11 accounts");
            Err(BridgeError::NotEnoughAccountKeys)
        }
    }
}

/// Validate the inbound accounts and compute the price update
pub fn plan_publish(accounts: &[AccountView], policy: &PublishPolicy) -> BridgeResult<PublishPlan> {
    let has_params = check_account_count(accounts.len())?;

    let payer = &accounts[PAYER];
    let price_account = &accounts[PRICE];
    let exchange_program = &accounts[EXCHANGE_PROGRAM];
    let market_account = &accounts[MARKET];
    let bids_account = &accounts[BIDS];
    let asks_account = &accounts[ASKS];
    let quote_mint = &accounts[QUOTE_MINT];
    let base_mint = &accounts[BASE_MINT];
    let clock_account = &accounts[CLOCK];
    let oracle_program = &accounts[ORACLE_PROGRAM];

    if !payer.is_signer || !payer.is_writable {
        msg!("Error: Payer must be a writable signer");
        return Err(BridgeError::MissingRequiredSignatures);
    }

    validate_key(clock_account, &CLOCK_SYSVAR_ID)?;
    validate_data_len(clock_account, CLOCK_LAYOUT_SIZE)?;
    let publish_slot = ClockLayout::decode(clock_account.data)?.slot.get();

    validate_executable(oracle_program)?;
    validate_executable(exchange_program)?;

    validate_owner(price_account, oracle_program.key)?;
    validate_writable(price_account)?;
    validate_data_len(price_account, PRICE_ACCOUNT_SIZE)?;
    let price_layout = PriceAccountLayout::decode(price_account.data)?;
    price_layout.validate()?;
    let oracle_exponent = price_layout.decimals()?;

    let quote_exponent = mint_decimals(quote_mint)?;
    let base_exponent = mint_decimals(base_mint)?;

    validate_owner(market_account, exchange_program.key)?;
    let market = MarketLayout::decode(market_account.data)?;
    market.check_refs(&MarketRefs {
        market: market_account.key,
        quote_mint: quote_mint.key,
        base_mint: base_mint.key,
        bids: bids_account.key,
        asks: asks_account.key,
    })?;
    let base_lot_size = market.base_lot_size.get();
    let quote_lot_size = market.quote_lot_size.get();

    let best_bid = book_best_price(bids_account, exchange_program.key, Side::Bid)?;
    let best_ask = book_best_price(asks_account, exchange_program.key, Side::Ask)?;

    if has_params {
        validate_owner(&accounts[PARAMS], oracle_program.key)?;
    }

    let (status, price, confidence) = match (best_bid, best_ask) {
        (Some(bid), Some(ask)) => {
            let scalar = derive_conversion_scalar(
                oracle_exponent,
                quote_exponent,
                base_exponent,
                quote_lot_size,
                base_lot_size,
            )
            .map_err(|e| {
                msg!("Error: Lot price conversion overflows");
                BridgeError::from(e)
            })?;

            let (bid, ask) = match (bid.checked_mul(scalar), ask.checked_mul(scalar)) {
                (Some(bid), Some(ask)) => (bid, ask),
                _ => {
                    msg!("Error: Converted price overflows");
                    return Err(BridgeError::InvalidAccountData);
                }
            };

            let mid = midpoint(bid, ask);
            let conf = confidence_with_fee(bid, ask, policy.fee_bps as u64);
            let price = i64::try_from(mid).map_err(|_| {
                msg!("Error: Converted price exceeds i64");
                BridgeError::InvalidAccountData
            })?;

            let status = if policy.confidence_too_wide(mid, conf) {
                msg!("Confidence too wide, publishing as unknown");
                PriceStatus::Unknown
            } else {
                PriceStatus::Trading
            };
            (status, price, conf)
        }
        _ => {
            msg!("Book side empty, publishing as unknown");
            (PriceStatus::Unknown, 0, 0)
        }
    };

    let mut outbound = ArrayVec::new();
    outbound.push(OutboundMeta { index: PAYER, is_writable: true, is_signer: true });
    outbound.push(OutboundMeta { index: PRICE, is_writable: true, is_signer: false });
    outbound.push(OutboundMeta { index: CLOCK, is_writable: false, is_signer: false });
    if has_params {
        outbound.push(OutboundMeta { index: PARAMS, is_writable: false, is_signer: false });
    }

    Ok(PublishPlan {
        command: PublishCommand::update_price(status, price, confidence, publish_slot),
        outbound,
        program_index: ORACLE_PROGRAM,
    })
}

fn mint_decimals(mint: &AccountView) -> BridgeResult<i32> {
    validate_owner(mint, &TOKEN_PROGRAM_ID)?;
    validate_data_len(mint, MINT_LAYOUT_SIZE)?;
    Ok(MintLayout::decode(mint.data)?.decimals as i32)
}

fn book_best_price(account: &AccountView, exchange_program: &Pubkey, side: Side) -> BridgeResult<Option<u64>> {
    validate_owner(account, exchange_program)?;
    let book = BookView::decode(account.data, side)?;
    best_price(&book, side)
}

/// Validate, plan and publish in one call
pub fn process_publish(accounts: &[AccountInfo], instruction_data: &[u8]) -> ProgramResult {
    let policy = PublishPolicy::from_instruction_data(instruction_data)?;
    check_account_count(accounts.len())?;

    let plan = {
        let mut views: ArrayVec<AccountView, MAX_ACCOUNT_COUNT> = ArrayVec::new();
        for info in accounts {
            // SAFETY: nothing in this invocation borrows account data mutably
            views.push(unsafe { AccountView::from_account_info(info) });
        }
        plan_publish(&views, &policy)?
    };

    let command = plan.command;
    pinocchio_log::log!(
        "Publishing price {} conf {} slot {}",
        command.price,
        command.confidence,
        command.publish_slot
    );

    let data = command.to_bytes();
    match plan.outbound.len() {
        3 => invoke_plan::<3>(&plan, accounts, &data),
        4 => invoke_plan::<4>(&plan, accounts, &data),
        _ => Err(BridgeError::InvalidArgument.into()),
    }
}

/// Outbound program id and account metas, resolved against the inbound keys
pub fn resolve_outbound<'a, const N: usize>(
    plan: &PublishPlan,
    keys: &[&'a Pubkey],
) -> BridgeResult<(&'a Pubkey, [AccountMeta<'a>; N])> {
    let in_range = plan.outbound.iter().all(|meta| meta.index < keys.len());
    if plan.outbound.len() != N || !in_range || plan.program_index >= keys.len() {
        msg!("Error: Publish plan does not match the account list");
        return Err(BridgeError::InvalidArgument);
    }

    let metas = core::array::from_fn(|i| {
        let meta = plan.outbound[i];
        AccountMeta::new(keys[meta.index], meta.is_writable, meta.is_signer)
    });
    Ok((keys[plan.program_index], metas))
}

fn invoke_plan<const N: usize>(plan: &PublishPlan, accounts: &[AccountInfo], data: &[u8]) -> ProgramResult {
    let keys: ArrayVec<&Pubkey, MAX_ACCOUNT_COUNT> = accounts.iter().map(AccountInfo::key).collect();
    let (program_id, metas) = resolve_outbound::<N>(plan, &keys)?;
    let infos: [&AccountInfo; N] = core::array::from_fn(|i| &accounts[plan.outbound[i].index]);

    let instruction = Instruction {
        program_id,
        accounts: &metas,
        data,
    };

    invoke::<N>(&instruction, &infos).map_err(|e| {
        msg!("Error: Oracle update CPI failed");
        e
    })
}

#[cfg(all(test, not(target_os = "solana")))]
#[path = "processor_test.rs"]
mod processor_test;
