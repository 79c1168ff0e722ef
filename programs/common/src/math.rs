//! Fixed-point rescaling and confidence math
//!
//! All quantities are unsigned 64-bit. `SIZE_OVERFLOW` (all ones) is never a
//! valid result: any checked step that would reach it reports `ScaleOverflow`.

use crate::error::ScaleOverflow;

/// Powers of ten representable in a u64
pub const POW10: [u64; 20] = pow10_table();

/// Largest exponent with a table entry
pub const EXP_MAX: u32 = (POW10.len() - 1) as u32;

/// Reserved as the overflow marker
pub const SIZE_OVERFLOW: u64 = u64::MAX;

/// Largest usable value
pub const SIZE_MAX: u64 = SIZE_OVERFLOW - 1;

/// Basis points scale (10,000 bps = 100%)
pub const BPS_SCALE: u64 = 10_000;

/// Best aggressive fee assumed when widening the spread
pub const DEFAULT_FEE_BPS: u64 = 10;

const fn pow10_table() -> [u64; 20] {
    let mut table = [1u64; 20];
    let mut i = 1;
    while i < table.len() {
        table[i] = table[i - 1] * 10;
        i += 1;
    }
    table
}

/// Calculate `numerator * 10^exponent / denominator`, rounding down
///
/// A negative exponent divides by `10^|exponent|`. Exponents past the table
/// are folded one power at a time into the numerator (positive) or the
/// denominator (negative). Folding the numerator past `SIZE_MAX` is an
/// overflow; folding the denominator past it means the quotient is below one,
/// so the result saturates to zero.
///
/// A zero denominator is always an overflow.
pub fn scale_divide(numerator: u64, denominator: u64, exponent: i32) -> Result<u64, ScaleOverflow> {
    if denominator == 0 {
        return Err(ScaleOverflow);
    }
    if numerator == 0 {
        return Ok(0);
    }

    let mut numer = numerator;
    let mut denom = denominator;
    let mut exp = exponent.unsigned_abs();

    if exponent >= 0 {
        while exp > EXP_MAX {
            if numer >= SIZE_MAX / 10 {
                return Err(ScaleOverflow);
            }
            numer *= 10;
            exp -= 1;
        }
        let scale = POW10[exp as usize];
        if numer >= SIZE_MAX / scale {
            return Err(ScaleOverflow);
        }
        numer *= scale;
    } else {
        while exp > EXP_MAX {
            if denom >= SIZE_MAX / 10 {
                return Ok(0);
            }
            denom *= 10;
            exp -= 1;
        }
        let scale = POW10[exp as usize];
        if denom >= SIZE_MAX / scale {
            return Ok(0);
        }
        denom *= scale;
    }

    Ok(numer / denom)
}

/// Multiplier converting an order-book price (quote lots per base lot) into
/// oracle fixed-point units
///
/// ```text
/// scale = 10^oracle_exp / (10^quote_exp / 10^base_exp)
///       = 10^(oracle_exp + base_exp - quote_exp)
/// scalar = scale * quote_lot_size / base_lot_size
/// ```
///
/// # Arguments
/// * `oracle_exponent` - Decimal places of the oracle price (negated stored exponent)
/// * `quote_exponent` - Quote mint decimals
/// * `base_exponent` - Base mint decimals
/// * `quote_lot_size` - Native quote units per quote lot
/// * `base_lot_size` - Native base units per base lot
pub fn derive_conversion_scalar(
    oracle_exponent: i32,
    quote_exponent: i32,
    base_exponent: i32,
    quote_lot_size: u64,
    base_lot_size: u64,
) -> Result<u64, ScaleOverflow> {
    let scale_exponent = oracle_exponent
        .checked_add(base_exponent)
        .and_then(|e| e.checked_sub(quote_exponent))
        .ok_or(ScaleOverflow)?;
    scale_divide(quote_lot_size, base_lot_size, scale_exponent)
}

/// Average of bid and ask without the `(bid + ask) / 2` intermediate overflow
pub fn midpoint(bid: u64, ask: u64) -> u64 {
    let sum_mod2 = (bid % 2) + (ask % 2);
    (bid / 2) + (ask / 2) + (sum_mod2 / 2)
}

/// Half the bid-ask spread, widened by the default aggressive fee
pub fn confidence(bid: u64, ask: u64) -> u64 {
    confidence_with_fee(bid, ask, DEFAULT_FEE_BPS)
}

/// Half the fee-adjusted bid-ask spread
///
/// ```text
/// spread = ask * (1 + fee) - bid * (1 - fee)
///        = (ask - bid) + (ask + bid) * fee
/// ```
pub fn confidence_with_fee(bid: u64, ask: u64, fee_bps: u64) -> u64 {
    let spread = bid.abs_diff(ask) as u128;
    let fee = (bid as u128 + ask as u128) * fee_bps as u128 / BPS_SCALE as u128;
    u64::try_from((spread + fee) / 2).unwrap_or(u64::MAX)
}
