//! Kani proofs for the fixed-point kernel

use book_oracle_common::{
    confidence, confidence_with_fee, derive_conversion_scalar, midpoint, scale_divide, BPS_SCALE,
    POW10, SIZE_MAX,
};
use kani::{any, assume};
use crate::{generators::*, sanitizer::*};

/// Scaling never panics for any exponent; both fold loops stop within 20 steps
#[kani::proof]
#[kani::unwind(22)]
fn scale_divide_never_panics() {
    let numerator: u64 = any();
    let denominator: u64 = any();
    let exponent: i32 = any();
    let _ = scale_divide(numerator, denominator, exponent);
}

#[kani::proof]
#[kani::unwind(22)]
fn zero_denominator_is_overflow() {
    let inputs = any_scale_inputs().sanitize();
    kani::assert(
        scale_divide(inputs.numerator, 0, inputs.exponent).is_err(),
        "zero denominator must overflow",
    );
}

/// Shrinking never overflows, it saturates to zero instead
#[kani::proof]
#[kani::unwind(22)]
fn negative_exponent_never_overflows() {
    let inputs = any_scale_inputs().sanitize();
    assume(inputs.denominator != 0);
    assume(inputs.exponent < 0);
    kani::assert(
        scale_divide(inputs.numerator, inputs.denominator, inputs.exponent).is_ok(),
        "negative exponent must not overflow",
    );
}

/// Small inputs agree with exact wide arithmetic
#[kani::proof]
#[kani::unwind(22)]
fn small_scale_is_exact() {
    let numerator: u16 = any();
    let denominator: u16 = any();
    let exponent: u8 = any();
    assume(denominator != 0);
    assume(exponent <= 3);

    let expected = numerator as u128 * POW10[exponent as usize] as u128 / denominator as u128;
    let result = scale_divide(numerator as u64, denominator as u64, exponent as i32);
    kani::assert(result == Ok(expected as u64), "small scale must be exact");
}

/// Every success stays below the overflow sentinel
#[kani::proof]
#[kani::unwind(22)]
fn scale_result_below_sentinel() {
    let inputs = any_scale_inputs().sanitize();
    if let Ok(value) = scale_divide(inputs.numerator, inputs.denominator, inputs.exponent) {
        kani::assert(value < SIZE_MAX, "result must stay below SIZE_MAX");
    }
}

/// Exponent arithmetic is checked for any mint and oracle decimals
#[kani::proof]
#[kani::unwind(22)]
fn conversion_scalar_never_panics() {
    let _ = derive_conversion_scalar(any(), any(), any(), any(), any());
}

#[kani::proof]
fn midpoint_is_between_bid_and_ask() {
    let bid: u64 = any();
    let ask: u64 = any();
    let mid = midpoint(bid, ask);
    kani::assert(mid >= bid.min(ask), "midpoint below both sides");
    kani::assert(mid <= bid.max(ask), "midpoint above both sides");
    kani::assert(
        mid as u128 == (bid as u128 + ask as u128) / 2,
        "midpoint must equal the wide average",
    );
}

#[kani::proof]
fn confidence_is_symmetric() {
    let bid: u64 = any();
    let ask: u64 = any();
    kani::assert(confidence(bid, ask) == confidence(ask, bid), "confidence must be symmetric");
}

/// A wider fee never narrows the band
#[kani::proof]
fn confidence_monotone_in_fee() {
    let bid: u64 = any();
    let ask: u64 = any();
    let fee: u16 = any();
    let wider: u16 = any();
    assume(fee as u64 <= BPS_SCALE && wider >= fee && wider as u64 <= BPS_SCALE);
    kani::assert(
        confidence_with_fee(bid, ask, fee as u64) <= confidence_with_fee(bid, ask, wider as u64),
        "confidence must grow with the fee",
    );
}
