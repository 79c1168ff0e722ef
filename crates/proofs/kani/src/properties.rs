//! Kani proofs over the book walk and the policy decoder

use book_oracle_bridge::state::{BookView, Side};
use book_oracle_bridge::walker::best_price;
use book_oracle_bridge::PublishPolicy;
use book_oracle_common::BPS_SCALE;
use kani::any;
use crate::{generators::*, sanitizer::*};

fn any_side() -> Side {
    if any() {
        Side::Bid
    } else {
        Side::Ask
    }
}

/// Arbitrary trees, cycles included, never panic and never spin
#[kani::proof]
#[kani::unwind(5)]
fn walk_terminates_on_any_book() {
    let model = any_book().sanitize();
    let side = any_side();
    let data = model.encode(side);
    if let Ok(book) = BookView::decode(&data, side) {
        let _ = best_price(&book, side);
    }
}

/// A reported price always comes from a leaf
#[kani::proof]
#[kani::unwind(5)]
fn walk_returns_a_leaf_price() {
    let model = any_book().sanitize();
    let side = any_side();
    let data = model.encode(side);
    if let Ok(book) = BookView::decode(&data, side) {
        if let Ok(Some(price)) = best_price(&book, side) {
            kani::assert(model.has_leaf_price(price), "price must belong to a leaf");
        }
    }
}

#[kani::proof]
#[kani::unwind(5)]
fn empty_book_has_no_price() {
    let mut model = any_book().sanitize();
    model.leaf_count = 0;
    let side = any_side();
    let data = model.encode(side);
    if let Ok(book) = BookView::decode(&data, side) {
        kani::assert(best_price(&book, side) == Ok(None), "empty book must have no price");
    }
}

/// Book flags must match the side being read
#[kani::proof]
fn wrong_side_is_rejected() {
    let model = any_book().sanitize();
    let data = model.encode(Side::Bid);
    kani::assert(BookView::decode(&data, Side::Ask).is_err(), "bids read as asks must fail");
}

#[kani::proof]
fn policy_decode_bounds_fee() {
    let data: [u8; 4] = any();
    if let Ok(policy) = PublishPolicy::from_instruction_data(&data) {
        kani::assert(policy.fee_bps as u64 <= BPS_SCALE, "decoded fee must be at most 100%");
        kani::assert(policy.to_instruction_data() == data, "decoded policy must re-encode");
    }
}
