//! Best-price lookup on one side of the book

use crate::state::{BookView, Node, Side};
use book_oracle_common::{BridgeError, BridgeResult};
use pinocchio::msg;

/// Follow the tree from the root to the best resting price
///
/// Bids descend through child B (highest key), asks through child A (lowest
/// key). Returns `None` for an empty book. At most `capacity` nodes are
/// visited, so a cyclic tree is rejected instead of spinning.
pub fn best_price(book: &BookView, side: Side) -> BridgeResult<Option<u64>> {
    let capacity = book.capacity();
    if book.leaf_count() > capacity as u64 {
        msg!("Error: Book leaf count exceeds node capacity");
        return Err(BridgeError::InvalidAccountData);
    }
    if book.leaf_count() == 0 {
        return Ok(None);
    }

    let mut index = book.root();
    for _ in 0..capacity {
        match book.node(index)? {
            Node::Leaf(leaf) => return Ok(Some(leaf.price())),
            Node::Inner(inner) => index = side.best_child(inner),
            Node::Free | Node::Uninitialized => {
                msg!("Error: Book walk reached an unused node");
                return Err(BridgeError::InvalidAccountData);
            }
        }
    }

    msg!("Error: Book walk exceeded node capacity");
    Err(BridgeError::InvalidAccountData)
}
