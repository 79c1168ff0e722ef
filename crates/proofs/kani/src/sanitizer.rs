//! Input models bounded for Kani exploration

use book_oracle_bridge::state::{
    AccountFlags, BookHeader, Side, BOOK_HEADER_SIZE, HEAD_TAG, NODE_SIZE, TAIL_TAG,
};
use book_oracle_common::{LeU32, LeU64, Pod};

/// Nodes per modelled book
pub const MAX_NODES: usize = 3;

/// Framed book account holding `MAX_NODES` nodes
pub const BOOK_BYTES: usize = 5 + 8 + BOOK_HEADER_SIZE + MAX_NODES * NODE_SIZE + 7;

/// Exponent range wide enough to hit both fold loops
pub const MAX_EXPONENT: i32 = 25;

/// Largest tag explored; covers every valid tag plus one invalid
const MAX_TAG: u32 = 5;

pub trait Sanitize {
    fn sanitize(self) -> Self;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NodeModel {
    pub tag: u32,
    pub child_a: u32,
    pub child_b: u32,
    pub price: u64,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BookModel {
    pub root: u32,
    pub leaf_count: u64,
    pub nodes: [NodeModel; MAX_NODES],
}

#[derive(Clone, Copy, Debug)]
pub struct ScaleInputs {
    pub numerator: u64,
    pub denominator: u64,
    pub exponent: i32,
}

impl Sanitize for NodeModel {
    fn sanitize(mut self) -> Self {
        self.tag %= MAX_TAG + 1;
        // One past the end so out-of-range children stay reachable
        self.child_a %= MAX_NODES as u32 + 1;
        self.child_b %= MAX_NODES as u32 + 1;
        self
    }
}

impl Sanitize for BookModel {
    fn sanitize(mut self) -> Self {
        self.root %= MAX_NODES as u32 + 1;
        self.leaf_count %= MAX_NODES as u64 + 2;
        for node in self.nodes.iter_mut() {
            *node = node.sanitize();
        }
        self
    }
}

impl Sanitize for ScaleInputs {
    fn sanitize(mut self) -> Self {
        self.exponent = self.exponent.clamp(-MAX_EXPONENT, MAX_EXPONENT);
        self
    }
}

impl NodeModel {
    fn encode(&self) -> [u8; NODE_SIZE] {
        let mut node = [0u8; NODE_SIZE];
        node[0..4].copy_from_slice(&self.tag.to_le_bytes());
        // Inner children and leaf key share no bytes, so both can be written
        node[16..24].copy_from_slice(&self.price.to_le_bytes());
        node[24..28].copy_from_slice(&self.child_a.to_le_bytes());
        node[28..32].copy_from_slice(&self.child_b.to_le_bytes());
        node
    }
}

impl BookModel {
    /// Framed account bytes for one side
    pub fn encode(&self, side: Side) -> [u8; BOOK_BYTES] {
        let mut data = [0u8; BOOK_BYTES];
        let flags = AccountFlags::INITIALIZED.union(side.flag()).bits();

        let mut header = BookHeader::zeroed();
        header.root = LeU32::new(self.root);
        header.leaf_count = LeU64::new(self.leaf_count);

        let mut at = 0;
        data[at..at + HEAD_TAG.len()].copy_from_slice(HEAD_TAG);
        at += HEAD_TAG.len();
        data[at..at + 8].copy_from_slice(&flags.to_le_bytes());
        at += 8;
        data[at..at + BOOK_HEADER_SIZE].copy_from_slice(header.as_bytes());
        at += BOOK_HEADER_SIZE;
        for node in &self.nodes {
            data[at..at + NODE_SIZE].copy_from_slice(&node.encode());
            at += NODE_SIZE;
        }
        data[at..].copy_from_slice(TAIL_TAG);
        data
    }

    /// Whether some leaf node carries `price`
    pub fn has_leaf_price(&self, price: u64) -> bool {
        self.nodes
            .iter()
            .any(|n| n.tag == book_oracle_bridge::state::tag::LEAF && n.price == price)
    }
}
