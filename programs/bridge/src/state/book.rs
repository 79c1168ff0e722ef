//! Order-book side: header followed by a flat array of tree nodes
//!
//! ```text
//! BookHeader (32 bytes):
//!   bump_index: u64
//!   free_list_len: u64
//!   free_list_head: u32
//!   root: u32
//!   leaf_count: u64
//! nodes: [72-byte node; capacity]
//! ```
//!
//! Nodes are decoded by tag first; a layout is only cast once the tag says
//! which one applies.

use super::framing::{open_envelope, AccountFlags};
use book_oracle_common::{BridgeError, BridgeResult, LeU32, LeU64, Pod};
use pinocchio::{msg, pubkey::Pubkey};

pub const BOOK_HEADER_SIZE: usize = 32;
pub const NODE_SIZE: usize = 72;

/// Node tags
pub mod tag {
    pub const UNINITIALIZED: u32 = 0;
    pub const INNER: u32 = 1;
    pub const LEAF: u32 = 2;
    pub const FREE: u32 = 3;
    pub const LAST_FREE: u32 = 4;
}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct BookHeader {
    pub bump_index: LeU64,
    pub free_list_len: LeU64,
    pub free_list_head: LeU32,
    pub root: LeU32,
    pub leaf_count: LeU64,
}

unsafe impl Pod for BookHeader {}

/// Interior node; child A holds lower keys, child B higher keys
#[repr(C)]
#[derive(Clone, Copy)]
pub struct InnerNode {
    pub tag: LeU32,
    pub prefix_len: LeU32,
    pub key_lo: LeU64,
    pub key_hi: LeU64,
    pub child_a: LeU32,
    pub child_b: LeU32,
    pub _padding: [u8; 40],
}

unsafe impl Pod for InnerNode {}

/// Resting order
#[repr(C)]
#[derive(Clone, Copy)]
pub struct LeafNode {
    pub tag: LeU32,
    pub owner_slot: u8,
    pub fee_tier: u8,
    pub _padding: [u8; 2],
    pub key_lo: LeU64,
    /// Price in quote lots per base lot
    pub key_hi: LeU64,
    pub owner: Pubkey,
    pub quantity: LeU64,
    pub client_order_id: LeU64,
}

unsafe impl Pod for LeafNode {}

impl LeafNode {
    #[inline]
    pub fn price(&self) -> u64 {
        self.key_hi.get()
    }
}

const _: () = assert!(core::mem::size_of::<BookHeader>() == BOOK_HEADER_SIZE);
const _: () = assert!(core::mem::size_of::<InnerNode>() == NODE_SIZE);
const _: () = assert!(core::mem::size_of::<LeafNode>() == NODE_SIZE);

/// Decoded tree node
#[derive(Clone, Copy)]
pub enum Node<'a> {
    Uninitialized,
    Inner(&'a InnerNode),
    Leaf(&'a LeafNode),
    /// Free-list entry (`FREE` or `LAST_FREE`)
    Free,
}

/// Which side of the book an account holds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Bid,
    Ask,
}

impl Side {
    /// Kind bit expected in the account flags
    pub const fn flag(self) -> AccountFlags {
        match self {
            Side::Bid => AccountFlags::BIDS,
            Side::Ask => AccountFlags::ASKS,
        }
    }

    /// Child leading toward the best price: highest bid, lowest ask
    #[inline]
    pub fn best_child(self, inner: &InnerNode) -> u32 {
        match self {
            Side::Bid => inner.child_b.get(),
            Side::Ask => inner.child_a.get(),
        }
    }
}

/// Typed view over one book account
#[derive(Clone, Copy)]
pub struct BookView<'a> {
    header: &'a BookHeader,
    nodes: &'a [u8],
    capacity: usize,
}

impl<'a> BookView<'a> {
    /// Decode a framed book account of the given side
    ///
    /// Capacity is the number of whole nodes after the header; a trailing
    /// partial node is ignored.
    pub fn decode(data: &'a [u8], side: Side) -> BridgeResult<Self> {
        let mut cursor = open_envelope(data, side.flag())?;
        let header = cursor.take::<BookHeader>()?;
        let nodes = cursor.rest();
        Ok(Self {
            header,
            nodes,
            capacity: nodes.len() / NODE_SIZE,
        })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn root(&self) -> u32 {
        self.header.root.get()
    }

    #[inline]
    pub fn leaf_count(&self) -> u64 {
        self.header.leaf_count.get()
    }

    /// Decode the node at `index`
    pub fn node(&self, index: u32) -> BridgeResult<Node<'a>> {
        let index = index as usize;
        if index >= self.capacity {
            msg!("Error: Book node index out of range");
            return Err(BridgeError::InvalidAccountData);
        }

        let start = index * NODE_SIZE;
        let bytes = self
            .nodes
            .get(start..start + NODE_SIZE)
            .ok_or(BridgeError::InvalidAccountData)?;
        let node_tag = LeU32::ref_from(bytes).ok_or(BridgeError::InvalidAccountData)?.get();

        match node_tag {
            tag::UNINITIALIZED => Ok(Node::Uninitialized),
            tag::INNER => InnerNode::ref_from(bytes)
                .map(Node::Inner)
                .ok_or(BridgeError::InvalidAccountData),
            tag::LEAF => LeafNode::ref_from(bytes)
                .map(Node::Leaf)
                .ok_or(BridgeError::InvalidAccountData),
            tag::FREE | tag::LAST_FREE => Ok(Node::Free),
            _ => {
                msg!("Error: Unknown book node tag");
                Err(BridgeError::InvalidAccountData)
            }
        }
    }
}
