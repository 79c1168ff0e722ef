//! Kani proofs for the scaling kernel and the order-book walker

#![cfg_attr(kani, feature(register_tool), register_tool(kanitool))]

pub mod generators;
pub mod sanitizer;

#[cfg(kani)]
pub mod properties;
#[cfg(kani)]
pub mod safety;
