//! Wire layouts of the accounts read by the bridge

pub mod book;
pub mod clock;
pub mod framing;
pub mod market;
pub mod mint;
pub mod price;

pub use book::*;
pub use clock::*;
pub use framing::*;
pub use market::*;
pub use mint::*;
pub use price::*;
