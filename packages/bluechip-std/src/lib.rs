//! # BlueChip Contract Types
//!
//! Wire-exact message and response types for the BlueChip creator-pool
//! protocol: the pool contracts (swap, commit, liquidity positions) and the
//! factory that instantiates them.
//!
//! Every numeric amount on the wire is an integer string in micro-units
//! (10^-6); deadlines are nanosecond timestamps. The types here serialize to
//! exactly the JSON the contracts accept, so they can be used both by on-chain
//! code and by off-chain clients.

pub mod factory;
pub mod objects;
pub mod pool;

/// Number of decimals used by the native bluechip denom and every creator
/// token minted through the factory.
pub const MICRO_DECIMALS: u8 = 6;

pub use crate::objects::{Asset, TokenType};
