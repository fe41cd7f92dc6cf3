//! Chain client for the BlueChip creator-pool suite.
//!
//! A [`Session`](session::Session) binds a mnemonic-derived key to one
//! network and signs wasm executes with explicit gas. The [`flows`] modules
//! implement the user-facing actions on top of it: committing to pre-launch
//! pools, trading, liquidity management, pool creation and the read-side
//! aggregations (portfolio, commit progress).

pub mod chain;
pub mod client;
pub mod convert;
pub mod error;
pub mod flows;
pub mod rpc;
pub mod session;
pub mod tx;
pub mod wallet;

pub use chain::ChainConfig;
pub use client::BluechipClient;
pub use error::{ClientError, ClientResult};
pub use session::Session;
pub use tx::{Severity, TxReceipt, TxStatus};
