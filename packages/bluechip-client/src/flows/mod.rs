//! One module per user-facing action: validate, convert, build the typed
//! message, execute with a fixed gas ceiling.

pub mod commit;
pub mod create_pool;
pub mod liquidity;
pub mod portfolio;
pub mod progress;
pub mod swap;
