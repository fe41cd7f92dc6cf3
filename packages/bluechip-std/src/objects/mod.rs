mod asset;

pub use asset::{creator_token_addr, Asset, TokenType};
