use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug)]
/// Error type for the bluechip client crate.
pub enum ClientError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Rpc(#[from] cosmrs::rpc::Error),

    #[error("{0}")]
    Cosmrs(#[from] cosmrs::ErrorReport),

    #[error("{0}")]
    Bip32(#[from] bip32::Error),

    #[error("{0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    ProtoDecode(#[from] cosmrs::proto::prost::DecodeError),

    #[error("invalid chain id: {0}")]
    ChainId(#[from] cosmrs::tendermint::Error),

    #[error("unknown network {0:?}, expected \"mainnet\" or \"local\"")]
    UnknownNetwork(String),

    #[error("no factory address: pass --factory or set BLUECHIP_FACTORY")]
    MissingFactory,

    #[error("invalid amount {input:?}: {reason}")]
    InvalidAmount { input: String, reason: String },

    #[error("invalid slippage {0:?}: must be a percentage between 0 and 50")]
    InvalidSlippage(String),

    #[error("invalid removal percentage {0}: must be between 1 and 99")]
    InvalidPercentage(u64),

    #[error("deadline of {0} minutes overflows the nanosecond clock")]
    InvalidDeadline(u64),

    #[error("query on {contract} failed: {log}")]
    Query { contract: String, log: String },

    #[error("account {0} not found on chain")]
    AccountNotFound(String),

    #[error("transaction rejected: {log}")]
    Broadcast { log: String },

    #[error("transaction {tx_hash} not found after {attempts} confirmation polls")]
    NotConfirmed { tx_hash: String, attempts: u32 },

    #[error("transaction {tx_hash} failed on chain: {log}")]
    TxFailed { tx_hash: String, log: String },

    #[error("insufficient {denom} balance: have {available}, need {required}")]
    InsufficientBalance {
        denom: String,
        available: Uint128,
        required: Uint128,
    },

    #[error("position {position_id} is owned by {owner}, not by this wallet")]
    NotPositionOwner { position_id: String, owner: String },

    #[error("pool {0} has no creator token in its pair info")]
    CreatorTokenMissing(String),
}

pub type ClientResult<T> = Result<T, ClientError>;
