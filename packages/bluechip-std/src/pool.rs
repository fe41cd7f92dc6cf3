//! Message surface of a creator-pool contract.
//!
//! A pool starts in a subscription phase: `Commit` deposits count toward a
//! fixed USD threshold and the pool is not yet tradeable. Once the threshold
//! is crossed the pool seeds itself with liquidity and behaves like a regular
//! constant-product pair with NFT-backed liquidity positions.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Decimal, Timestamp, Uint128, Uint64};
use cw20::Cw20ReceiveMsg;

use crate::objects::{Asset, TokenType};

/// The default swap slippage
pub const DEFAULT_SLIPPAGE: &str = "0.005";
/// The maximum allowed swap slippage
pub const MAX_ALLOWED_SLIPPAGE: &str = "0.5";

/// Decimal precision for TWAP results
pub const TWAP_PRECISION: u8 = 6;

#[cw_serde]
pub enum ExecuteMsg {
    /// Receives a cw20 `send` carrying a [`Cw20HookMsg`]
    Receive(Cw20ReceiveMsg),
    /// Swap the offered asset against the pool. Only valid once the
    /// commit threshold has been crossed.
    SimpleSwap {
        offer_asset: Asset,
        belief_price: Option<Decimal>,
        max_spread: Option<Decimal>,
        to: Option<String>,
        /// Absolute expiry in nanoseconds. `None` means no deadline, which
        /// the contract treats differently from a deadline of zero.
        transaction_deadline: Option<Uint64>,
    },
    /// Subscribe to a pre-launch pool, or buy once the threshold is crossed.
    /// The committed amount must be attached as native funds.
    Commit {
        asset: Asset,
        amount: Uint128,
        transaction_deadline: Option<Uint64>,
        belief_price: Option<Decimal>,
        /// Slippage bound. Only meaningful after the threshold is crossed;
        /// pre-threshold commits must not carry it.
        max_spread: Option<Decimal>,
    },
    /// Open a new liquidity position. `amount0` (native) travels as funds,
    /// `amount1` (cw20) through an allowance.
    DepositLiquidity {
        amount0: Uint128,
        amount1: Uint128,
        min_amount0: Option<Uint128>,
        min_amount1: Option<Uint128>,
        transaction_deadline: Option<Uint64>,
    },
    /// Add both assets to an existing position.
    AddToPosition {
        position_id: String,
        amount0: Uint128,
        amount1: Uint128,
        min_amount0: Option<Uint128>,
        min_amount1: Option<Uint128>,
        transaction_deadline: Option<Uint64>,
    },
    /// Burn an absolute amount of position liquidity.
    RemovePartialLiquidity {
        position_id: String,
        liquidity_to_remove: Decimal,
        min_amount0: Option<Uint128>,
        min_amount1: Option<Uint128>,
        max_ratio_deviation_bps: Option<u16>,
        transaction_deadline: Option<Uint64>,
    },
    /// Burn a percentage (1-99) of position liquidity.
    RemovePartialLiquidityByPercent {
        position_id: String,
        percentage: u64,
        min_amount0: Option<Uint128>,
        min_amount1: Option<Uint128>,
        max_ratio_deviation_bps: Option<u16>,
        transaction_deadline: Option<Uint64>,
    },
    /// Close a position entirely.
    RemoveLiquidity { position_id: String },
    /// Collect fees owed to a given position
    CollectFees { position_id: String },
}

/// Hook messages a cw20 `send` can carry into the pool.
#[cw_serde]
pub enum Cw20HookMsg {
    /// Swap the sent tokens for the native side of the pool.
    Swap {
        belief_price: Option<Decimal>,
        max_spread: Option<Decimal>,
        to: Option<String>,
        transaction_deadline: Option<Uint64>,
    },
    /// Provide the cw20 side of a new position; `amount0` is the native
    /// amount expected alongside.
    DepositLiquidity { amount0: Uint128 },
    AddToPosition {
        position_id: String,
        amount0: Uint128,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Returns information about the pair in an object of type [`PairInfo`].
    #[returns(PairInfo)]
    Pair {},
    /// Alias of [`QueryMsg::Pair`]; both spellings are live on deployed pools.
    #[returns(PairInfo)]
    PairInfo {},
    /// Returns the pool reserves and total liquidity.
    #[returns(PoolStateResponse)]
    PoolState {},
    /// Returns information about a swap simulation in a [`SimulationResponse`] object.
    #[returns(SimulationResponse)]
    Simulation { offer_asset: Asset },
    #[returns(ReverseSimulationResponse)]
    ReverseSimulation { ask_asset: Asset },
    /// Whether the subscription threshold has been crossed.
    #[returns(CommitStatus)]
    IsFullyCommited {},
    /// Alias of [`QueryMsg::IsFullyCommited`].
    #[returns(CommitStatus)]
    CheckThresholdLimit {},
    #[returns(Option<Subscription>)]
    SubscriptionInfo { wallet: String },
    #[returns(bool)]
    IsSubscribed { wallet: String },
    /// Every subscriber of this pool with their cumulative payments.
    #[returns(PoolCommitsResponse)]
    PoolCommits {
        pool_contract_address: String,
        min_payment_usd: Option<Uint128>,
        after_timestamp: Option<u64>,
        start_after: Option<String>,
        limit: Option<u32>,
    },
    #[returns(PositionResponse)]
    Position { position_id: String },
    #[returns(PositionsResponse)]
    Positions {
        start_after: Option<String>,
        limit: Option<u32>,
    },
    #[returns(PositionsResponse)]
    PositionsByOwner {
        owner: String,
        start_after: Option<String>,
        limit: Option<u32>,
    },
}

/// This structure stores the main parameters for a creator pair.
#[cw_serde]
pub struct PairInfo {
    /// Asset information for the two assets in the pool
    pub asset_infos: [TokenType; 2],
    /// Pair contract address
    pub contract_addr: Addr,
    /// Pair LP token address
    pub liquidity_token: Addr,
    /// The pool type (xyk, stableswap etc) available in [`PairType`]
    pub pair_type: PairType,
}

#[cw_serde]
pub enum PairType {
    Xyk {},
    Custom(String),
}

#[cw_serde]
pub struct PoolStateResponse {
    pub nft_ownership_accepted: bool,
    pub reserve0: Uint128,
    pub reserve1: Uint128,
    pub total_liquidity: Uint128,
    pub block_time_last: u64,
}

/// This structure holds the parameters that are returned from a swap simulation response
#[cw_serde]
pub struct SimulationResponse {
    /// The amount of ask assets returned by the swap
    pub return_amount: Uint128,
    /// The spread used in the swap operation
    pub spread_amount: Uint128,
    /// The amount of fees charged by the transaction
    pub commission_amount: Uint128,
}

/// This structure holds the parameters that are returned from a reverse swap simulation response.
#[cw_serde]
pub struct ReverseSimulationResponse {
    /// The amount of offer assets returned by the reverse swap
    pub offer_amount: Uint128,
    /// The spread used in the swap operation
    pub spread_amount: Uint128,
    /// The amount of fees charged by the transaction
    pub commission_amount: Uint128,
}

/// Subscription progress of a pool. A unit `fully_committed` marks the
/// threshold as crossed; the string sentinel is part of the wire contract.
#[cw_serde]
pub enum CommitStatus {
    InProgress { raised: Uint128, target: Uint128 },
    FullyCommitted,
}

impl CommitStatus {
    /// Derived on every fetch, never stored.
    pub fn threshold_reached(&self) -> bool {
        matches!(self, CommitStatus::FullyCommitted)
    }
}

/// One subscriber's standing with a pool.
#[cw_serde]
pub struct Subscription {
    pub expires: Timestamp,
    pub total_paid: Uint128,
}

/// A single subscriber entry of a [`PoolCommitsResponse`].
#[cw_serde]
pub struct CommiterInfo {
    pub wallet: String,
    pub last_payment_bluechip: Uint128,
    pub last_payment_usd: Uint128,
    /// Nanosecond timestamp of the most recent commit.
    pub last_commited: Timestamp,
    pub total_paid_usd: Uint128,
    pub total_paid_bluechip: Uint128,
}

#[cw_serde]
pub struct PoolCommitsResponse {
    pub total_count: u32,
    pub commiters: Vec<CommiterInfo>,
}

/// A liquidity position with its accrued-but-unclaimed fees folded in.
#[cw_serde]
pub struct PositionResponse {
    pub position_id: String,
    pub owner: Addr,
    pub liquidity: Uint128,
    pub fee_growth_inside_0_last: Decimal,
    pub fee_growth_inside_1_last: Decimal,
    pub created_at: Timestamp,
    pub last_fee_collection: Timestamp,
    pub unclaimed_fees_0: Uint128,
    pub unclaimed_fees_1: Uint128,
}

#[cw_serde]
pub struct PositionsResponse {
    pub positions: Vec<PositionResponse>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn commit_status_sentinel_wire_format() {
        // The threshold sentinel is a bare string on the wire, not an object.
        let status = CommitStatus::FullyCommitted;
        assert_eq!(
            serde_json::to_value(&status).unwrap(),
            serde_json::json!("fully_committed")
        );
        assert!(status.threshold_reached());

        let status = CommitStatus::InProgress {
            raised: Uint128::new(12_000_000_000),
            target: Uint128::new(25_000_000_000),
        };
        assert_eq!(
            serde_json::to_value(&status).unwrap(),
            serde_json::json!({
                "in_progress": { "raised": "12000000000", "target": "25000000000" }
            })
        );
        assert!(!status.threshold_reached());
    }

    #[test]
    fn commit_msg_wire_format() {
        let msg = ExecuteMsg::Commit {
            asset: Asset::native("ubluechip", 25_500_000u128),
            amount: Uint128::new(25_500_000),
            transaction_deadline: Some(Uint64::new(1_201_000_000_000)),
            belief_price: None,
            max_spread: None,
        };
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            serde_json::json!({
                "commit": {
                    "asset": {
                        "info": { "bluechip": { "denom": "ubluechip" } },
                        "amount": "25500000"
                    },
                    "amount": "25500000",
                    "transaction_deadline": "1201000000000",
                    "belief_price": null,
                    "max_spread": null
                }
            })
        );
    }

    #[test]
    fn query_msgs_are_snake_case() {
        assert_eq!(
            serde_json::to_value(QueryMsg::IsFullyCommited {}).unwrap(),
            serde_json::json!({ "is_fully_commited": {} })
        );
        assert_eq!(
            serde_json::to_value(QueryMsg::CheckThresholdLimit {}).unwrap(),
            serde_json::json!({ "check_threshold_limit": {} })
        );
        assert_eq!(
            serde_json::to_value(QueryMsg::PositionsByOwner {
                owner: "bluechip1owner".to_string(),
                start_after: None,
                limit: Some(10),
            })
            .unwrap(),
            serde_json::json!({
                "positions_by_owner": {
                    "owner": "bluechip1owner",
                    "start_after": null,
                    "limit": 10
                }
            })
        );
    }
}
