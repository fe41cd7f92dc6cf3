//! Message surface of the pool factory.
//!
//! The factory instantiates creator pools together with their cw20 token and
//! position NFT, and exposes the oracle-backed bluechip/USD conversion
//! queries the pools themselves rely on.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Decimal, StdError, StdResult, Uint128};

use crate::objects::TokenType;

/// Commit threshold every launch uses, in USD micro-units ($25,000).
pub const DEFAULT_COMMIT_LIMIT_USD: u128 = 25_000_000_000;
/// Bluechip seeded into the pool when the threshold is crossed.
pub const DEFAULT_COMMIT_AMOUNT_FOR_THRESHOLD: u128 = 25_000_000_000;
/// Cap on bluechip locked per pool.
pub const DEFAULT_MAX_BLUECHIP_LOCK: u128 = 10_000_000_000;
pub const DEFAULT_CREATOR_EXCESS_LOCK_DAYS: u64 = 7;
/// cw20 code id pools instantiate their creator token from.
pub const DEFAULT_CW20_CODE_ID: u64 = 1;
pub const DEFAULT_TOKEN_DECIMALS: u8 = 6;

/// Share of every commit routed to the platform (1%).
pub const DEFAULT_COMMIT_FEE_BLUECHIP: &str = "0.01";
/// Share of every commit routed to the creator (5%).
pub const DEFAULT_COMMIT_FEE_CREATOR: &str = "0.05";

/// Default creator-token mint split, in token micro-units. The four amounts
/// must sum to the total mint (1,200,000 tokens at 6 decimals).
pub const DEFAULT_CREATOR_REWARD: u128 = 325_000_000_000;
pub const DEFAULT_BLUECHIP_REWARD: u128 = 25_000_000_000;
pub const DEFAULT_POOL_SEED: u128 = 350_000_000_000;
pub const DEFAULT_COMMIT_RETURN: u128 = 500_000_000_000;
pub const DEFAULT_TOTAL_MINT: u128 =
    DEFAULT_CREATOR_REWARD + DEFAULT_BLUECHIP_REWARD + DEFAULT_POOL_SEED + DEFAULT_COMMIT_RETURN;

#[cw_serde]
pub enum ExecuteMsg {
    /// Launch a new creator pool. The factory instantiates the cw20 token
    /// and patches `creator_token_address` in its reply handler.
    Create {
        create_pool_msg: CreatePool,
        token_info: TokenMeta,
    },
}

/// Name, symbol and decimals of a creator token to be minted.
#[cw_serde]
pub struct TokenMeta {
    pub name: String,
    pub symbol: String,
    pub decimal: u8,
}

/// Pool parameters handed to the factory on `Create`.
#[cw_serde]
pub struct CreatePool {
    /// The creator token and bluechip. The creator-token address is a
    /// placeholder until the factory's reply fills it in.
    pub pool_token_info: [TokenType; 2],
    pub cw20_token_contract_id: u64,
    pub factory_to_create_pool_addr: Addr,
    /// Base64-encoded [`ThresholdPayoutAmounts`].
    pub threshold_payout: Option<Binary>,
    pub commit_fee_info: CommitFeeInfo,
    pub creator_token_address: Addr,
    /// Bluechip seeded into the pool once the threshold is crossed.
    pub commit_amount_for_threshold: Uint128,
    /// USD micro-unit threshold that flips the pool into trading mode.
    pub commit_limit_usd: Uint128,
    pub pyth_contract_addr_for_conversions: String,
    pub pyth_atom_usd_price_feed_id: String,
    pub max_bluechip_lock_per_pool: Uint128,
    pub creator_excess_liquidity_lock_days: u64,
    pub is_standard_pool: Option<bool>,
}

/// Where the per-commit fees accumulate and at what rates.
#[cw_serde]
pub struct CommitFeeInfo {
    pub bluechip_wallet_address: Addr,
    pub creator_wallet_address: Addr,
    pub commit_fee_bluechip: Decimal,
    pub commit_fee_creator: Decimal,
}

/// How the creator-token mint is distributed when the threshold is crossed.
#[cw_serde]
pub struct ThresholdPayoutAmounts {
    pub creator_reward_amount: Uint128,
    pub bluechip_reward_amount: Uint128,
    pub pool_seed_amount: Uint128,
    pub commit_return_amount: Uint128,
}

impl ThresholdPayoutAmounts {
    /// The four payouts must account for the entire mint.
    pub fn validate(&self, total_mint: Uint128) -> StdResult<()> {
        let sum = self.creator_reward_amount
            + self.bluechip_reward_amount
            + self.pool_seed_amount
            + self.commit_return_amount;

        if sum != total_mint {
            return Err(StdError::generic_err(
                "Payout amounts don't sum to total mint",
            ));
        }
        Ok(())
    }
}

impl Default for ThresholdPayoutAmounts {
    fn default() -> Self {
        ThresholdPayoutAmounts {
            creator_reward_amount: Uint128::new(DEFAULT_CREATOR_REWARD),
            bluechip_reward_amount: Uint128::new(DEFAULT_BLUECHIP_REWARD),
            pool_seed_amount: Uint128::new(DEFAULT_POOL_SEED),
            commit_return_amount: Uint128::new(DEFAULT_COMMIT_RETURN),
        }
    }
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// State of one pool, looked up through the factory's registry.
    #[returns(PoolSummary)]
    GetPoolState { pool_contract_address: String },
    /// Every pool the factory has created, keyed by pool id.
    #[returns(AllPoolsResponse)]
    GetAllPools {},
    #[returns(BluechipPriceResponse)]
    GetBluechipUsdPrice {},
    #[returns(ConversionResponse)]
    ConvertBluechipToUsd { amount: Uint128 },
    #[returns(ConversionResponse)]
    ConvertUsdToBluechip { amount: Uint128 },
}

/// Oracle price of bluechip in USD micro-units.
#[cw_serde]
pub struct BluechipPriceResponse {
    pub price: Uint128,
    pub timestamp: u64,
    /// Whether the oracle served a cached value instead of a fresh read.
    pub is_cached: bool,
}

#[cw_serde]
pub struct ConversionResponse {
    pub amount: Uint128,
    pub rate_used: Uint128,
    pub timestamp: u64,
}

/// Registry view of a single pool.
#[cw_serde]
pub struct PoolSummary {
    pub pool_contract_address: Addr,
    pub nft_ownership_accepted: bool,
    pub reserve0: Uint128,
    pub reserve1: Uint128,
    pub total_liquidity: Uint128,
    pub block_time_last: u64,
    pub price0_cumulative_last: Uint128,
    pub price1_cumulative_last: Uint128,
    pub assets: Vec<String>,
}

#[cw_serde]
pub struct AllPoolsResponse {
    /// Pool id (stringified) paired with the pool's registry summary.
    pub pools: Vec<(String, PoolSummary)>,
}

#[cfg(test)]
mod test {
    use super::*;
    use speculoos::prelude::*;

    #[test]
    fn default_payout_sums_to_total_mint() {
        let payout = ThresholdPayoutAmounts::default();
        assert_that!(payout.validate(Uint128::new(DEFAULT_TOTAL_MINT))).is_ok();
        assert_eq!(DEFAULT_TOTAL_MINT, 1_200_000_000_000);
    }

    #[test]
    fn payout_off_by_one_is_rejected() {
        let payout = ThresholdPayoutAmounts::default();
        let res = payout.validate(Uint128::new(DEFAULT_TOTAL_MINT + 1));
        assert_that!(res).is_err();
    }

    #[test]
    fn get_all_pools_wire_format() {
        assert_eq!(
            serde_json::to_value(QueryMsg::GetAllPools {}).unwrap(),
            serde_json::json!({ "get_all_pools": {} })
        );
        let resp: AllPoolsResponse = serde_json::from_value(serde_json::json!({
            "pools": [[
                "1",
                {
                    "pool_contract_address": "bluechip1pool",
                    "nft_ownership_accepted": true,
                    "reserve0": "1000",
                    "reserve1": "2000",
                    "total_liquidity": "1400",
                    "block_time_last": 1700000000,
                    "price0_cumulative_last": "0",
                    "price1_cumulative_last": "0",
                    "assets": ["ubluechip", "bluechip1token"]
                }
            ]]
        }))
        .unwrap();
        assert_that!(resp.pools).has_length(1);
        assert_eq!(resp.pools[0].0, "1");
        assert_eq!(resp.pools[0].1.pool_contract_address, Addr::unchecked("bluechip1pool"));
    }
}
