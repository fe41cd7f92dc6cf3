//! Launch a new creator pool through the factory.

use bluechip_std::factory::{
    CommitFeeInfo, CreatePool, ExecuteMsg, ThresholdPayoutAmounts, TokenMeta,
    DEFAULT_COMMIT_AMOUNT_FOR_THRESHOLD, DEFAULT_COMMIT_LIMIT_USD, DEFAULT_CREATOR_EXCESS_LOCK_DAYS,
    DEFAULT_CW20_CODE_ID, DEFAULT_MAX_BLUECHIP_LOCK, DEFAULT_TOKEN_DECIMALS, DEFAULT_TOTAL_MINT,
};
use bluechip_std::objects::TokenType;
use cosmwasm_std::{to_json_binary, Addr, Decimal, Uint128};

use crate::error::ClientResult;
use crate::session::Session;
use crate::tx::{TxOptions, TxReceipt, GAS_CREATE_POOL};

/// The factory overwrites this in its reply handler once the cw20 token
/// exists.
const TOKEN_ADDR_PLACEHOLDER: &str = "WILL_BE_CREATED_BY_FACTORY";

/// Launch parameters every pool shares. Only the token name and symbol come
/// from the caller.
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    pub payout: ThresholdPayoutAmounts,
    pub total_mint: Uint128,
    pub commit_limit_usd: Uint128,
    pub commit_amount_for_threshold: Uint128,
    pub commit_fee_bluechip: Decimal,
    pub commit_fee_creator: Decimal,
    pub cw20_code_id: u64,
    pub max_bluechip_lock: Uint128,
    pub creator_excess_lock_days: u64,
    pub token_decimals: u8,
    pub oracle_address: String,
    pub oracle_price_feed: String,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        LaunchConfig {
            payout: ThresholdPayoutAmounts::default(),
            total_mint: Uint128::new(DEFAULT_TOTAL_MINT),
            commit_limit_usd: Uint128::new(DEFAULT_COMMIT_LIMIT_USD),
            commit_amount_for_threshold: Uint128::new(DEFAULT_COMMIT_AMOUNT_FOR_THRESHOLD),
            commit_fee_bluechip: Decimal::percent(1),
            commit_fee_creator: Decimal::percent(5),
            cw20_code_id: DEFAULT_CW20_CODE_ID,
            max_bluechip_lock: Uint128::new(DEFAULT_MAX_BLUECHIP_LOCK),
            creator_excess_lock_days: DEFAULT_CREATOR_EXCESS_LOCK_DAYS,
            token_decimals: DEFAULT_TOKEN_DECIMALS,
            oracle_address: "oracle_address_placeholder".to_owned(),
            oracle_price_feed: "ATOM_USD".to_owned(),
        }
    }
}

/// Assembles the factory `Create` message. The payout split is validated
/// against the total mint before it is sealed into binary.
pub fn build_create_msg(
    config: &LaunchConfig,
    factory: &str,
    sender: &str,
    denom: &str,
    token_name: &str,
    token_symbol: &str,
) -> ClientResult<ExecuteMsg> {
    config.payout.validate(config.total_mint)?;
    let threshold_payout = to_json_binary(&config.payout)?;

    let create_pool_msg = CreatePool {
        pool_token_info: [
            TokenType::Bluechip {
                denom: denom.to_owned(),
            },
            TokenType::CreatorToken {
                contract_addr: Addr::unchecked(TOKEN_ADDR_PLACEHOLDER),
            },
        ],
        cw20_token_contract_id: config.cw20_code_id,
        factory_to_create_pool_addr: Addr::unchecked(factory),
        threshold_payout: Some(threshold_payout),
        commit_fee_info: CommitFeeInfo {
            bluechip_wallet_address: Addr::unchecked(sender),
            creator_wallet_address: Addr::unchecked(sender),
            commit_fee_bluechip: config.commit_fee_bluechip,
            commit_fee_creator: config.commit_fee_creator,
        },
        creator_token_address: Addr::unchecked(sender),
        commit_amount_for_threshold: config.commit_amount_for_threshold,
        commit_limit_usd: config.commit_limit_usd,
        pyth_contract_addr_for_conversions: config.oracle_address.clone(),
        pyth_atom_usd_price_feed_id: config.oracle_price_feed.clone(),
        max_bluechip_lock_per_pool: config.max_bluechip_lock,
        creator_excess_liquidity_lock_days: config.creator_excess_lock_days,
        is_standard_pool: None,
    };

    Ok(ExecuteMsg::Create {
        create_pool_msg,
        token_info: TokenMeta {
            name: token_name.to_owned(),
            symbol: token_symbol.to_owned(),
            decimal: config.token_decimals,
        },
    })
}

/// Launches a pool with the default configuration and the caller's token
/// name and symbol.
pub async fn create_pool(
    session: &Session,
    factory: &str,
    token_name: &str,
    token_symbol: &str,
) -> ClientResult<TxReceipt> {
    let config = LaunchConfig::default();
    let msg = build_create_msg(
        &config,
        factory,
        session.address(),
        &session.config().native_denom,
        token_name,
        token_symbol,
    )?;
    log::info!("launching pool for token {token_symbol} through {factory}");
    session
        .execute(
            factory,
            &msg,
            vec![],
            TxOptions::with_gas(GAS_CREATE_POOL).memo("Create Pool"),
        )
        .await
}

#[cfg(test)]
mod test {
    use super::*;
    use cosmwasm_std::from_json;
    use speculoos::prelude::*;

    #[test]
    fn default_payout_survives_the_binary_seal() {
        let msg = build_create_msg(
            &LaunchConfig::default(),
            "bluechip1factory",
            "bluechip1creator",
            "ubluechip",
            "Creator Coin",
            "CRTR",
        )
        .unwrap();
        let (create_pool_msg, token_info) = match msg {
            ExecuteMsg::Create {
                create_pool_msg,
                token_info,
            } => (create_pool_msg, token_info),
        };
        assert_eq!(token_info.symbol, "CRTR");
        assert_eq!(token_info.decimal, 6);
        assert_eq!(
            create_pool_msg.commit_limit_usd,
            Uint128::new(25_000_000_000)
        );

        let sealed: ThresholdPayoutAmounts =
            from_json(create_pool_msg.threshold_payout.as_ref().unwrap()).unwrap();
        assert_that!(sealed.validate(Uint128::new(DEFAULT_TOTAL_MINT))).is_ok();
    }

    #[test]
    fn broken_payout_split_never_leaves_the_client() {
        let config = LaunchConfig {
            total_mint: Uint128::new(DEFAULT_TOTAL_MINT + 1),
            ..LaunchConfig::default()
        };
        let res = build_create_msg(
            &config,
            "bluechip1factory",
            "bluechip1creator",
            "ubluechip",
            "Creator Coin",
            "CRTR",
        );
        assert_that!(res).is_err();
    }
}
