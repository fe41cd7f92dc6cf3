//! Liquidity positions: open, top up, trim and close, plus fee collection.

use std::str::FromStr;

use bluechip_std::objects::creator_token_addr;
use bluechip_std::pool::{ExecuteMsg, PairInfo, PositionResponse, PositionsResponse, QueryMsg};
use cosmwasm_std::{Coin, Decimal, Uint128};
use cw20::{AllowanceResponse, Cw20ExecuteMsg, Cw20QueryMsg};

use crate::convert::{deadline_ns, min_after_slippage, now_ms, slippage_bps, to_micro_units};
use crate::error::{ClientError, ClientResult};
use crate::rpc::{smart_query, WasmQuery};
use crate::session::Session;
use crate::tx::{TxOptions, TxReceipt, GAS_APPROVE, GAS_LIQUIDITY};

/// Applied when the caller gives no slippage bound (1%).
const DEFAULT_SLIPPAGE_BPS: u16 = 100;

/// The creator-token address of a pool, from its pair info.
pub async fn fetch_creator_token(
    transport: &(impl WasmQuery + ?Sized),
    pool: &str,
) -> ClientResult<String> {
    let pair: PairInfo = smart_query(transport, pool, &QueryMsg::Pair {}).await?;
    creator_token_addr(&pair.asset_infos)
        .map(|addr| addr.to_string())
        .ok_or_else(|| ClientError::CreatorTokenMissing(pool.to_string()))
}

/// All positions `owner` holds in a pool.
pub async fn fetch_positions(
    transport: &(impl WasmQuery + ?Sized),
    pool: &str,
    owner: &str,
) -> ClientResult<Vec<PositionResponse>> {
    let response: PositionsResponse = smart_query(
        transport,
        pool,
        &QueryMsg::PositionsByOwner {
            owner: owner.to_string(),
            start_after: None,
            limit: None,
        },
    )
    .await?;
    Ok(response.positions)
}

/// Fails unless `position_id` exists and belongs to the session wallet.
async fn assert_position_owner(
    session: &Session,
    pool: &str,
    position_id: &str,
) -> ClientResult<PositionResponse> {
    let position: PositionResponse = smart_query(
        session,
        pool,
        &QueryMsg::Position {
            position_id: position_id.to_string(),
        },
    )
    .await?;
    if position.owner.as_str() != session.address() {
        return Err(ClientError::NotPositionOwner {
            position_id: position_id.to_string(),
            owner: position.owner.to_string(),
        });
    }
    Ok(position)
}

/// Tops up the pool's allowance on the creator token if it cannot cover
/// `required`. A separate approval transaction, sent before the deposit.
async fn ensure_allowance(
    session: &Session,
    token: &str,
    pool: &str,
    required: Uint128,
) -> ClientResult<()> {
    let current: AllowanceResponse = smart_query(
        session,
        token,
        &Cw20QueryMsg::Allowance {
            owner: session.address().to_string(),
            spender: pool.to_string(),
        },
    )
    .await?;
    if current.allowance >= required {
        return Ok(());
    }
    log::info!(
        "allowance {} below {required}, approving {pool} on {token}",
        current.allowance
    );
    let approve = Cw20ExecuteMsg::IncreaseAllowance {
        spender: pool.to_string(),
        amount: required,
        expires: None,
    };
    session
        .execute(
            token,
            &approve,
            vec![],
            TxOptions::with_gas(GAS_APPROVE).memo("Approve Pool"),
        )
        .await?;
    Ok(())
}

/// Opens a new position. The native side travels as funds, the creator-token
/// side through an allowance checked (and topped up) first.
pub async fn deposit(
    session: &Session,
    pool: &str,
    amount0: &str,
    amount1: &str,
    slippage_percent: Option<&str>,
    deadline_minutes: u64,
) -> ClientResult<TxReceipt> {
    let micro0 = to_micro_units(amount0, session.config().coin_decimals)?;
    let micro1 = to_micro_units(amount1, session.config().coin_decimals)?;
    let bps = slippage_percent
        .map(slippage_bps)
        .transpose()?
        .unwrap_or(DEFAULT_SLIPPAGE_BPS);

    let token = fetch_creator_token(session, pool).await?;
    ensure_allowance(session, &token, pool, micro1).await?;

    let msg = ExecuteMsg::DepositLiquidity {
        amount0: micro0,
        amount1: micro1,
        min_amount0: Some(min_after_slippage(micro0, bps)),
        min_amount1: Some(min_after_slippage(micro1, bps)),
        transaction_deadline: deadline_ns(now_ms(), deadline_minutes)?,
    };
    let funds = vec![Coin {
        denom: session.config().native_denom.clone(),
        amount: micro0,
    }];
    session
        .execute(
            pool,
            &msg,
            funds,
            TxOptions::with_gas(GAS_LIQUIDITY).memo("Deposit Liquidity"),
        )
        .await
}

/// Adds both assets to an existing position after verifying ownership.
pub async fn add_to_position(
    session: &Session,
    pool: &str,
    position_id: &str,
    amount0: &str,
    amount1: &str,
    slippage_percent: Option<&str>,
    deadline_minutes: u64,
) -> ClientResult<TxReceipt> {
    let micro0 = to_micro_units(amount0, session.config().coin_decimals)?;
    let micro1 = to_micro_units(amount1, session.config().coin_decimals)?;
    let bps = slippage_percent
        .map(slippage_bps)
        .transpose()?
        .unwrap_or(DEFAULT_SLIPPAGE_BPS);

    assert_position_owner(session, pool, position_id).await?;
    let token = fetch_creator_token(session, pool).await?;
    ensure_allowance(session, &token, pool, micro1).await?;

    let msg = ExecuteMsg::AddToPosition {
        position_id: position_id.to_string(),
        amount0: micro0,
        amount1: micro1,
        min_amount0: Some(min_after_slippage(micro0, bps)),
        min_amount1: Some(min_after_slippage(micro1, bps)),
        transaction_deadline: deadline_ns(now_ms(), deadline_minutes)?,
    };
    let funds = vec![Coin {
        denom: session.config().native_denom.clone(),
        amount: micro0,
    }];
    session
        .execute(
            pool,
            &msg,
            funds,
            TxOptions::with_gas(GAS_LIQUIDITY).memo("Add To Position"),
        )
        .await
}

/// How much of a position to remove.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoveAmount {
    /// Absolute liquidity units.
    Liquidity(Decimal),
    /// Percentage of the position, exclusive bounds (1-99); 100% removal
    /// goes through [`close`].
    Percent(u64),
}

impl RemoveAmount {
    pub fn liquidity(amount: &str) -> ClientResult<Self> {
        let parsed = Decimal::from_str(amount.trim()).map_err(|e| ClientError::InvalidAmount {
            input: amount.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.is_zero() {
            return Err(ClientError::InvalidAmount {
                input: amount.to_owned(),
                reason: "liquidity to remove must be greater than zero".to_owned(),
            });
        }
        Ok(RemoveAmount::Liquidity(parsed))
    }

    pub fn percent(percentage: u64) -> ClientResult<Self> {
        if !(1..=99).contains(&percentage) {
            return Err(ClientError::InvalidPercentage(percentage));
        }
        Ok(RemoveAmount::Percent(percentage))
    }
}

/// Trims a position by an absolute liquidity amount or a percentage. The
/// slippage bound maps onto `max_ratio_deviation_bps`.
pub async fn remove(
    session: &Session,
    pool: &str,
    position_id: &str,
    amount: RemoveAmount,
    slippage_percent: Option<&str>,
    deadline_minutes: u64,
) -> ClientResult<TxReceipt> {
    let deviation_bps = slippage_percent.map(slippage_bps).transpose()?;
    assert_position_owner(session, pool, position_id).await?;

    let deadline = deadline_ns(now_ms(), deadline_minutes)?;
    let msg = match amount {
        RemoveAmount::Liquidity(liquidity_to_remove) => ExecuteMsg::RemovePartialLiquidity {
            position_id: position_id.to_string(),
            liquidity_to_remove,
            min_amount0: None,
            min_amount1: None,
            max_ratio_deviation_bps: deviation_bps,
            transaction_deadline: deadline,
        },
        RemoveAmount::Percent(percentage) => ExecuteMsg::RemovePartialLiquidityByPercent {
            position_id: position_id.to_string(),
            percentage,
            min_amount0: None,
            min_amount1: None,
            max_ratio_deviation_bps: deviation_bps,
            transaction_deadline: deadline,
        },
    };
    session
        .execute(
            pool,
            &msg,
            vec![],
            TxOptions::with_gas(GAS_LIQUIDITY).memo("Remove Liquidity"),
        )
        .await
}

/// Closes a position entirely, burning the NFT.
pub async fn close(session: &Session, pool: &str, position_id: &str) -> ClientResult<TxReceipt> {
    assert_position_owner(session, pool, position_id).await?;
    let msg = ExecuteMsg::RemoveLiquidity {
        position_id: position_id.to_string(),
    };
    session
        .execute(
            pool,
            &msg,
            vec![],
            TxOptions::with_gas(GAS_LIQUIDITY).memo("Close Position"),
        )
        .await
}

/// Collects accrued fees on a position the session wallet owns.
pub async fn collect_fees(
    session: &Session,
    pool: &str,
    position_id: &str,
) -> ClientResult<TxReceipt> {
    assert_position_owner(session, pool, position_id).await?;
    let msg = ExecuteMsg::CollectFees {
        position_id: position_id.to_string(),
    };
    session
        .execute(
            pool,
            &msg,
            vec![],
            TxOptions::with_gas(GAS_LIQUIDITY).memo("Collect Fees"),
        )
        .await
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;
    use speculoos::prelude::*;

    #[rstest]
    #[case(1)]
    #[case(50)]
    #[case(99)]
    fn percent_in_range_is_accepted(#[case] pct: u64) {
        assert_that!(RemoveAmount::percent(pct)).is_ok_containing(RemoveAmount::Percent(pct));
    }

    #[rstest]
    #[case(0)]
    #[case(100)]
    #[case(250)]
    fn percent_out_of_range_is_rejected(#[case] pct: u64) {
        assert_that!(RemoveAmount::percent(pct)).is_err();
    }

    #[test]
    fn liquidity_amount_must_be_positive() {
        assert_that!(RemoveAmount::liquidity("12.5"))
            .is_ok_containing(RemoveAmount::Liquidity(Decimal::from_str("12.5").unwrap()));
        assert_that!(RemoveAmount::liquidity("0")).is_err();
        assert_that!(RemoveAmount::liquidity("-3")).is_err();
        assert_that!(RemoveAmount::liquidity("lots")).is_err();
    }
}
