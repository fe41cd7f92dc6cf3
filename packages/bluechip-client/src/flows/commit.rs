//! Commit to a pre-launch pool, or buy through the commit path once the
//! threshold is crossed.

use bluechip_std::pool::{CommitStatus, ExecuteMsg, QueryMsg};
use bluechip_std::Asset;
use cosmwasm_std::{Coin, Uint128, Uint64};

use crate::convert::{bps_to_decimal, deadline_ns, now_ms, slippage_bps, to_micro_units};
use crate::error::ClientResult;
use crate::rpc::{smart_query, WasmQuery};
use crate::session::Session;
use crate::tx::{TxOptions, TxReceipt, GAS_COMMIT};

/// Current threshold progress of a pool. Queried fresh before every commit;
/// the sentinel decides whether slippage protection applies.
pub async fn fetch_commit_status(
    transport: &(impl WasmQuery + ?Sized),
    pool: &str,
) -> ClientResult<CommitStatus> {
    smart_query(transport, pool, &QueryMsg::CheckThresholdLimit {}).await
}

/// Builds the commit message for a known threshold status.
///
/// `max_spread` only makes sense once the pool trades like an AMM, so it is
/// attached iff the threshold has been crossed AND the caller asked for a
/// positive slippage bound. Pre-threshold commits are fixed-price and must
/// not carry one.
pub fn build_commit(
    denom: &str,
    amount: Uint128,
    status: &CommitStatus,
    slippage_bps: Option<u16>,
    deadline: Option<Uint64>,
) -> ExecuteMsg {
    let max_spread = match (status.threshold_reached(), slippage_bps) {
        (true, Some(bps)) => Some(bps_to_decimal(bps)),
        _ => None,
    };
    ExecuteMsg::Commit {
        asset: Asset::native(denom, amount),
        amount,
        transaction_deadline: deadline,
        belief_price: None,
        max_spread,
    }
}

/// Validate, fetch the threshold status and execute the commit. The
/// committed amount travels as native funds alongside the message.
pub async fn commit(
    session: &Session,
    pool: &str,
    amount: &str,
    slippage_percent: Option<&str>,
    deadline_minutes: u64,
) -> ClientResult<TxReceipt> {
    let micro = to_micro_units(amount, session.config().coin_decimals)?;
    let bps = slippage_percent.map(slippage_bps).transpose()?;

    let status = fetch_commit_status(session, pool).await?;
    let deadline = deadline_ns(now_ms(), deadline_minutes)?;
    let denom = session.config().native_denom.clone();
    let msg = build_commit(&denom, micro, &status, bps, deadline);

    log::info!(
        "committing {micro}{denom} to {pool} (threshold reached: {})",
        status.threshold_reached()
    );
    let funds = vec![Coin {
        denom,
        amount: micro,
    }];
    session
        .execute(pool, &msg, funds, TxOptions::with_gas(GAS_COMMIT).memo("Commit"))
        .await
}
