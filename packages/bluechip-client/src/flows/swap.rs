//! Post-threshold trading: native-side swaps through `SimpleSwap`, creator
//! token sales through a cw20 `Send` hook.

use bluechip_std::pool::{Cw20HookMsg, ExecuteMsg};
use bluechip_std::Asset;
use cosmwasm_std::{to_json_binary, Coin, Uint128, Uint64};
use cw20::{BalanceResponse, Cw20ExecuteMsg, Cw20QueryMsg, TokenInfoResponse};

use crate::convert::{bps_to_decimal, deadline_ns, now_ms, slippage_bps, to_micro_units};
use crate::error::{ClientError, ClientResult};
use crate::rpc::{smart_query, WasmQuery};
use crate::session::Session;
use crate::tx::{TxOptions, TxReceipt, GAS_SWAP};

/// Swap native bluechip into the pool's creator token.
pub fn build_simple_swap(
    denom: &str,
    amount: Uint128,
    slippage_bps: Option<u16>,
    deadline: Option<Uint64>,
) -> ExecuteMsg {
    ExecuteMsg::SimpleSwap {
        offer_asset: Asset::native(denom, amount),
        belief_price: None,
        max_spread: slippage_bps.map(bps_to_decimal),
        to: None,
        transaction_deadline: deadline,
    }
}

/// The hook a cw20 `send` carries to swap creator tokens back into bluechip.
pub fn build_swap_hook(slippage_bps: Option<u16>, deadline: Option<Uint64>) -> Cw20HookMsg {
    Cw20HookMsg::Swap {
        belief_price: None,
        max_spread: slippage_bps.map(bps_to_decimal),
        to: None,
        transaction_deadline: deadline,
    }
}

/// Buy creator tokens with native bluechip. The offered amount travels as
/// funds next to the message.
pub async fn buy(
    session: &Session,
    pool: &str,
    amount: &str,
    slippage_percent: Option<&str>,
    deadline_minutes: u64,
) -> ClientResult<TxReceipt> {
    let micro = to_micro_units(amount, session.config().coin_decimals)?;
    let bps = slippage_percent.map(slippage_bps).transpose()?;
    let denom = session.config().native_denom.clone();

    let balance = session.native_balance().await?;
    if balance < micro {
        return Err(ClientError::InsufficientBalance {
            denom,
            available: balance,
            required: micro,
        });
    }

    let msg = build_simple_swap(&denom, micro, bps, deadline_ns(now_ms(), deadline_minutes)?);
    log::info!("swapping {micro}{denom} into {pool}");
    let funds = vec![Coin {
        denom,
        amount: micro,
    }];
    session
        .execute(pool, &msg, funds, TxOptions::with_gas(GAS_SWAP).memo("Buy"))
        .await
}

/// Sell creator tokens back into native bluechip. The swap rides inside a
/// cw20 `send` executed on the token contract, so no funds are attached.
pub async fn sell(
    session: &Session,
    pool: &str,
    token: &str,
    amount: &str,
    slippage_percent: Option<&str>,
    deadline_minutes: u64,
) -> ClientResult<TxReceipt> {
    let info: TokenInfoResponse = smart_query(session, token, &Cw20QueryMsg::TokenInfo {}).await?;
    let micro = to_micro_units(amount, info.decimals)?;
    let bps = slippage_percent.map(slippage_bps).transpose()?;

    let held: BalanceResponse = smart_query(
        session,
        token,
        &Cw20QueryMsg::Balance {
            address: session.address().to_string(),
        },
    )
    .await?;
    if held.balance < micro {
        return Err(ClientError::InsufficientBalance {
            denom: info.symbol,
            available: held.balance,
            required: micro,
        });
    }

    let hook = build_swap_hook(bps, deadline_ns(now_ms(), deadline_minutes)?);
    let msg = Cw20ExecuteMsg::Send {
        contract: pool.to_string(),
        amount: micro,
        msg: to_json_binary(&hook)?,
    };
    log::info!("selling {micro} {} through {pool}", info.symbol);
    session
        .execute(token, &msg, vec![], TxOptions::with_gas(GAS_SWAP).memo("Sell"))
        .await
}

#[cfg(test)]
mod test {
    use super::*;
    use speculoos::prelude::*;

    #[test]
    fn simple_swap_carries_offer_as_native_asset() {
        let msg = build_simple_swap("ubluechip", Uint128::new(5_000_000), Some(50), None);
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            json["simple_swap"]["offer_asset"]["info"],
            serde_json::json!({ "bluechip": { "denom": "ubluechip" } })
        );
        assert_eq!(json["simple_swap"]["max_spread"], "0.005");
        assert_eq!(json["simple_swap"]["transaction_deadline"], serde_json::Value::Null);
    }

    #[test]
    fn swap_hook_round_trips_through_base64() {
        let hook = build_swap_hook(Some(100), Some(Uint64::new(1_201_000_000_000)));
        let binary = to_json_binary(&hook).unwrap();
        // what the pool's Receive handler will decode
        let decoded: Cw20HookMsg = cosmwasm_std::from_json(&binary).unwrap();
        assert_that!(decoded).is_equal_to(hook);
    }
}
